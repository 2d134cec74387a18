//! Checklist entries every new stash starts with.

use crate::item::Category;

/// A seeded checklist entry: translation key and category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultChecklistEntry {
    pub name: &'static str,
    pub category: Category,
}

const fn entry(name: &'static str, category: Category) -> DefaultChecklistEntry {
    DefaultChecklistEntry { name, category }
}

/// Recommended supplies, keyed for client-side translation.
pub const DEFAULT_CHECKLIST: [DefaultChecklistEntry; 28] = [
    entry("checklist.item.bottledWater", Category::Water),
    entry("checklist.item.waterPurification", Category::Water),
    entry("checklist.item.cannedVegetables", Category::CannedFood),
    entry("checklist.item.cannedFruits", Category::CannedFood),
    entry("checklist.item.cannedMeatFish", Category::CannedFood),
    entry("checklist.item.cannedSoup", Category::CannedFood),
    entry("checklist.item.rice", Category::DryGoods),
    entry("checklist.item.pasta", Category::DryGoods),
    entry("checklist.item.oatmeal", Category::DryGoods),
    entry("checklist.item.crackers", Category::DryGoods),
    entry("checklist.item.peanutButter", Category::DryGoods),
    entry("checklist.item.driedBeans", Category::DryGoods),
    entry("checklist.item.firstAidKit", Category::FirstAid),
    entry("checklist.item.prescriptionMeds", Category::FirstAid),
    entry("checklist.item.painRelievers", Category::FirstAid),
    entry("checklist.item.bandagesGauze", Category::FirstAid),
    entry("checklist.item.antisepticWipes", Category::FirstAid),
    entry("checklist.item.flashlight", Category::Tools),
    entry("checklist.item.batteries", Category::Tools),
    entry("checklist.item.canOpener", Category::Tools),
    entry("checklist.item.multitool", Category::Tools),
    entry("checklist.item.radio", Category::Tools),
    entry("checklist.item.toiletPaper", Category::Hygiene),
    entry("checklist.item.handSanitizer", Category::Hygiene),
    entry("checklist.item.soap", Category::Hygiene),
    entry("checklist.item.toothbrushPaste", Category::Hygiene),
    entry("checklist.item.importantDocs", Category::Documents),
    entry("checklist.item.cash", Category::Documents),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_unique_and_keyed() {
        let names: HashSet<_> = DEFAULT_CHECKLIST.iter().map(|e| e.name).collect();
        assert_eq!(names.len(), DEFAULT_CHECKLIST.len());
        assert!(names.iter().all(|n| n.starts_with("checklist.item.")));
    }

    #[test]
    fn test_every_category_but_other_is_covered() {
        let covered: HashSet<_> = DEFAULT_CHECKLIST.iter().map(|e| e.category).collect();
        for c in Category::ALL {
            assert_eq!(covered.contains(&c), c != Category::Other, "{c}");
        }
    }
}
