//! Closed set of supply categories shared by items and checklist entries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supply category.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "item_category", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Water,
    CannedFood,
    DryGoods,
    FirstAid,
    Tools,
    Hygiene,
    Documents,
    #[default]
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 8] = [
        Self::Water,
        Self::CannedFood,
        Self::DryGoods,
        Self::FirstAid,
        Self::Tools,
        Self::Hygiene,
        Self::Documents,
        Self::Other,
    ];

    /// Return the category as its wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Water => "WATER",
            Self::CannedFood => "CANNED_FOOD",
            Self::DryGoods => "DRY_GOODS",
            Self::FirstAid => "FIRST_AID",
            Self::Tools => "TOOLS",
            Self::Hygiene => "HYGIENE",
            Self::Documents => "DOCUMENTS",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = prepper_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == upper)
            .ok_or_else(|| prepper_core::AppError::validation(format!("Invalid category: '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_wire_names() {
        assert_eq!("CANNED_FOOD".parse::<Category>().unwrap(), Category::CannedFood);
        assert_eq!("first_aid".parse::<Category>().unwrap(), Category::FirstAid);
        assert!("SNACKS".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_round_names() {
        assert_eq!(serde_json::to_string(&Category::DryGoods).unwrap(), "\"DRY_GOODS\"");
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
        }
    }
}
