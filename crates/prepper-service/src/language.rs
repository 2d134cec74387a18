//! User-facing language selection for e-mails and AI output.

use serde::{Deserialize, Serialize};

/// Languages the product ships texts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Danish.
    Da,
    /// English.
    #[default]
    En,
}

impl Language {
    /// Language for a client-supplied code; anything but Danish is English.
    pub fn from_code(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("da") {
            Self::Da
        } else {
            Self::En
        }
    }

    /// Product name as written in this language.
    pub fn app_name(&self) -> &'static str {
        match self {
            Self::Da => "Prepperhjælper",
            Self::En => "Prepper Helper",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_english() {
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn test_unknown_codes_fall_back_to_english() {
        assert_eq!(Language::from_code("DA"), Language::Da);
        assert_eq!(Language::from_code("de"), Language::En);
        assert_eq!(Language::from_code(""), Language::En);
    }

    #[test]
    fn test_deserializes_lowercase_codes() {
        let lang: Language = serde_json::from_str("\"da\"").unwrap();
        assert_eq!(lang, Language::Da);
        assert_eq!(lang.app_name(), "Prepperhjælper");
    }
}
