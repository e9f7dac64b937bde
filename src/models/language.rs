//! Supported display languages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Language code sent to the backend as `target_lang`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LanguageCode {
    #[default]
    Ko,
    En,
    Ja,
    Zh,
    Ru,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 5] = [Self::Ko, Self::En, Self::Ja, Self::Zh, Self::Ru];

    /// Upper-case wire code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ko => "KO",
            Self::En => "EN",
            Self::Ja => "JA",
            Self::Zh => "ZH",
            Self::Ru => "RU",
        }
    }

    /// Parse a code case-insensitively.
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KO" => Some(Self::Ko),
            "EN" => Some(Self::En),
            "JA" => Some(Self::Ja),
            "ZH" => Some(Self::Zh),
            "RU" => Some(Self::Ru),
            _ => None,
        }
    }

    /// Parse a code, falling back to Korean when absent or unrecognized.
    pub fn from_code_or_default(s: Option<&str>) -> Self {
        s.and_then(Self::from_code).unwrap_or_default()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
