//! # Display Locale
//!
//! Dates in audit text are shown in the actor's locale. The locale only
//! affects display; comparisons always use the parsed calendar date.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use cmx_core::parse_calendar_date;

/// Locale used to render dates in audit text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayLocale {
    /// `31.03.2026`
    #[default]
    De,
    /// `03/31/2026`
    En,
}

impl DisplayLocale {
    fn pattern(&self) -> &'static str {
        match self {
            Self::De => "%d.%m.%Y",
            Self::En => "%m/%d/%Y",
        }
    }

    /// Format a stored date value. Values that do not parse as a calendar
    /// date are returned unchanged.
    pub fn format_date(&self, raw: &str) -> String {
        match parse_calendar_date(raw) {
            Some(date) => date.format(self.pattern()).to_string(),
            None => raw.to_string(),
        }
    }

    /// The configuration value for this locale.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::De => "de",
            Self::En => "en",
        }
    }
}

impl FromStr for DisplayLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "de" | "de-de" => Ok(Self::De),
            "en" | "en-us" => Ok(Self::En),
            other => Err(format!("unsupported locale {other:?}, expected \"de\" or \"en\"")),
        }
    }
}
