//! Schema variant selection.

use serde::{Deserialize, Serialize};

/// Which of the two fixture schemas to build.
///
/// `Basic` keys users by a surrogate autoincrement id. `Full` keys users by
/// the natural (name, surname) pair and adds the history table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Basic,
    Full,
}

impl Variant {
    /// Parse a string into a Variant.
    pub fn parse(s: &str) -> crate::Result<Self> {
        match s {
            "basic" => Ok(Variant::Basic),
            "full" => Ok(Variant::Full),
            _ => Err(crate::error::Error::UnknownVariant(s.to_string())),
        }
    }

    /// Convert to string for display and flag round-tripping.
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Basic => "basic",
            Variant::Full => "full",
        }
    }

    /// How this variant identifies a user row, for error messages.
    pub fn user_key_desc(&self) -> &'static str {
        match self {
            Variant::Basic => "a single integer id",
            Variant::Full => "a name and a surname",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
