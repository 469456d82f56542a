//! Expense categories
//!
//! The category set is closed. Each category has a display label (which is
//! also its persisted form) and a lowercase badge tag used by front ends.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five fixed expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Utilities,
    Transport,
    Entertainment,
    Other,
}

impl Category {
    /// All categories in canonical display order
    pub fn all() -> &'static [Self] {
        &[
            Self::Food,
            Self::Utilities,
            Self::Transport,
            Self::Entertainment,
            Self::Other,
        ]
    }

    /// Display label, e.g. "Food"
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Utilities => "Utilities",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::Other => "Other",
        }
    }

    /// Lowercase badge tag, e.g. "food"
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Utilities => "utilities",
            Self::Transport => "transport",
            Self::Entertainment => "entertainment",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Error returned when a string names no category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown category '{}' (expected one of: Food, Utilities, Transport, Entertainment, Other)",
            self.0
        )
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Matches either the label or the badge, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownCategory(needle.to_string()))
    }
}
