//! Principal (record owner) identity
//!
//! A principal is identified only by an email string supplied from outside
//! the core. No authentication happens here.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Build a principal from an email, trimming whitespace
    ///
    /// Returns `None` for an empty string, which stands for "no user".
    pub fn parse(email: &str) -> Option<Self> {
        let email = email.trim();
        if email.is_empty() {
            None
        } else {
            Some(Self(email.to_string()))
        }
    }

    pub fn email(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
