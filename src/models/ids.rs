//! Strongly-typed ID wrappers
//!
//! Book identifiers are assigned by the SQLite store, so the wrapper holds the
//! integer row id rather than a generated value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a book in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    /// Wrap a raw row id
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the underlying row id
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for BookId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for BookId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let id = BookId::new(7);
        assert_eq!(id.to_string(), "7");
        assert_eq!("7".parse::<BookId>().unwrap(), id);
        assert_eq!(" 7 ".parse::<BookId>().unwrap(), id);
        assert!("#7".parse::<BookId>().is_err());
        assert!("seven".parse::<BookId>().is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(BookId::new(1) < BookId::new(2));
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&BookId::new(3)).unwrap();
        assert_eq!(json, "3");
    }
}
