//! Size vocabularies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Apparel sizes, in display order.
pub const APPAREL_SIZES: [&str; 4] = ["S", "M", "L", "XL"];

/// Footwear sizes (EU 36 through 46), in display order.
pub const FOOTWEAR_SIZES: [&str; 11] = [
    "36", "37", "38", "39", "40", "41", "42", "43", "44", "45", "46",
];

/// A size label chosen for a cart line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Size(String);

impl Size {
    pub fn new(size: impl Into<String>) -> Self {
        Self(size.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Size {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_normalizes_case_and_whitespace() {
        assert_eq!(Size::new(" xl ").as_str(), "XL");
        assert_eq!(Size::from("42").as_str(), "42");
    }

    #[test]
    fn test_footwear_range() {
        assert_eq!(FOOTWEAR_SIZES.first(), Some(&"36"));
        assert_eq!(FOOTWEAR_SIZES.last(), Some(&"46"));
    }
}
