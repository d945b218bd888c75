//! Product categories.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::validation::FieldError;

/// The fixed set of catalog categories.
///
/// Values are serialized exactly as stored and shown to shoppers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Leather goods.
    #[serde(rename = "皮件")]
    LeatherGoods,
    /// Shoes.
    #[serde(rename = "鞋")]
    Shoes,
    /// Tops.
    #[serde(rename = "上衣")]
    Tops,
    /// Accessories.
    #[serde(rename = "飾品")]
    Accessories,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 4] = [
        Self::LeatherGoods,
        Self::Shoes,
        Self::Tops,
        Self::Accessories,
    ];

    /// The stored label for this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeatherGoods => "皮件",
            Self::Shoes => "鞋",
            Self::Tops => "上衣",
            Self::Accessories => "飾品",
        }
    }

    /// Look up a category by its stored label.
    #[must_use]
    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// Validate a category label supplied by a caller.
    ///
    /// # Errors
    ///
    /// Returns a `category` [`FieldError`] naming the unknown value.
    pub fn parse_field(s: &str) -> Result<Self, FieldError> {
        Self::from_label(s)
            .ok_or_else(|| FieldError::new("category", format!("category {s} not found")))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_field(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_unknown_label() {
        let err = Category::parse_field("帽子").unwrap_err();
        assert_eq!(err.field, "category");
        assert_eq!(err.message, "category 帽子 not found");
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&Category::Shoes).unwrap();
        assert_eq!(json, "\"鞋\"");
        let parsed: Category = serde_json::from_str("\"飾品\"").unwrap();
        assert_eq!(parsed, Category::Accessories);
    }
}
