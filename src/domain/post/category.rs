//! Clothing categories a post can be tagged with.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The six clothing categories. Wire values are UPPERCASE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PostCategory {
    Outfit,
    Hoodie,
    Shirt,
    Pants,
    Shoes,
    Watch,
}

impl PostCategory {
    /// All categories, in display order.
    pub const ALL: [PostCategory; 6] = [
        PostCategory::Outfit,
        PostCategory::Hoodie,
        PostCategory::Shirt,
        PostCategory::Pants,
        PostCategory::Shoes,
        PostCategory::Watch,
    ];

    /// Canonical string form (matches the wire and database value).
    pub fn as_str(&self) -> &'static str {
        match self {
            PostCategory::Outfit => "OUTFIT",
            PostCategory::Hoodie => "HOODIE",
            PostCategory::Shirt => "SHIRT",
            PostCategory::Pants => "PANTS",
            PostCategory::Shoes => "SHOES",
            PostCategory::Watch => "WATCH",
        }
    }

    /// The users-table column holding this category's denormalized count.
    ///
    /// All counter adjustments go through this single mapping so a category
    /// can never touch another category's column.
    pub fn count_column(&self) -> &'static str {
        match self {
            PostCategory::Outfit => "outfit_post_count",
            PostCategory::Hoodie => "hoodie_post_count",
            PostCategory::Shirt => "shirt_post_count",
            PostCategory::Pants => "pants_post_count",
            PostCategory::Shoes => "shoes_post_count",
            PostCategory::Watch => "watch_post_count",
        }
    }
}

impl fmt::Display for PostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PostCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OUTFIT" => Ok(PostCategory::Outfit),
            "HOODIE" => Ok(PostCategory::Hoodie),
            "SHIRT" => Ok(PostCategory::Shirt),
            "PANTS" => Ok(PostCategory::Pants),
            "SHOES" => Ok(PostCategory::Shoes),
            "WATCH" => Ok(PostCategory::Watch),
            other => Err(ValidationError::invalid_format(
                "category",
                format!("unknown category '{}'", other),
            )),
        }
    }
}
