//! Result records produced by a lookup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category tag attached to a [`SearchResult`].
///
/// The controller treats categories as opaque pass-through data. Unknown
/// tags round-trip through [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Bank or card account
    Account,
    /// Payment or transfer
    Transaction,
    /// Person or business
    Customer,
    /// Loan product
    Loan,
    /// Insurance policy
    Insurance,
    /// Investment product
    Investment,
    /// Physical branch
    Branch,
    /// Debit or credit card
    Card,
    /// Caller-defined category
    Other(String),
}

impl Category {
    /// Lowercase tag used in data files and renderers.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Account => "account",
            Self::Transaction => "transaction",
            Self::Customer => "customer",
            Self::Loan => "loan",
            Self::Insurance => "insurance",
            Self::Investment => "investment",
            Self::Branch => "branch",
            Self::Card => "card",
            Self::Other(tag) => tag,
        }
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "account" => Self::Account,
            "transaction" => Self::Transaction,
            "customer" => Self::Customer,
            "loan" => Self::Loan,
            "insurance" => Self::Insurance,
            "investment" => Self::Investment,
            "branch" => Self::Branch,
            "card" => Self::Card,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(category) => category,
            Err(never) => match never {},
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lookup match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchResult {
    /// Stable, unique identity.
    pub id: String,
    /// Display text; becomes the query text when selected.
    pub label: String,
    /// Secondary line shown under the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional category tag.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl SearchResult {
    /// Create a result with only an id and a label.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            category: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}
