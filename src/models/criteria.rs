use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::WILDCARD_LABEL;

// ---------------------------------------------------------------------------
// Selector — Match-everything or exact label match
// ---------------------------------------------------------------------------

/// A region or product filter value.
///
/// Serialized as the bare label; [`Selector::Any`] round-trips through the
/// `"All"` label the dashboard select boxes use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Selector {
    #[default]
    Any,
    Exact(String),
}

impl Selector {
    pub fn exact(value: impl Into<String>) -> Self {
        Selector::Exact(value.into())
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selector::Any => true,
            Selector::Exact(expected) => expected == value,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Selector::Any)
    }

    /// The exact value, or `None` for the wildcard.
    pub fn as_exact(&self) -> Option<&str> {
        match self {
            Selector::Any => None,
            Selector::Exact(v) => Some(v.as_str()),
        }
    }

    pub fn label(&self) -> &str {
        self.as_exact().unwrap_or(WILDCARD_LABEL)
    }
}

impl From<&str> for Selector {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == WILDCARD_LABEL {
            Selector::Any
        } else {
            Selector::Exact(trimmed.to_string())
        }
    }
}

impl From<String> for Selector {
    fn from(value: String) -> Self {
        Selector::from(value.as_str())
    }
}

impl From<Option<&str>> for Selector {
    fn from(value: Option<&str>) -> Self {
        value.map(Selector::from).unwrap_or_default()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Selector::from(raw.as_deref()))
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria — Threshold plus region/product selectors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Minimum sales, inclusive.
    #[serde(default)]
    pub threshold: f64,
    #[serde(default)]
    pub region: Selector,
    #[serde(default)]
    pub product: Selector,
}

impl FilterCriteria {
    pub fn new(threshold: f64, region: impl Into<Selector>, product: impl Into<Selector>) -> Self {
        Self {
            threshold,
            region: region.into(),
            product: product.into(),
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_region(mut self, region: impl Into<Selector>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_product(mut self, product: impl Into<Selector>) -> Self {
        self.product = product.into();
        self
    }
}
