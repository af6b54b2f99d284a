use super::request::DimensionFragment;
use core::fmt::{self, Display, Formatter};
use core::hash::{Hash, Hasher};

/// Wire name of the time dimension used when a report declares no dimensions.
pub const DATE_DIMENSION: &str = "ga:date";

/// A field to group report rows by.
///
/// Two descriptors are equal when they name the same wire field, whatever
/// their aliases.
#[derive(Debug, Clone, Eq)]
pub struct Dimension {
    name: String,
    alias: Option<String>,
    histogram_buckets: Vec<i64>,
}

impl Dimension {
    pub fn new(name: impl Into<String>, alias: impl Into<String>) -> Self {
        let alias = alias.into();

        Self {
            name: name.into(),
            alias: (!alias.is_empty()).then_some(alias),
            histogram_buckets: Vec::new(),
        }
    }

    /// The implicit time dimension.
    #[must_use]
    pub fn date() -> Self {
        Self::new(DATE_DIMENSION, "Date")
    }

    /// Bucket a numeric dimension at the given boundaries.
    ///
    /// Boundaries must be strictly ascending; the request builder rejects them otherwise.
    #[must_use]
    pub fn with_histogram_buckets(self, buckets: impl IntoIterator<Item = i64>) -> Self {
        Self {
            histogram_buckets: buckets.into_iter().collect(),
            ..self
        }
    }

    #[must_use]
    pub fn with_alias(self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        Self {
            alias: (!alias.is_empty()).then_some(alias),
            ..self
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The name this dimension's key component carries in a report.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn histogram_buckets(&self) -> &[i64] {
        &self.histogram_buckets
    }

    /// The wire fragment placed in a request's dimension list.
    #[must_use]
    pub fn request_fragment(&self) -> DimensionFragment {
        DimensionFragment {
            name: self.name.clone(),
            histogram_buckets: self.histogram_buckets.iter().map(ToString::to_string).collect(),
        }
    }
}

impl PartialEq for Dimension {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Hash for Dimension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
