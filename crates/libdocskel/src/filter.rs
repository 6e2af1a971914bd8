use regex::Regex;

use crate::error::Result;

/// Restricts which discovered types get extracted.
///
/// Every discovered name is still registered for name resolution; the filter only decides which
/// names receive a stub and a page read.
#[derive(Debug, Clone, Default)]
pub enum Filter {
    /// No filtering applied. Every discovered type is extracted.
    #[default]
    None,

    /// Extract only types whose canonical name matches the pattern.
    Pattern(Regex),
}

impl Filter {
    /// Build a filter from an optional regular expression.
    pub fn new(pattern: Option<&str>) -> Result<Self> {
        match pattern {
            None => Ok(Self::None),
            Some(p) if p.trim().is_empty() => Ok(Self::None),
            Some(p) => Ok(Self::Pattern(Regex::new(p)?)),
        }
    }

    /// Whether the type `name` should be extracted.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::None => true,
            Self::Pattern(re) => re.is_match(name),
        }
    }

    /// Whether the filter excludes anything at all.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pattern(_))
    }

    /// The pattern text, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Pattern(re) => Some(re.as_str()),
        }
    }
}
