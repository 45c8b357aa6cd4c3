//! Instance names with optional element indices
//!
//! Provides [`InstanceName`], the single-level name of a component instance:
//! a basename plus an optional array element index rendered as `base[index]`.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Single-level name of a component instance
///
/// A basename such as `u_fifo`, optionally carrying the element index the
/// instance occupies within a component array. Indexed names render with a
/// bracketed suffix: `u_fifo[3]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceName {
    base: String,
    index: Option<u32>,
}

impl InstanceName {
    /// Create an unindexed name
    #[inline]
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            index: None,
        }
    }

    /// Create a name carrying an array element index
    #[inline]
    #[must_use]
    pub fn indexed(base: impl Into<String>, index: u32) -> Self {
        Self {
            base: base.into(),
            index: Some(index),
        }
    }

    /// Get the basename without any index suffix
    #[inline]
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Get the array element index, if any
    #[inline]
    #[must_use]
    pub fn index(&self) -> Option<u32> {
        self.index
    }

    /// Check whether this name carries an array element index
    #[inline]
    #[must_use]
    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }
}

impl Display for InstanceName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}[{}]", self.base, i),
            None => write!(f, "{}", self.base),
        }
    }
}

impl FromStr for InstanceName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(NameError::EmptySegment);
        }

        let (base, index) = match s.find('[') {
            Some(open) => {
                let Some(digits) = s[open + 1..].strip_suffix(']') else {
                    return Err(NameError::MalformedIndex(s.to_string()));
                };
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(NameError::MalformedIndex(s.to_string()));
                }
                let index = digits
                    .parse::<u32>()
                    .map_err(|_| NameError::MalformedIndex(s.to_string()))?;
                (&s[..open], Some(index))
            }
            None => (s, None),
        };

        if base.is_empty() {
            return Err(NameError::EmptySegment);
        }
        if base.contains(|c: char| !c.is_ascii_alphanumeric() && c != '_') {
            return Err(NameError::InvalidSegment(base.to_string()));
        }

        Ok(Self {
            base: base.to_string(),
            index,
        })
    }
}

/// Errors related to instance names and paths
#[derive(Debug, thiserror::Error)]
pub enum NameError {
    /// Empty name or path segment
    #[error("name contains empty segment")]
    EmptySegment,

    /// Invalid basename characters
    #[error("invalid name segment: {0} (must be ASCII alphanumeric or underscore)")]
    InvalidSegment(String),

    /// Bracketed suffix that is not a valid element index
    #[error("malformed index suffix: {0}")]
    MalformedIndex(String),
}
