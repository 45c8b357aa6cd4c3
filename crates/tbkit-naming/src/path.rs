//! Hierarchical instance paths
//!
//! Provides [`InstancePath`] for addressing component instances within a
//! constructed hierarchy.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::name::{InstanceName, NameError};

/// Path of a component instance within a hierarchy
///
/// Root-first sequence of [`InstanceName`] segments, rendered dot-joined.
///
/// # Examples
/// - `[top, u_dut, u_fifo]` → `top.u_dut.u_fifo`
/// - `[top, u_lane[2], u_mon]` → `top.u_lane[2].u_mon`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstancePath(Vec<InstanceName>);

impl InstancePath {
    /// Create new path from segments
    #[inline]
    #[must_use]
    pub fn new(segments: Vec<InstanceName>) -> Self {
        Self(segments)
    }

    /// Create path from a single segment
    #[inline]
    #[must_use]
    pub fn single(name: InstanceName) -> Self {
        Self(vec![name])
    }

    /// Empty path (no segments)
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Get path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[InstanceName] {
        &self.0
    }

    /// Get number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if path is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get parent path (if not empty)
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Get last segment (if not empty)
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&InstanceName> {
        self.0.last()
    }

    /// Append a segment, returning new path
    #[inline]
    #[must_use]
    pub fn child(&self, name: InstanceName) -> Self {
        let mut new = self.clone();
        new.0.push(name);
        new
    }

    /// Check if this path is a prefix of another
    ///
    /// # Examples
    /// - `top.u_dut` is prefix of `top.u_dut.u_fifo`
    /// - `top.u_dut` is NOT prefix of `top.u_mon`
    #[inline]
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        if self.0.len() > other.0.len() {
            return false;
        }
        self.0 == other.0[..self.0.len()]
    }

    /// Check if this path is an ancestor of another (strict prefix)
    #[inline]
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        self.0.len() < other.0.len() && self.is_prefix_of(other)
    }

    /// Iterator over segments from root to leaf
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &InstanceName> {
        self.0.iter()
    }

    /// Join segments with custom separator
    #[inline]
    #[must_use]
    pub fn join(&self, separator: &str) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl Display for InstancePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for InstancePath {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::root());
        }

        let segments: Vec<InstanceName> = s
            .split('.')
            .map(InstanceName::from_str)
            .collect::<Result<_, _>>()?;

        Ok(Self(segments))
    }
}

impl From<Vec<InstanceName>> for InstancePath {
    fn from(segments: Vec<InstanceName>) -> Self {
        Self(segments)
    }
}

impl From<InstanceName> for InstancePath {
    fn from(name: InstanceName) -> Self {
        Self::single(name)
    }
}

impl Default for InstancePath {
    fn default() -> Self {
        Self::root()
    }
}
