//! Construction protocol violations
//!
//! Every violation is a programmer or configuration error in the tree being
//! built, not a runtime condition a caller could recover from. The build
//! phase runs once at startup, so each violation is reported with the full
//! hierarchical path of the offending instance and aborts the run.

use tbkit_naming::InstancePath;

/// Fatal violations of the construction protocol
#[derive(Debug, thiserror::Error)]
pub enum ConstructionError {
    /// Payload construction attempted on an already-initialized slot
    #[error("{path} is constructed twice")]
    DoubleConstruct {
        /// Hierarchical path of the offending slot
        path: InstancePath,
    },

    /// A child reached the end of its parent's construction scope without an
    /// explicit construction call and its payload has no no-argument form
    #[error("{path} was never explicitly constructed and cannot be default constructed")]
    NotDefaultConstructible {
        /// Hierarchical path of the offending slot
        path: InstancePath,
    },

    /// Renaming attempted after construction completed
    #[error("{path} cannot be renamed after construction completed")]
    RenamedAfterConstruction {
        /// Hierarchical path of the offending slot
        path: InstancePath,
    },

    /// Payload access attempted before construction
    #[error("{path} payload accessed before construction")]
    AccessBeforeConstruction {
        /// Hierarchical path of the offending slot
        path: InstancePath,
    },
}

impl ConstructionError {
    /// Hierarchical path of the offending instance
    #[must_use]
    pub fn path(&self) -> &InstancePath {
        match self {
            Self::DoubleConstruct { path }
            | Self::NotDefaultConstructible { path }
            | Self::RenamedAfterConstruction { path }
            | Self::AccessBeforeConstruction { path } => path,
        }
    }

    /// Log the violation and abort the construction run.
    ///
    /// Release builds abort the process outright (`panic = "abort"`).
    pub(crate) fn fatal(self) -> ! {
        tracing::error!("{self}");
        panic!("{self}");
    }
}
