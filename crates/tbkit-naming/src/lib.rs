//! tbkit Naming
//!
//! Instance names and hierarchical paths for testbench components.
//!
//! # Core Concepts
//!
//! - [`InstanceName`]: single-level basename with an optional array index
//! - [`InstancePath`]: root-first, dot-joined sequence of names
//! - [`NameError`]: parse and validation failures
//!
//! # Example
//!
//! ```rust
//! use tbkit_naming::InstancePath;
//!
//! let path: InstancePath = "top.u_dut.u_fifo[2]".parse().unwrap();
//! assert_eq!(path.len(), 3);
//! assert_eq!(path.parent().unwrap().to_string(), "top.u_dut");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod name;
mod path;

pub use name::{InstanceName, NameError};
pub use path::InstancePath;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
