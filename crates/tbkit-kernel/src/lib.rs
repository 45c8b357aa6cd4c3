//! tbkit Kernel
//!
//! Hierarchical component construction for testbenches: typed slots declare
//! a tree of components as members of each other, payload construction is
//! deferred until an explicit trigger, parent/child links and hierarchical
//! names are inferred from declaration order, and any child left unbuilt
//! when its parent's construction scope ends is default constructed, in
//! declaration order.
//!
//! # Core Concepts
//!
//! - [`Component`]: payload contract (default basename, no-argument form)
//! - [`Slot<T>`]: deferred-construction container for one instance
//! - [`SlotArray<T>`]: indexed family of sibling slots
//! - [`BuildSession`]: one construction run (build stack plus registry)
//! - [`ConstructionError`]: the fatal protocol violations
//!
//! # Quick Start
//!
//! ```rust
//! use tbkit_kernel::{BuildSession, Component, Slot};
//!
//! struct Counter {
//!     count: u64,
//! }
//!
//! impl Component for Counter {
//!     const DEFAULT_NAME: &'static str = "u_counter";
//!
//!     fn default_construct() -> Option<Self> {
//!         Some(Self { count: 0 })
//!     }
//! }
//!
//! let session = BuildSession::new();
//! let _scope = session.enter();
//!
//! let slot = Slot::<Counter>::new();
//! slot.named_construct("u_events", || Counter { count: 42 });
//!
//! assert_eq!(slot.get().count, 42);
//! assert_eq!(slot.hierarchical_path().to_string(), "u_events");
//! assert_eq!(session.instance_count(), 1);
//! ```
//!
//! Construction is single threaded: sessions, slots, and the thread-local
//! current-session stack never cross threads.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod array;
pub mod component;
pub mod error;
pub mod logging;
pub mod session;
pub mod slot;

mod node;

// Re-exports
pub use array::SlotArray;
pub use component::Component;
pub use error::ConstructionError;
pub use session::{BuildSession, SessionScope};
pub use slot::Slot;

pub use tbkit_naming::{InstanceName, InstancePath, NameError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
