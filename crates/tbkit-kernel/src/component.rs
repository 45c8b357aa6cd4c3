//! Component payload contract
//!
//! Anything stored in a [`Slot`](crate::Slot) implements [`Component`]. The
//! trait carries the two compile-time facts the construction protocol needs
//! about a payload type: the basename used when the owner never assigns one,
//! and whether the type offers a no-argument form for the fallback cascade.

/// Payload contract for slot-managed components.
///
/// # Contract
///
/// - [`DEFAULT_NAME`](Self::DEFAULT_NAME) is the basename given to instances
///   constructed without an explicit name. It need not be unique across
///   types or siblings.
/// - [`default_construct`](Self::default_construct) is the no-argument form
///   used when a declared child reaches the end of its parent's construction
///   scope unbuilt. A given type must either always return `Some` or always
///   return `None`; a `None` implementation must not create slots or touch
///   construction state, since the probe runs inside an open construction
///   scope.
///
/// Constructors run while the owning slot's construction scope is open, so
/// any slots the payload creates (its member components) attach to the
/// instance being built.
///
/// # Example
///
/// ```rust
/// use tbkit_kernel::Component;
///
/// struct Monitor {
///     samples: Vec<u32>,
/// }
///
/// impl Component for Monitor {
///     const DEFAULT_NAME: &'static str = "u_monitor";
///
///     fn default_construct() -> Option<Self> {
///         Some(Self {
///             samples: Vec::new(),
///         })
///     }
/// }
/// ```
pub trait Component: Sized + 'static {
    /// Basename used when the owner never assigns one
    const DEFAULT_NAME: &'static str = "u_component";

    /// Build the no-argument form of this payload, if it has one.
    ///
    /// The provided implementation returns `None`, marking the type as
    /// requiring explicit construction: leaving such a slot unbuilt when its
    /// parent's scope ends is a fatal configuration error.
    fn default_construct() -> Option<Self> {
        None
    }
}
