//! Typed slots: deferred, tree-registered payload construction
//!
//! A [`Slot<T>`] reserves space for exactly one `T`. Creating the slot
//! registers it as a child of whatever instance is currently under
//! construction; the payload itself is built later, either explicitly via
//! [`Slot::named_construct`] / [`Slot::construct`] or automatically when the
//! parent's construction scope ends.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use tbkit_naming::{InstanceName, InstancePath};

use crate::component::Component;
use crate::error::ConstructionError;
use crate::node::Node;
use crate::session::BuildSession;

/// Deferred-construction container for one component instance.
///
/// A slot passes through `declared → registered → initialized`: creating it
/// attaches it to the enclosing instance under construction, and exactly one
/// construction call (explicit, or cascade-driven at the parent's scope
/// exit) builds the payload. The payload drops with the slot.
///
/// Slots are single-threaded and move freely; registered tree links follow
/// the slot because they point at shared state, not at its address.
///
/// # Example
///
/// ```rust
/// use tbkit_kernel::{BuildSession, Component, Slot};
///
/// struct Fifo {
///     depth: u32,
/// }
///
/// impl Component for Fifo {
///     const DEFAULT_NAME: &'static str = "u_fifo";
///
///     fn default_construct() -> Option<Self> {
///         Some(Self { depth: 16 })
///     }
/// }
///
/// struct Dut {
///     u_ingress: Slot<Fifo>,
///     u_egress: Slot<Fifo>,
/// }
///
/// impl Component for Dut {
///     const DEFAULT_NAME: &'static str = "u_dut";
/// }
///
/// let session = BuildSession::new();
/// let _scope = session.enter();
///
/// let dut = Slot::<Dut>::new();
/// dut.named_construct("dut", || Dut {
///     u_ingress: Slot::new(),
///     u_egress: Slot::new(),
/// });
///
/// // Both fifos were default constructed when `dut` finished building.
/// assert!(dut.get().u_ingress.is_initialized());
/// assert_eq!(dut.get().u_ingress.get().depth, 16);
/// assert_eq!(
///     dut.get().u_egress.hierarchical_path().to_string(),
///     "dut.u_fifo"
/// );
/// assert_eq!(session.instance_count(), 3);
/// ```
pub struct Slot<T: Component> {
    node: Node,
    cell: Rc<RefCell<Option<T>>>,
}

impl<T: Component> Slot<T> {
    /// Declare a slot and register it beneath the instance currently under
    /// construction. With no construction in progress the slot is a root.
    #[must_use]
    pub fn new() -> Self {
        let node = Node::new(T::DEFAULT_NAME);
        let cell = Rc::new(RefCell::new(None));

        // The cascade hook keeps only weak handles: the node stores the hook,
        // so a strong capture would leak the whole subtree.
        let hook: Box<dyn FnOnce()> = {
            let node = node.downgrade();
            let cell = Rc::downgrade(&cell);
            Box::new(move || {
                let Some(node) = node.upgrade() else {
                    return;
                };
                // Slot dropped before the cascade reached it: nothing to
                // build, and the orphaned record leaves the tree with it.
                let Some(cell) = cell.upgrade() else {
                    if let Some(parent) = node.parent() {
                        parent.remove_child(&node);
                    }
                    return;
                };
                construct_in_place(&node, &cell, T::DEFAULT_NAME, || {
                    T::default_construct().unwrap_or_else(|| {
                        ConstructionError::NotDefaultConstructible {
                            path: node.hierarchical_path(),
                        }
                        .fatal()
                    })
                });
            })
        };
        node.set_fallback(hook);

        BuildSession::append_child(&node);
        Self { node, cell }
    }

    /// Construct the payload with an explicit basename.
    ///
    /// Opens this slot's construction scope, runs `init` inside it (so slots
    /// the payload creates attach here), then default-constructs any of this
    /// slot's own children left unbuilt, in declaration order. Fatal if the
    /// slot is already initialized or still mid-construction.
    pub fn named_construct(&self, base_name: impl Into<String>, init: impl FnOnce() -> T) {
        let base_name = base_name.into();
        construct_in_place(&self.node, &self.cell, &base_name, init);
    }

    /// Construct the payload under the type's default basename.
    ///
    /// Equivalent to [`named_construct`](Self::named_construct) with
    /// [`T::DEFAULT_NAME`](Component::DEFAULT_NAME); the fallback cascade
    /// uses this form.
    pub fn construct(&self, init: impl FnOnce() -> T) {
        construct_in_place(&self.node, &self.cell, T::DEFAULT_NAME, init);
    }

    /// Assign the basename. Fatal once construction has completed.
    pub fn set_base_name(&self, name: impl Into<String>) {
        if self.node.is_initialized() {
            ConstructionError::RenamedAfterConstruction {
                path: self.node.hierarchical_path(),
            }
            .fatal();
        }
        self.node.set_base_name(&name.into());
    }

    /// Current basename, without any index suffix
    #[must_use]
    pub fn base_name(&self) -> String {
        self.node.base_name()
    }

    /// Single-level name, including the element index when part of an array
    #[must_use]
    pub fn name(&self) -> InstanceName {
        self.node.name()
    }

    /// Dot-joined names from the root down to this slot
    #[must_use]
    pub fn hierarchical_path(&self) -> InstancePath {
        self.node.hierarchical_path()
    }

    /// Whether the payload has been constructed
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.node.is_initialized()
    }

    /// Shared access to the payload.
    ///
    /// # Panics
    ///
    /// Fatal if the payload is not yet constructed, and panics if it is
    /// currently borrowed mutably.
    #[must_use]
    pub fn get(&self) -> Ref<'_, T> {
        match Ref::filter_map(self.cell.borrow(), Option::as_ref) {
            Ok(payload) => payload,
            Err(_) => ConstructionError::AccessBeforeConstruction {
                path: self.node.hierarchical_path(),
            }
            .fatal(),
        }
    }

    /// Exclusive access to the payload.
    ///
    /// # Panics
    ///
    /// Fatal if the payload is not yet constructed, and panics if it is
    /// currently borrowed.
    #[must_use]
    pub fn get_mut(&self) -> RefMut<'_, T> {
        match RefMut::filter_map(self.cell.borrow_mut(), Option::as_mut) {
            Ok(payload) => payload,
            Err(_) => ConstructionError::AccessBeforeConstruction {
                path: self.node.hierarchical_path(),
            }
            .fatal(),
        }
    }

    pub(crate) fn assign_index(&self, index: u32) {
        self.node.set_index(index);
    }
}

impl<T: Component> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("path", &self.hierarchical_path().to_string())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

/// Shared construct sequence: double-construct guard, scope entry, basename
/// assignment, payload build, scope exit with the child cascade.
fn construct_in_place<T: Component>(
    node: &Node,
    cell: &Rc<RefCell<Option<T>>>,
    base_name: &str,
    init: impl FnOnce() -> T,
) {
    if node.is_initialized() || BuildSession::in_construction(node) {
        ConstructionError::DoubleConstruct {
            path: node.hierarchical_path(),
        }
        .fatal();
    }

    BuildSession::enter_construction(node);
    node.set_base_name(base_name);
    tracing::trace!(path = %node.hierarchical_path(), "constructing");

    let value = init();
    *cell.borrow_mut() = Some(value);
    node.mark_initialized();

    BuildSession::leave_construction(node);
}
