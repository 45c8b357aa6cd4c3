//! Build sessions and the construction-context protocol
//!
//! A [`BuildSession`] holds the state one construction run mutates: the
//! build stack of instances currently mid-construction, and the append-only
//! registry of every instance that ever entered construction. Slots resolve
//! the session they operate on through a thread-local current-session stack.
//! A per-thread ambient session backs slots built without any explicit
//! session, so construction always has somewhere to register.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tbkit_naming::InstancePath;

use crate::node::Node;

#[derive(Default)]
struct SessionState {
    stack: Vec<Node>,
    registry: Vec<Node>,
}

/// One construction run: a build stack plus an instance registry.
///
/// Cloning is cheap and yields a handle to the same run. Sessions are
/// single-threaded; handles do not cross threads.
#[derive(Clone, Default)]
pub struct BuildSession {
    state: Rc<RefCell<SessionState>>,
}

thread_local! {
    static ACTIVE: RefCell<Vec<BuildSession>> = RefCell::new(Vec::new());
    static AMBIENT: BuildSession = BuildSession::new();
}

impl BuildSession {
    /// Create an empty session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make this session current for the enclosing scope.
    ///
    /// Slots created or constructed while the returned guard is alive
    /// register with this session. Guards nest; each restores the previously
    /// current session when dropped.
    #[must_use = "the session is only current while the returned scope guard is alive"]
    pub fn enter(&self) -> SessionScope {
        ACTIVE.with(|stack| stack.borrow_mut().push(self.clone()));
        SessionScope {
            session: self.clone(),
        }
    }

    /// Number of instances that have entered construction in this session
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.state.borrow().registry.len()
    }

    /// Hierarchical paths of every registered instance, in construction order
    #[must_use]
    pub fn instance_paths(&self) -> Vec<InstancePath> {
        self.state
            .borrow()
            .registry
            .iter()
            .map(Node::hierarchical_path)
            .collect()
    }

    /// Render the constructed hierarchy as an indented tree, one instance
    /// per line
    #[must_use]
    pub fn render_tree(&self) -> String {
        let roots: Vec<Node> = self
            .state
            .borrow()
            .registry
            .iter()
            .filter(|node| node.parent().is_none())
            .cloned()
            .collect();

        let mut out = String::new();
        for root in &roots {
            render_subtree(root, 0, &mut out);
        }
        out
    }

    /// Path of the instance innermost under construction on this thread,
    /// if any
    #[must_use]
    pub fn current_path() -> Option<InstancePath> {
        let session = Self::current();
        let top = session.state.borrow().stack.last().cloned();
        top.map(|node| node.hierarchical_path())
    }

    /// Session the construction protocol targets on this thread: the
    /// innermost entered session, or the thread's ambient one.
    fn current() -> Self {
        let entered = ACTIVE.with(|stack| stack.borrow().last().cloned());
        entered.unwrap_or_else(|| AMBIENT.with(Self::clone))
    }

    /// Register `node` and open its construction scope.
    pub(crate) fn enter_construction(node: &Node) {
        let session = Self::current();
        let mut state = session.state.borrow_mut();
        state.registry.push(node.clone());
        state.stack.push(node.clone());
    }

    /// Whether `node` has an open construction scope in the current session
    pub(crate) fn in_construction(node: &Node) -> bool {
        let session = Self::current();
        let state = session.state.borrow();
        state.stack.iter().any(|open| open.ptr_eq(node))
    }

    /// Close the scope of `node`: default-construct its unbuilt children in
    /// declaration order, then pop the build stack.
    pub(crate) fn leave_construction(node: &Node) {
        let session = Self::current();
        debug_assert!(
            session
                .state
                .borrow()
                .stack
                .last()
                .is_some_and(|top| top.ptr_eq(node)),
            "construction scopes must nest"
        );

        // Hooks run while this node is still the open scope, so anything a
        // default constructor creates attaches underneath it.
        for child in node.children() {
            if let Some(hook) = child.take_fallback() {
                tracing::trace!(
                    child = %child.hierarchical_path(),
                    "default constructing unbuilt child"
                );
                hook();
            }
        }

        let _ = session.state.borrow_mut().stack.pop();
    }

    /// Attach `child` beneath the instance currently under construction.
    /// With no open scope the child stays a root.
    pub(crate) fn append_child(child: &Node) {
        let session = Self::current();
        let parent = session.state.borrow().stack.last().cloned();
        if let Some(parent) = parent {
            child.set_parent(&parent);
            parent.add_child(child);
            tracing::trace!(
                parent = %parent.hierarchical_path(),
                child = %child.name(),
                "appended child"
            );
        }
    }
}

impl fmt::Debug for BuildSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("BuildSession")
            .field("instances", &state.registry.len())
            .field("open_scopes", &state.stack.len())
            .finish()
    }
}

fn render_subtree(node: &Node, depth: usize, out: &mut String) {
    use std::fmt::Write;

    let _ = writeln!(out, "{:width$}{}", "", node.name(), width = depth * 2);
    for child in node.children() {
        render_subtree(&child, depth + 1, out);
    }
}

/// Guard keeping a session current; restores the previous one on drop
pub struct SessionScope {
    session: BuildSession,
}

impl Drop for SessionScope {
    fn drop(&mut self) {
        ACTIVE.with(|stack| {
            let mut stack = stack.borrow_mut();
            debug_assert!(
                stack
                    .last()
                    .is_some_and(|s| Rc::ptr_eq(&s.state, &self.session.state)),
                "session scopes must unwind in reverse entry order"
            );
            let _ = stack.pop();
        });
    }
}
