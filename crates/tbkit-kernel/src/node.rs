//! Per-instance identity records
//!
//! Every slot owns one [`Node`]: the basename, array index, tree links, and
//! construction state shared between the slot itself, its parent's children
//! list, and the session registry. Handles are reference-counted; parent
//! links are weak so the tree never forms an ownership cycle.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tbkit_naming::{InstanceName, InstancePath};

struct NodeState {
    base_name: String,
    index: Option<u32>,
    parent: Option<WeakNode>,
    children: Vec<Node>,
    initialized: bool,
    fallback: Option<Box<dyn FnOnce()>>,
}

/// Shared handle to one instance's identity record
#[derive(Clone)]
pub(crate) struct Node(Rc<RefCell<NodeState>>);

/// Non-owning [`Node`] handle, used by parent links and fallback hooks
#[derive(Clone)]
pub(crate) struct WeakNode(Weak<RefCell<NodeState>>);

impl Node {
    pub(crate) fn new(default_name: &str) -> Self {
        Self(Rc::new(RefCell::new(NodeState {
            base_name: default_name.to_string(),
            index: None,
            parent: None,
            children: Vec::new(),
            initialized: false,
            fallback: None,
        })))
    }

    pub(crate) fn downgrade(&self) -> WeakNode {
        WeakNode(Rc::downgrade(&self.0))
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.0.borrow().initialized
    }

    /// Mark the payload constructed and drop the fallback hook so the
    /// cascade skips this instance.
    pub(crate) fn mark_initialized(&self) {
        let mut state = self.0.borrow_mut();
        state.initialized = true;
        state.fallback = None;
    }

    pub(crate) fn set_fallback(&self, hook: Box<dyn FnOnce()>) {
        self.0.borrow_mut().fallback = Some(hook);
    }

    pub(crate) fn take_fallback(&self) -> Option<Box<dyn FnOnce()>> {
        self.0.borrow_mut().fallback.take()
    }

    pub(crate) fn set_base_name(&self, name: &str) {
        self.0.borrow_mut().base_name = name.to_string();
    }

    pub(crate) fn base_name(&self) -> String {
        self.0.borrow().base_name.clone()
    }

    pub(crate) fn set_index(&self, index: u32) {
        self.0.borrow_mut().index = Some(index);
    }

    pub(crate) fn name(&self) -> InstanceName {
        let state = self.0.borrow();
        match state.index {
            Some(i) => InstanceName::indexed(state.base_name.clone(), i),
            None => InstanceName::new(state.base_name.clone()),
        }
    }

    pub(crate) fn parent(&self) -> Option<Node> {
        self.0.borrow().parent.as_ref().and_then(WeakNode::upgrade)
    }

    /// Parent links are assigned exactly once, when the child registers.
    pub(crate) fn set_parent(&self, parent: &Node) {
        let mut state = self.0.borrow_mut();
        debug_assert!(state.parent.is_none(), "node parent assigned twice");
        state.parent = Some(parent.downgrade());
    }

    pub(crate) fn add_child(&self, child: &Node) {
        self.0.borrow_mut().children.push(child.clone());
    }

    /// Unlink a child whose slot is gone. Dropping the link also drops the
    /// last strong handle, so the dead record is reclaimed with it.
    pub(crate) fn remove_child(&self, child: &Node) {
        self.0.borrow_mut().children.retain(|c| !c.ptr_eq(child));
    }

    /// Snapshot of the children in declaration order. Cloned out so callers
    /// can run construction hooks without holding a borrow on this node.
    pub(crate) fn children(&self) -> Vec<Node> {
        self.0.borrow().children.clone()
    }

    /// Dot-joined names from the root down to this instance
    pub(crate) fn hierarchical_path(&self) -> InstancePath {
        let mut names = vec![self.name()];
        let mut cursor = self.parent();
        while let Some(node) = cursor {
            names.push(node.name());
            cursor = node.parent();
        }
        names.reverse();
        InstancePath::new(names)
    }
}

impl WeakNode {
    pub(crate) fn upgrade(&self) -> Option<Node> {
        self.0.upgrade().map(Node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_uses_default_name() {
        let node = Node::new("u_thing");
        assert_eq!(node.base_name(), "u_thing");
        assert!(!node.is_initialized());
        assert_eq!(node.name().to_string(), "u_thing");
    }

    #[test]
    fn indexed_name_rendering() {
        let node = Node::new("u_lane");
        node.set_index(3);
        assert_eq!(node.name().to_string(), "u_lane[3]");
    }

    #[test]
    fn rename_changes_rendered_name() {
        let node = Node::new("u_thing");
        node.set_base_name("u_renamed");
        assert_eq!(node.name().to_string(), "u_renamed");
    }

    #[test]
    fn hierarchical_path_walks_to_root() {
        let root = Node::new("top");
        let mid = Node::new("u_dut");
        let leaf = Node::new("u_fifo");

        mid.set_parent(&root);
        root.add_child(&mid);
        leaf.set_parent(&mid);
        mid.add_child(&leaf);

        assert_eq!(leaf.hierarchical_path().to_string(), "top.u_dut.u_fifo");
        assert_eq!(root.hierarchical_path().to_string(), "top");
    }

    #[test]
    fn children_snapshot_preserves_order() {
        let parent = Node::new("p");
        let a = Node::new("a");
        let b = Node::new("b");
        parent.add_child(&a);
        parent.add_child(&b);

        let children = parent.children();
        assert_eq!(children.len(), 2);
        assert!(children[0].ptr_eq(&a));
        assert!(children[1].ptr_eq(&b));
    }

    #[test]
    fn remove_child_unlinks_only_the_given_node() {
        let parent = Node::new("p");
        let a = Node::new("a");
        let b = Node::new("b");
        parent.add_child(&a);
        parent.add_child(&b);
        parent.remove_child(&a);

        let children = parent.children();
        assert_eq!(children.len(), 1);
        assert!(children[0].ptr_eq(&b));
    }

    #[test]
    fn fallback_taken_at_most_once() {
        let node = Node::new("n");
        node.set_fallback(Box::new(|| {}));
        assert!(node.take_fallback().is_some());
        assert!(node.take_fallback().is_none());
    }

    #[test]
    fn mark_initialized_clears_fallback() {
        let node = Node::new("n");
        node.set_fallback(Box::new(|| {}));
        node.mark_initialized();
        assert!(node.is_initialized());
        assert!(node.take_fallback().is_none());
    }

    #[test]
    fn parent_of_orphan_is_none() {
        let node = Node::new("n");
        assert!(node.parent().is_none());
    }
}
