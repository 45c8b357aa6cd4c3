use pretty_assertions::assert_eq;
use tbkit_kernel::{BuildSession, Component, Slot};
use tbkit_test_utils::{build_lane_bank, Manual, Probe};

struct Grandchild;

impl Component for Grandchild {
    const DEFAULT_NAME: &'static str = "grandchild";

    fn default_construct() -> Option<Self> {
        Some(Self)
    }
}

struct Child {
    u_grandchild: Slot<Grandchild>,
}

impl Component for Child {
    const DEFAULT_NAME: &'static str = "child";

    fn default_construct() -> Option<Self> {
        Some(Self {
            u_grandchild: Slot::new(),
        })
    }
}

struct Root {
    u_child: Slot<Child>,
}

impl Root {
    fn new() -> Self {
        Self {
            u_child: Slot::new(),
        }
    }
}

impl Component for Root {
    const DEFAULT_NAME: &'static str = "root";
}

#[test]
fn test_cascade_reaches_grandchildren() {
    let session = BuildSession::new();
    let _scope = session.enter();

    let root = Slot::new();
    root.named_construct("root", Root::new);
    assert!(root.is_initialized());

    let root_ref = root.get();
    assert!(root_ref.u_child.is_initialized());

    let child_ref = root_ref.u_child.get();
    assert!(child_ref.u_grandchild.is_initialized());
    assert_eq!(
        child_ref.u_grandchild.hierarchical_path().to_string(),
        "root.child.grandchild"
    );

    let paths: Vec<String> = session
        .instance_paths()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(paths, ["root", "root.child", "root.child.grandchild"]);
}

#[test]
fn test_root_slot_path_has_no_leading_dot() {
    let probe = Slot::new();
    probe.named_construct("top", Probe::new);
    assert_eq!(probe.hierarchical_path().to_string(), "top");
    assert_eq!(probe.name().to_string(), "top");
}

#[test]
fn test_indexed_lanes_render_with_brackets() {
    let session = BuildSession::new();
    let _scope = session.enter();

    let bank = build_lane_bank("bank", 4);
    let bank_ref = bank.get();
    assert_eq!(bank_ref.u_lane.len(), 4);

    let lane = &bank_ref.u_lane[3];
    assert!(lane.is_initialized());
    assert_eq!(lane.name().to_string(), "u_probe[3]");
    assert_eq!(lane.hierarchical_path().to_string(), "bank.u_probe[3]");
}

#[test]
fn test_render_tree_lists_lanes_in_order() {
    let session = BuildSession::new();
    let _scope = session.enter();

    let bank = build_lane_bank("bank", 2);
    assert!(bank.is_initialized());
    assert_eq!(session.render_tree(), "bank\n  u_probe[0]\n  u_probe[1]\n");
}

#[test]
fn test_lane_count_survives_teardown() {
    let session = BuildSession::new();
    let scope = session.enter();

    let bank = build_lane_bank("bank", 4);
    let lanes = bank.get().u_lane.len();
    drop(bank);
    drop(scope);

    assert_eq!(lanes, 4);
    assert_eq!(session.instance_count(), 5);
}

struct Holder {
    u_manual: Slot<Manual>,
}

impl Component for Holder {
    const DEFAULT_NAME: &'static str = "u_holder";
}

#[test]
fn test_explicit_children_skip_the_cascade() {
    let session = BuildSession::new();
    let _scope = session.enter();

    let slot = Slot::new();
    slot.named_construct("pair", || {
        let holder = Holder {
            u_manual: Slot::new(),
        };
        holder.u_manual.named_construct("primary", || Manual::new(42));
        holder
    });

    let holder = slot.get();
    assert_eq!(holder.u_manual.get().id, 42);
    assert_eq!(
        holder.u_manual.hierarchical_path().to_string(),
        "pair.primary"
    );
    assert_eq!(session.instance_count(), 2);
}

#[test]
fn test_unbuilt_root_slot_stays_unregistered() {
    let session = BuildSession::new();
    let _scope = session.enter();

    let slot = Slot::<Probe>::new();
    assert!(!slot.is_initialized());
    assert_eq!(session.instance_count(), 0);
}

#[test]
#[should_panic(expected = "dup is constructed twice")]
fn test_double_construct_panics() {
    let slot = Slot::new();
    slot.named_construct("dup", || Manual::new(1));
    slot.named_construct("dup", || Manual::new(2));
}

#[test]
fn test_nested_sessions_keep_separate_registries() {
    let outer = BuildSession::new();
    let inner = BuildSession::new();

    let _outer_scope = outer.enter();
    let a = Slot::new();
    a.named_construct("a", || Manual::new(1));
    {
        let _inner_scope = inner.enter();
        let b = Slot::new();
        b.named_construct("b", || Manual::new(2));
    }
    let c = Slot::new();
    c.named_construct("c", || Manual::new(3));

    let outer_paths: Vec<String> = outer
        .instance_paths()
        .iter()
        .map(ToString::to_string)
        .collect();
    let inner_paths: Vec<String> = inner
        .instance_paths()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(outer_paths, ["a", "c"]);
    assert_eq!(inner_paths, ["b"]);
    assert_eq!(outer.instance_count(), 2);
    assert_eq!(inner.instance_count(), 1);
}
