//! Testing utilities for the tbkit workspace
//!
//! Fixture components plus a per-thread event log that records the
//! hierarchical path of every fixture as it is constructed.

#![allow(missing_docs)]

use std::cell::RefCell;

use tbkit_kernel::{BuildSession, Component, Slot, SlotArray};

thread_local! {
    static EVENTS: RefCell<Vec<String>> = RefCell::new(Vec::new());
}

/// Append one entry to the current thread's construction log.
pub fn record_event(event: impl Into<String>) {
    EVENTS.with(|events| events.borrow_mut().push(event.into()));
}

/// Drain the current thread's construction log.
#[must_use]
pub fn take_events() -> Vec<String> {
    EVENTS.with(|events| events.borrow_mut().drain(..).collect())
}

fn record_current_path() {
    if let Some(path) = BuildSession::current_path() {
        record_event(path.to_string());
    }
}

/// Leaf fixture with a default form. Logs its own path when built.
pub struct Probe;

impl Probe {
    #[must_use]
    pub fn new() -> Self {
        record_current_path();
        Self
    }
}

impl Default for Probe {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Probe {
    const DEFAULT_NAME: &'static str = "u_probe";

    fn default_construct() -> Option<Self> {
        Some(Self::new())
    }
}

/// Leaf fixture with a default form and no event logging. Handy for
/// benchmarks where the log would dominate the measurement.
pub struct Counter {
    pub count: u64,
}

impl Component for Counter {
    const DEFAULT_NAME: &'static str = "u_counter";

    fn default_construct() -> Option<Self> {
        Some(Self { count: 0 })
    }
}

/// Payload without a no-argument form. Must be constructed explicitly.
pub struct Manual {
    pub id: u32,
}

impl Manual {
    #[must_use]
    pub fn new(id: u32) -> Self {
        record_current_path();
        Self { id }
    }
}

impl Component for Manual {
    const DEFAULT_NAME: &'static str = "u_manual";
}

/// First of three stage fixtures with distinct default names, so that
/// sibling construction order is visible in the event log.
pub struct StageA;

impl StageA {
    #[must_use]
    pub fn new() -> Self {
        record_current_path();
        Self
    }
}

impl Default for StageA {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StageA {
    const DEFAULT_NAME: &'static str = "u_stage_a";

    fn default_construct() -> Option<Self> {
        Some(Self::new())
    }
}

pub struct StageB;

impl StageB {
    #[must_use]
    pub fn new() -> Self {
        record_current_path();
        Self
    }
}

impl Default for StageB {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StageB {
    const DEFAULT_NAME: &'static str = "u_stage_b";

    fn default_construct() -> Option<Self> {
        Some(Self::new())
    }
}

pub struct StageC;

impl StageC {
    #[must_use]
    pub fn new() -> Self {
        record_current_path();
        Self
    }
}

impl Default for StageC {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StageC {
    const DEFAULT_NAME: &'static str = "u_stage_c";

    fn default_construct() -> Option<Self> {
        Some(Self::new())
    }
}

/// Parent declaring three stages in a fixed order. Logs its own path
/// before any of its children are built.
pub struct Branch {
    pub u_first: Slot<StageA>,
    pub u_second: Slot<StageB>,
    pub u_third: Slot<StageC>,
}

impl Branch {
    #[must_use]
    pub fn new() -> Self {
        record_current_path();
        Self {
            u_first: Slot::new(),
            u_second: Slot::new(),
            u_third: Slot::new(),
        }
    }
}

impl Default for Branch {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Branch {
    const DEFAULT_NAME: &'static str = "u_branch";

    fn default_construct() -> Option<Self> {
        Some(Self::new())
    }
}

/// Indexed lane bank. The lane count is chosen at construction time, so
/// there is no default form.
pub struct LaneBank {
    pub u_lane: SlotArray<Probe>,
}

impl LaneBank {
    #[must_use]
    pub fn with_lanes(lanes: u32) -> Self {
        record_current_path();
        Self {
            u_lane: SlotArray::with_len(lanes),
        }
    }
}

impl Component for LaneBank {
    const DEFAULT_NAME: &'static str = "u_bank";
}

/// Construct a [`Branch`] under `name`, leaving all three stages to the
/// fallback cascade.
#[must_use]
pub fn build_branch(name: &str) -> Slot<Branch> {
    let slot = Slot::new();
    slot.named_construct(name, Branch::new);
    slot
}

/// Construct a [`LaneBank`] under `name` with `lanes` lanes, leaving the
/// lanes themselves to the fallback cascade.
#[must_use]
pub fn build_lane_bank(name: &str, lanes: u32) -> Slot<LaneBank> {
    let slot = Slot::new();
    slot.named_construct(name, || LaneBank::with_lanes(lanes));
    slot
}
