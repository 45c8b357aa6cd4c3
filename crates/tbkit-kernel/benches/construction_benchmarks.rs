//! Construction protocol benchmarks.
//!
//! Measures slot construction end to end: registry bookkeeping, basename
//! assignment, and the fallback cascade over flat and deep hierarchies.
//!
//! NOTE: Each timed iteration builds inside a fresh session, so the numbers
//! include session setup. Construction without a live session has nowhere
//! to register and is not a meaningful workload.

#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tbkit_kernel::{BuildSession, Component, Slot, SlotArray};
use tbkit_test_utils::Counter;

struct Bank {
    u_lane: SlotArray<Counter>,
}

impl Component for Bank {
    const DEFAULT_NAME: &'static str = "u_bank";
}

struct Chain {
    u_next: Option<Slot<Chain>>,
}

impl Component for Chain {
    const DEFAULT_NAME: &'static str = "u_chain";
}

fn build_chain(depth: u32) -> Chain {
    let u_next = if depth == 0 {
        None
    } else {
        let next = Slot::new();
        next.construct(|| build_chain(depth - 1));
        Some(next)
    };
    Chain { u_next }
}

fn leaf_path(slot: &Slot<Chain>) -> String {
    match &slot.get().u_next {
        Some(next) => leaf_path(next),
        None => slot.hierarchical_path().to_string(),
    }
}

/// Benchmark one explicit construction of a leaf payload.
fn bench_single_construct(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct/single");

    group.bench_function("counter_slot", |b| {
        b.iter(|| {
            let session = BuildSession::new();
            let _scope = session.enter();
            let slot = Slot::new();
            slot.named_construct(black_box("top"), || Counter { count: 0 });
            black_box(slot.is_initialized())
        });
    });

    group.finish();
}

/// Benchmark the cascade across one parent with many indexed lanes.
fn bench_flat_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct/flat_fanout");

    for width in [8u32, 64, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, &width| {
            b.iter(|| {
                let session = BuildSession::new();
                let _scope = session.enter();
                let bank = Slot::new();
                bank.named_construct("bank", || Bank {
                    u_lane: SlotArray::with_len(width),
                });
                let lanes = bank.get().u_lane.len();
                black_box(lanes)
            });
        });
    }

    group.finish();
}

/// Benchmark nested construction down a single spine.
fn bench_deep_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct/deep_chain");

    for depth in [4u32, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                let session = BuildSession::new();
                let _scope = session.enter();
                let root = Slot::new();
                root.named_construct("chain", || build_chain(depth));
                black_box(session.instance_count())
            });
        });
    }

    group.finish();
}

/// Benchmark tree rendering over a prebuilt wide hierarchy.
fn bench_render_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("inspect/render_tree");

    let session = BuildSession::new();
    let _scope = session.enter();
    let bank = Slot::new();
    bank.named_construct("bank", || Bank {
        u_lane: SlotArray::with_len(256),
    });

    group.bench_function("width_256", |b| {
        b.iter(|| black_box(session.render_tree()));
    });

    group.finish();
}

/// Benchmark path rendering from the bottom of a prebuilt deep hierarchy.
fn bench_leaf_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("inspect/leaf_path");

    let session = BuildSession::new();
    let _scope = session.enter();
    let root = Slot::new();
    root.named_construct("chain", || build_chain(64));

    group.bench_function("depth_64", |b| {
        b.iter(|| black_box(leaf_path(&root)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_single_construct,
    bench_flat_fanout,
    bench_deep_chain,
    bench_render_tree,
    bench_leaf_path,
);

criterion_main!(benches);
