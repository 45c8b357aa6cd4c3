use clap::{Arg, Command, value_parser};
use std::time::Instant;
use tbkit_kernel::{logging, BuildSession, Component, Slot, SlotArray};

fn main() {
    logging::init();

    let cli = Command::new("tbkit")
        .version(tbkit_kernel::VERSION)
        .about("Hierarchical testbench component construction")
        .arg_required_else_help(false)
        .subcommand(
            Command::new("demo").about("Build a small demo testbench and print its hierarchy"),
        )
        .subcommand(
            Command::new("stress")
                .about("Construct a uniform component tree and report timing")
                .arg(
                    Arg::new("width")
                        .long("width")
                        .default_value("8")
                        .value_parser(value_parser!(u32))
                        .help("Children per node"),
                )
                .arg(
                    Arg::new("depth")
                        .long("depth")
                        .default_value("4")
                        .value_parser(value_parser!(u32))
                        .help("Levels below the root"),
                ),
        );

    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("demo", _)) => run_demo(),
        Some(("stress", args)) => {
            let width = *args.get_one::<u32>("width").unwrap();
            let depth = *args.get_one::<u32>("depth").unwrap();
            run_stress(width, depth);
        }
        _ => {}
    }
}

fn run_demo() {
    let session = BuildSession::new();
    let _scope = session.enter();

    let tb = Slot::<Testbench>::new();
    tb.named_construct("tb_top", || {
        let tb = Testbench {
            u_source: Slot::new(),
            u_dut: Slot::new(),
            u_sink: Slot::new(),
        };
        tb.u_dut.construct(|| Dut {
            u_lane: SlotArray::with_len(4),
        });
        tb
    });

    let tb_ref = tb.get();
    println!("Constructed {} instances", session.instance_count());
    println!("Source initialized: {}", tb_ref.u_source.is_initialized());
    println!("Sink initialized: {}", tb_ref.u_sink.is_initialized());
    println!("Dut lanes: {}", tb_ref.u_dut.get().u_lane.len());
    println!();
    println!("Hierarchy:");
    print!("{}", session.render_tree());
    println!();
    println!("Instance paths (construction order):");
    for path in session.instance_paths() {
        println!("  {path}");
    }
}

fn run_stress(width: u32, depth: u32) {
    println!("Running construction stress...");
    println!("Width: {width}");
    println!("Depth: {depth}");
    println!();

    let expected = expected_instances(width, depth);
    let session = BuildSession::new();
    let _scope = session.enter();

    let start = Instant::now();
    let root = Slot::<Fanout>::new();
    build_fanout(&root, width, depth);
    let elapsed = start.elapsed();

    let constructed = session.instance_count() as u64;
    let success = constructed == expected;

    println!("Stress Report:");
    println!("  Instances: {constructed} (expected {expected})");
    println!("  Construction Time: {}ms", elapsed.as_millis());
    println!("  Success: {success}");

    std::process::exit(if success { 0 } else { 1 });
}

fn build_fanout(slot: &Slot<Fanout>, width: u32, depth: u32) {
    slot.construct(|| {
        let stage = Fanout {
            u_lane: SlotArray::with_len(if depth == 0 { 0 } else { width }),
        };
        for lane in &stage.u_lane {
            build_fanout(lane, width, depth - 1);
        }
        stage
    });
}

fn expected_instances(width: u32, depth: u32) -> u64 {
    let mut total = 0u64;
    let mut level = 1u64;
    for _ in 0..=depth {
        total = total.saturating_add(level);
        level = level.saturating_mul(u64::from(width));
    }
    total
}

struct Source;

impl Component for Source {
    const DEFAULT_NAME: &'static str = "u_source";

    fn default_construct() -> Option<Self> {
        Some(Self)
    }
}

struct Sink;

impl Component for Sink {
    const DEFAULT_NAME: &'static str = "u_sink";

    fn default_construct() -> Option<Self> {
        Some(Self)
    }
}

struct Lane;

impl Component for Lane {
    const DEFAULT_NAME: &'static str = "u_lane";

    fn default_construct() -> Option<Self> {
        Some(Self)
    }
}

struct Dut {
    u_lane: SlotArray<Lane>,
}

impl Component for Dut {
    const DEFAULT_NAME: &'static str = "u_dut";
}

struct Testbench {
    u_source: Slot<Source>,
    u_dut: Slot<Dut>,
    u_sink: Slot<Sink>,
}

impl Component for Testbench {
    const DEFAULT_NAME: &'static str = "u_testbench";
}

struct Fanout {
    u_lane: SlotArray<Fanout>,
}

impl Component for Fanout {
    const DEFAULT_NAME: &'static str = "u_fanout";
}
