//! Out-of-order RV32 engine simulator CLI.
//!
//! This binary provides a single entry point for the engine model. It performs:
//! 1. **Program run:** Execute a hex program, print committed state, statistics and the
//!    differential verdict against the reference model.
//! 2. **Demo run:** Execute the built-in self-checking programs with a PASS/FAIL summary.

use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rvooo_core::common::SimError;
use rvooo_core::config::Config;
use rvooo_core::isa::disasm::xreg;
use rvooo_core::sim::loader;
use rvooo_core::sim::programs::{self, DemoProgram};
use rvooo_core::sim::{Mismatch, Simulator};
use rvooo_core::stats::SimStats;

#[derive(Parser, Debug)]
#[command(
    name = "ooo-sim",
    author,
    version,
    about = "Out-of-order RV32 execution engine simulator",
    long_about = "Run hex programs through a cycle-level model of an out-of-order core \
                  (register renaming, wakeup/select issue queue, reorder buffer) and \
                  check the committed state against an architectural reference model.\n\n\
                  Examples:\n  ooo-sim run program.hex\n  ooo-sim run program.hex --config core.json --snapshots\n  ooo-sim demo\n  ooo-sim demo shifts"
)]
struct Cli {
    /// Emit per-cycle pipeline events (overridden by RUST_LOG).
    #[arg(long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a hex program (one 32-bit word per line).
    Run {
        /// Program file.
        program: PathBuf,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print a JSON snapshot of the engine after every cycle.
        #[arg(long)]
        snapshots: bool,

        /// Override the cycle budget.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Print the run summary as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Run the built-in self-checking programs.
    Demo {
        /// Run only the program with this name.
        name: Option<String>,
    },
}

/// Machine-readable result of `run --json`.
#[derive(Serialize)]
struct RunSummary<'a> {
    registers: Vec<u32>,
    stats: &'a SimStats,
    mismatches: Vec<Mismatch>,
    commit_order_ok: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.trace);

    match cli.command {
        Commands::Run {
            program,
            config,
            snapshots,
            max_cycles,
            json,
        } => cmd_run(&program, config.as_deref(), snapshots, max_cycles, json, cli.trace),
        Commands::Demo { name } => cmd_demo(name.as_deref(), cli.trace),
    }
}

/// Installs the global subscriber: `warn` by default, `trace` for the engine with `--trace`.
fn init_tracing(trace: bool) {
    let default = if trace { "warn,rvooo_core=trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading config {}: {}", path.display(), e);
        process::exit(1);
    });
    Config::from_json(&text).unwrap_or_else(|e| {
        eprintln!("Error in config {}: {}", path.display(), e);
        process::exit(1);
    })
}

/// Runs a program file and reports committed state against the reference model.
///
/// On a fatal engine error, dumps the engine state and exits with code 1.
/// Exits with code 1 as well when the differential check fails.
fn cmd_run(
    program: &Path,
    config_path: Option<&Path>,
    snapshots: bool,
    max_cycles: Option<u64>,
    json: bool,
    trace: bool,
) {
    let mut config = load_config(config_path);
    if let Some(limit) = max_cycles {
        config.general.max_cycles = limit;
    }
    config.general.trace_instructions |= trace;

    let words = loader::load_program(program).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });
    debug!(path = %program.display(), words = words.len(), "program loaded");
    let mut sim = Simulator::new(&config, &words).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    if !json {
        println!("[*] Program: {} ({} instructions)", program.display(), words.len());
        println!(
            "    phys_regs={} rob={} iq={} fu_latency={} select={:?}",
            config.core.phys_regs,
            config.core.rob_size,
            config.core.iq_size,
            config.core.fu_latency,
            config.core.select_policy
        );
    }

    let result = sim
        .run_with(|_, engine| {
            if snapshots {
                match engine.snapshot().to_json() {
                    Ok(line) => println!("{line}"),
                    Err(e) => eprintln!("snapshot serialization failed: {e}"),
                }
            }
        })
        .map(|_| ());
    if let Err(e) = result {
        fatal(&sim, &e);
    }

    let mismatches = sim.differential_check();
    info!(mismatches = mismatches.len(), "differential check finished");
    let commit_order_ok = sim.commit_order_ok();
    let passed = mismatches.is_empty() && commit_order_ok;

    if json {
        let summary = RunSummary {
            registers: sim.engine().arch_state().to_vec(),
            stats: &sim.stats,
            mismatches,
            commit_order_ok,
        };
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{text}"),
            Err(e) => eprintln!("summary serialization failed: {e}"),
        }
    } else {
        print_registers(&sim);
        sim.stats.print();
        if passed {
            println!("PASS: committed state matches the reference model");
        } else {
            for m in &mismatches {
                println!(
                    "REG {} MISMATCH: OOO={} REF={}",
                    m.reg, m.actual, m.expected
                );
            }
            if !commit_order_ok {
                println!("COMMIT ORDER MISMATCH");
            }
            println!("FAIL");
        }
    }

    if !passed {
        process::exit(1);
    }
}

/// Runs the built-in programs and prints a testbench-style summary.
fn cmd_demo(name: Option<&str>, trace: bool) {
    let selected: Vec<DemoProgram> = match name {
        Some(n) => match programs::find_demo(n) {
            Some(p) => vec![p],
            None => {
                eprintln!("Unknown demo {n:?}; available:");
                for p in programs::demo_programs() {
                    eprintln!("  {}", p.name);
                }
                process::exit(1);
            }
        },
        None => programs::demo_programs(),
    };

    println!("========================================");
    println!("Out-of-Order Engine Demo");
    println!("Engine vs Reference Model Comparison");
    println!("========================================");

    let mut passed = 0;
    let mut failed = 0;
    let mut total_cycles = 0;
    for demo in &selected {
        println!("\n===== Running Test: {} =====", demo.name);
        debug!(demo = demo.name, "starting demo");
        let mut config = Config {
            core: demo.core.clone(),
            ..Config::default()
        };
        config.general.trace_instructions = trace;

        let ok = match run_demo(demo, &config) {
            Ok((ok, stats)) => {
                total_cycles += stats.cycles;
                println!(
                    "  cycles={} retired={} ipc={:.3} stalls(iq/rob/free)={}/{}/{}",
                    stats.cycles,
                    stats.instructions_retired,
                    stats.ipc(),
                    stats.stalls_iq_full,
                    stats.stalls_rob_full,
                    stats.stalls_free_list
                );
                ok
            }
            Err(e) => {
                eprintln!("  error: {e}");
                false
            }
        };
        if ok {
            println!("PASS: {}", demo.name);
            passed += 1;
        } else {
            println!("FAIL: {}", demo.name);
            failed += 1;
        }
    }

    println!("\n========================================");
    println!("Test Summary");
    println!("========================================");
    println!("Tests Passed: {passed}");
    println!("Tests Failed: {failed}");
    println!("Total Cycles: {total_cycles}");

    if failed == 0 {
        println!("\n*** ALL TESTS PASSED ***");
    } else {
        println!("\n*** SOME TESTS FAILED ***");
        process::exit(1);
    }
}

fn run_demo(demo: &DemoProgram, config: &Config) -> Result<(bool, SimStats), SimError> {
    let mut sim = Simulator::new(config, demo.words)?;
    let _ = sim.run()?;

    let mut ok = sim.commit_order_ok();
    for &(reg, expected) in demo.expected {
        let actual = sim.reg(reg);
        if actual != expected {
            println!("  x{reg}: expected {expected}, got {actual}");
            ok = false;
        }
    }
    for m in sim.differential_check() {
        println!("  REG {} MISMATCH: OOO={} REF={}", m.reg, m.actual, m.expected);
        ok = false;
    }
    print_registers(&sim);
    Ok((ok, sim.stats.clone()))
}

fn print_registers(sim: &Simulator) {
    println!("Registers (non-zero):");
    for (i, value) in sim.engine().arch_state().iter().enumerate().skip(1) {
        if *value != 0 {
            println!("  x{:<2} ({:<4}) = {:>10} ({:#010x})", i, xreg(i), value, value);
        }
    }
}

fn fatal(sim: &Simulator, error: &SimError) -> ! {
    eprintln!("\n[!] FATAL: {error}");
    match serde_json::to_string_pretty(&sim.engine().snapshot()) {
        Ok(state) => eprintln!("{state}"),
        Err(e) => eprintln!("state dump failed: {e}"),
    }
    sim.stats.print();
    process::exit(1);
}
