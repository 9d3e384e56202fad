//! LC-3 simulator CLI.
//!
//! This binary provides a single entry point for batch simulation. It performs:
//! 1. **Run:** Load a big-endian `.obj` image, execute until halt, print state and stats.
//! 2. **Disasm:** Print an image's words with their disassembly.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use lc3_core::config::{Config, PipelineConfig};
use lc3_core::isa::disasm;
use lc3_core::sim::loader;
use lc3_core::{SimError, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "lc3sim",
    author,
    version,
    about = "LC-3 microcoded processor simulator",
    long_about = "Run an LC-3 object image on the microcoded core, optionally with the\n\
                  pipeline timing model attached.\n\n\
                  Examples:\n  \
                  lc3sim run program.obj\n  \
                  lc3sim run program.obj --pipeline --no-forwarding\n  \
                  lc3sim disasm program.obj"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an object image until halt or the step budget runs out.
    Run {
        /// Object image (16-bit big-endian words, origin first).
        file: PathBuf,

        /// Macro-step budget before the run is reported as a timeout.
        #[arg(long, default_value_t = 1_000_000)]
        max_steps: u64,

        /// Trace each retired instruction and microstate to stderr.
        #[arg(long)]
        trace: bool,

        /// Attach the pipeline timing model.
        #[arg(long)]
        pipeline: bool,

        /// Disable forwarding in the pipeline model.
        #[arg(long)]
        no_forwarding: bool,

        /// Treat branch prediction as perfect (waive the branch penalty).
        #[arg(long)]
        branch_prediction: bool,

        /// Print only these statistics sections (summary, instruction_mix, control).
        #[arg(long)]
        stats: Vec<String>,
    },

    /// Disassemble an object image.
    Disasm {
        /// Object image to list.
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            file,
            max_steps,
            trace,
            pipeline,
            no_forwarding,
            branch_prediction,
            stats,
        } => cmd_run(
            file,
            max_steps,
            trace,
            pipeline,
            no_forwarding,
            branch_prediction,
            stats,
        ),
        Commands::Disasm { file } => cmd_disasm(file),
    }
}

/// Runs the simulator: loads the image, loops on `step` until halt, prints
/// final state, console output, and statistics.
fn cmd_run(
    file: PathBuf,
    max_steps: u64,
    trace: bool,
    pipeline: bool,
    no_forwarding: bool,
    branch_prediction: bool,
    stats: Vec<String>,
) {
    let mut config = Config::default();
    config.general.trace_instructions = trace;

    let mut sim = Simulator::new(config);

    if pipeline {
        let pipe_config = PipelineConfig {
            forwarding_enabled: !no_forwarding,
            branch_prediction_enabled: branch_prediction,
            ..PipelineConfig::default()
        };
        if let Err(e) = sim.configure_pipeline(pipe_config) {
            eprintln!("[!] {}", e);
            process::exit(1);
        }
        sim.enable_pipeline(true).expect("validated above");
    }

    if let Err(e) = sim.load_object_file(&file) {
        eprintln!("[!] {}", e);
        process::exit(1);
    }
    println!("[*] Loaded {} at {:#06x}", file.display(), sim.get_pc());

    let outcome = sim.run(max_steps);

    let output = sim.take_output();
    if !output.is_empty() {
        println!("--- console ---");
        println!("{}", String::from_utf8_lossy(&output));
        println!("---------------");
    }

    match outcome {
        Ok(()) => println!("[*] Machine halted normally."),
        Err(e @ SimError::Timeout { .. }) => println!("[!] {}", e),
        Err(e) => {
            eprintln!("[!] FATAL: {}", e);
            sim.dump_state();
            sim.stats().print_sections(&stats);
            process::exit(1);
        }
    }

    sim.dump_state();
    sim.stats().print_sections(&stats);
    if let Some(pipe) = sim.pipeline_mut() {
        pipe.drain(64);
        let name = pipe.config().name.clone();
        pipe.metrics().print(&name);
    }
}

/// Lists an object image with one disassembled instruction per line.
fn cmd_disasm(file: PathBuf) {
    let image = match loader::read_object_file(&file) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("[!] {}", e);
            process::exit(1);
        }
    };

    println!(".ORIG x{:04X}", image.origin);
    for (i, word) in image.words.iter().enumerate() {
        let addr = image.origin.wrapping_add(i as u16);
        println!("x{:04X}  x{:04X}  {}", addr, word, disasm::disassemble(*word));
    }
}
