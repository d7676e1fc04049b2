use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use intcode_vm::io::{to_fn, Console};
use intcode_vm::{chain, format_listing, patch, LinkConfig, Machine, Ring};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Intcode - run and inspect Intcode programs
#[derive(Parser)]
#[command(name = "intcode")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Intcode machine runner", long_about = "Intcode Toolkit\n\nRuns Intcode programs and wires machines together:\n  - Interactive or scripted single runs\n  - Sequential chains and feedback rings\n  - Program listings and syntax checks")]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program once
    Run {
        /// Program file
        file: PathBuf,
        /// Feed these values instead of reading stdin
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        input: Option<Vec<i64>>,
        /// Overwrite a cell before running (ADDR=VAL, repeatable)
        #[arg(long = "set", value_name = "ADDR=VAL", value_parser = parse_assignment)]
        set: Vec<(usize, i64)>,
        /// Print final memory after the run
        #[arg(long)]
        memory: bool,
    },
    /// Run machines one after another, one per phase
    Chain {
        /// Program file
        file: PathBuf,
        /// Phase setting for each machine
        #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
        phases: Vec<i64>,
        /// Input for the first machine
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        input: i64,
    },
    /// Run machines concurrently in a feedback ring
    Ring {
        /// Program file
        file: PathBuf,
        /// Phase setting for each machine
        #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
        phases: Vec<i64>,
        /// First value on the first link
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        seed: i64,
        /// JSON link configuration
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Print a program listing
    Disassemble {
        /// Program file
        file: PathBuf,
    },
    /// Check that a program parses
    Check {
        /// Program file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            file,
            input,
            set,
            memory,
        } => run_command(&file, input, &set, memory),
        Commands::Chain {
            file,
            phases,
            input,
        } => chain_command(&file, &phases, input),
        Commands::Ring {
            file,
            phases,
            seed,
            config,
        } => ring_command(&file, &phases, seed, config.as_deref()),
        Commands::Disassemble { file } => disassemble_command(&file),
        Commands::Check { file } => check_command(&file),
    };

    if let Err(err) = result {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_program(path: &Path) -> Result<Vec<i64>> {
    let program = intcode_parser::load(path)
        .with_context(|| format!("failed to load program '{}'", path.display()))?;
    debug!(cells = program.len(), path = %path.display(), "program loaded");
    Ok(program)
}

fn run_command(
    path: &Path,
    input: Option<Vec<i64>>,
    set: &[(usize, i64)],
    show_memory: bool,
) -> Result<()> {
    let program = load_program(path)?;
    let program = patch(&program, set).context("failed to patch program")?;

    let memory = match input {
        Some(values) => {
            let mut machine = Machine::new(&program, VecDeque::from(values), Vec::new());
            let memory = machine.run().context("machine failed")?;
            for value in machine.output() {
                println!("{}", value);
            }
            memory
        }
        None => {
            let output = to_fn(|value| println!("{}", value));
            Machine::new(&program, Console::stdio(), output)
                .run()
                .context("machine failed")?
        }
    };

    if show_memory {
        println!("{}", join_cells(&memory));
    }
    Ok(())
}

fn chain_command(path: &Path, phases: &[i64], input: i64) -> Result<()> {
    let program = load_program(path)?;
    let result = chain(&program, phases, input).context("chain failed")?;
    println!("{}", result);
    Ok(())
}

fn ring_command(path: &Path, phases: &[i64], seed: i64, config: Option<&Path>) -> Result<()> {
    let program = load_program(path)?;
    let config = match config {
        Some(config_path) => load_config(config_path)?,
        None => LinkConfig::default(),
    };
    info!(?config, "ring configuration");

    let result = Ring::new(config)
        .run(&program, phases, seed)
        .context("ring failed")?;
    println!("{}", result);
    Ok(())
}

fn load_config(path: &Path) -> Result<LinkConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config '{}'", path.display()))
}

fn disassemble_command(path: &Path) -> Result<()> {
    let program = load_program(path)?;
    print!("{}", format_listing(&program));
    Ok(())
}

fn check_command(path: &Path) -> Result<()> {
    let program = load_program(path)?;
    println!("✓ Syntax OK");
    println!("\nFile '{}' holds {} cells", path.display(), program.len());
    Ok(())
}

fn join_cells(cells: &[i64]) -> String {
    cells
        .iter()
        .map(|cell| cell.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse `ADDR=VAL`
fn parse_assignment(text: &str) -> Result<(usize, i64)> {
    let Some((address, value)) = text.split_once('=') else {
        bail!("expected ADDR=VAL, got '{}'", text);
    };
    let address = address
        .trim()
        .parse()
        .with_context(|| format!("invalid address '{}'", address))?;
    let value = value
        .trim()
        .parse()
        .with_context(|| format!("invalid value '{}'", value))?;
    Ok((address, value))
}
