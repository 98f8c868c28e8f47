//! antpath - fractal ant-path generator
//!
//! ```bash
//! # Parse a chain and list its operations
//! antpath parse "T:-90|DL:4|T:90|"
//!
//! # Hilbert curve, three passes, as chain text
//! antpath generate --family hilbert --iterations 3 --side 8
//!
//! # Same settings from a file, walked by the ant
//! ANTPATH_CONFIG=antpath.toml antpath walk --json
//! ```

mod config;
mod error;
mod logging;
mod pipeline;

use antpath_core::FractalFamily;
use antpath_dsl::{format_listing, parse, to_chain, to_json};
use clap::{Args, Parser, Subcommand};
use config::Overrides;
use error::CliResult;
use logging::{init_logging, LogFormat};
use pipeline::{generate, walk, WalkOptions};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "antpath")]
#[command(version)]
#[command(about = "Generate fractal operation chains and walk them with a grid ant")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a chain and print one operation per line
    Parse {
        /// Chain text, e.g. "D:2|T:90|D:2"
        chain: String,

        /// Print the operations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a family's seed and rules, rewrite, and print the result
    Generate(GenerateArgs),

    /// Generate, then run the ant over the result
    Walk {
        #[command(flatten)]
        args: GenerateArgs,

        /// Stop the ant after this many moves
        #[arg(long)]
        max_life: Option<usize>,

        /// Fixed step length, replacing the ant's scale (0 keeps the scale)
        #[arg(long)]
        distance: Option<f64>,
    },

    /// Load and validate a configuration file, then print it
    CheckConfig {
        #[arg(long, env = "ANTPATH_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// TOML configuration file
    #[arg(long, env = "ANTPATH_CONFIG")]
    config: Option<PathBuf>,

    /// hilbert, ecurve, sierpinski, zigzag or generic
    #[arg(long)]
    family: Option<FractalFamily>,

    /// Rewrite passes (defaults per family)
    #[arg(long)]
    iterations: Option<usize>,

    /// Side length for the family's draw steps
    #[arg(long = "side")]
    side_length: Option<f64>,

    /// Upper bound on the length of any generation
    #[arg(long)]
    max_operations: Option<usize>,

    /// Seed for the generic family's E-sequence jitter
    #[arg(long)]
    jitter_seed: Option<u64>,

    /// Print JSON instead of chain text
    #[arg(long)]
    json: bool,
}

impl GenerateArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            family: self.family,
            iterations: self.iterations,
            side_length: self.side_length,
            max_operations: self.max_operations,
            jitter_seed: self.jitter_seed,
        }
    }
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(LogFormat::from_env()) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Commands::Parse { chain, json } => cmd_parse(&chain, json),
        Commands::Generate(args) => cmd_generate(&args),
        Commands::Walk {
            args,
            max_life,
            distance,
        } => cmd_walk(&args, WalkOptions { max_life, distance }),
        Commands::CheckConfig { config } => cmd_check_config(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

fn cmd_parse(chain: &str, json: bool) -> CliResult<()> {
    let sequence = parse(chain)?;
    if json {
        println!("{}", to_json(&sequence)?);
    } else {
        print!("{}", format_listing(&sequence));
    }
    Ok(())
}

fn cmd_generate(args: &GenerateArgs) -> CliResult<()> {
    let config = config::load(args.config.as_deref(), &args.overrides())?;
    let sequence = generate(&config)?;

    if args.json {
        println!("{}", to_json(&sequence)?);
    } else {
        println!("{}", to_chain(&sequence, false));
    }
    Ok(())
}

fn cmd_walk(args: &GenerateArgs, options: WalkOptions) -> CliResult<()> {
    let config = config::load(args.config.as_deref(), &args.overrides())?;
    let sequence = generate(&config)?;
    let (_, report) = walk(sequence, options);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("position:    ({}, {})", report.position.0, report.position.1);
        println!("heading:     {}", report.heading);
        println!("path length: {}", report.path_length);
        println!(
            "steps:       {} ({} moves, {} skipped)",
            report.steps, report.moves, report.skipped
        );
        if !report.alive {
            println!("ant stopped at max life");
        }
    }
    Ok(())
}

fn cmd_check_config(path: Option<PathBuf>) -> CliResult<()> {
    let config = config::load_required(path.as_deref())?;
    print!("{}", toml::to_string_pretty(&config)?);
    tracing::info!(
        iterations = config.effective_iterations(),
        "configuration is valid"
    );
    Ok(())
}
