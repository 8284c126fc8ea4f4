//! Auric CLI
//!
//! Usage:
//!   auric check <file.au>                 - Type check every definition
//!   auric elaborate <file.au> [--json]    - Print the core definitions
//!   auric run <file.au> [--entry NAME]    - Evaluate the definitions

use auric::prelude::*;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "auric")]
#[command(author = "Auric Authors")]
#[command(version = "0.1.0")]
#[command(about = "The Auric language front-end", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Trace every judgment and evaluation step
    #[arg(long, global = true)]
    trace: bool,

    /// Render types with ASCII operators
    #[arg(long, global = true)]
    ascii: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Type check a source file
    Check {
        file: PathBuf,
    },

    /// Print the elaborated core definitions
    Elaborate {
        file: PathBuf,

        /// Emit JSON instead of surface syntax
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a source file over the standard constructors
    Run {
        file: PathBuf,

        /// Print only this definition
        #[arg(short, long)]
        entry: Option<String>,

        /// Evaluation depth limit
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(args: &Args) {
    let level = if args.trace {
        "trace"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> auric::Result<()> {
    let config = if args.ascii { PrettyConfig::ascii() } else { PrettyConfig::default() };

    match &args.command {
        Command::Check { file } => {
            let module = auric::load(file)?;
            info!(file = %file.display(), "checking");
            let types = auric::check(&module, &auric::prelude::constructor_signatures())?;
            for (name, ty) in types.iter() {
                println!("{} {} {}", name.cyan(), ":".dimmed(), print_type(ty, &config));
            }
            println!("{} {} definitions", "ok".green().bold(), types.len());
        }
        Command::Elaborate { file, json } => {
            let module = auric::load(file)?;
            if *json {
                println!("{}", ser::definitions_to_json(&module.definitions)?);
            } else {
                for (name, expr) in module.definitions.iter() {
                    println!("{} {} {}", name.cyan(), "=".dimmed(), expr);
                }
            }
        }
        Command::Run { file, entry, max_depth } => {
            let module = auric::load(file)?;
            let mut evaluator = Evaluator::new().with_max_depth(*max_depth);
            let values = auric::evaluate_with(&mut evaluator, &module.definitions, &auric::prelude::standard_constructors())?;
            debug!(count = values.len(), "evaluated");
            match entry {
                Some(name) => match values.get(name) {
                    Some(value) => println!("{}", value),
                    None => return Err(EvalError::UnboundVariable(name.clone()).into()),
                },
                None => {
                    for (name, value) in values.iter() {
                        println!("{} {} {}", name.cyan(), "=".dimmed(), value);
                    }
                }
            }
        }
    }

    Ok(())
}
