use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Synthetic first-order logic reasoning exercises", long_about = None)]
struct Cli {
    /// Log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a premise set and questions about it
    Generate {
        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// RNG seed (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Non-derived premise count (overrides config)
        #[arg(long)]
        total: Option<usize>,

        /// Chained premise count (overrides config)
        #[arg(long)]
        chain: Option<usize>,

        /// Derived premise count (overrides config)
        #[arg(long)]
        derive: Option<usize>,

        /// Target premise: last, random, or an index
        #[arg(long)]
        selection: Option<String>,

        /// Write the JSON bundle to this file
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print the JSON bundle instead of the readable listing
        #[arg(short, long)]
        json: bool,
    },

    /// List the inference rule catalogue
    Rules,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            config,
            seed,
            total,
            chain,
            derive,
            selection,
            out,
            json,
        } => {
            commands::generate::execute(commands::generate::GenerateOptions {
                config,
                seed,
                total,
                chain,
                derive,
                selection,
                out,
                json,
            })?;
        }
        Commands::Rules => {
            commands::rules::execute()?;
        }
    }

    Ok(())
}
