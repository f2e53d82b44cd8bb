mod generate;
mod schema;
mod validate;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate as generate_completions, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "synthcsv")]
#[command(version)]
#[command(about = "Generate synthetic delimited test data from a field specification", long_about = None)]
pub struct Cli {
    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate rows from a field specification file
    Generate {
        /// Field specification file (YAML, or JSON with a .json extension)
        config: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of rows, overrides the file's `rows`
        #[arg(short, long)]
        rows: Option<i64>,

        /// Random seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Emit a header line with the field names
        #[arg(long, conflicts_with = "no_headers")]
        headers: bool,

        /// Omit the header line even if the file asks for one
        #[arg(long, conflicts_with = "headers")]
        no_headers: bool,

        /// Column delimiter, overrides the file's `delimiter`
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Show progress during generation
        #[arg(short, long)]
        progress: bool,

        /// Print run statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a field specification file without generating data
    Validate {
        /// Field specification file (YAML, or JSON with a .json extension)
        config: PathBuf,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print JSON schemas for the config file and JSON output
    Schema {
        /// Schema name (default: all)
        name: Option<String>,

        /// List available schema names
        #[arg(long)]
        list: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    synthcsv::logging::init(cli.verbose);

    match cli.command {
        Commands::Generate {
            config,
            output,
            rows,
            seed,
            headers,
            no_headers,
            delimiter,
            progress,
            json,
        } => {
            let include_headers = match (headers, no_headers) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            generate::run(
                config,
                output,
                rows,
                seed,
                include_headers,
                delimiter,
                progress,
                json,
            )
        }
        Commands::Validate { config, json } => validate::run(config, json),
        Commands::Schema { name, list } => schema::run(name, list),
        Commands::Completions { shell } => {
            generate_completions(shell, &mut Cli::command(), "synthcsv", &mut io::stdout());
            Ok(())
        }
    }
}
