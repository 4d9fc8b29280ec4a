//! bson-schema: profile the schema of a MongoDB document export

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AnalyzeArgs, InputSource, handle_analyze};

#[derive(Parser)]
#[command(name = "bson-schema", version, about = "Schema inference and field statistics for BSON documents")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Profile documents from an Extended JSON export or a live collection
    Analyze {
        /// Input file (`-` for stdin)
        #[arg(required_unless_present = "uri", conflicts_with = "uri")]
        input: Option<String>,

        /// MongoDB connection string; reads from a collection instead of a file
        #[arg(long, requires = "db", requires = "collection")]
        uri: Option<String>,

        /// Database name (with --uri)
        #[arg(long, requires = "uri")]
        db: Option<String>,

        /// Collection name (with --uri)
        #[arg(long, requires = "uri")]
        collection: Option<String>,

        /// Query filter as Extended JSON (with --uri), e.g. '{"status": "active"}'
        #[arg(long, requires = "uri")]
        query: Option<String>,

        /// Input framing: auto, jsonl, array
        #[arg(long, default_value = "auto")]
        input_format: String,

        /// Output format: table, csv, json, yaml
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Profile at most this many records (0 = all)
        #[arg(long)]
        sample_size: Option<usize>,

        /// Number of top values listed per field
        #[arg(long)]
        top_k: Option<usize>,

        /// Bound distinct values tracked per field (0 = exact)
        #[arg(long)]
        max_tracked_values: Option<usize>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Analyze {
            input,
            uri,
            db,
            collection,
            query,
            input_format,
            format,
            output,
            config,
            sample_size,
            top_k,
            max_tracked_values,
        } => {
            let source = match uri {
                Some(uri) => InputSource::Collection {
                    uri,
                    db: db.unwrap_or_default(),
                    collection: collection.unwrap_or_default(),
                    query,
                },
                None => InputSource::File(input.unwrap_or_else(|| "-".to_string())),
            };
            let args = AnalyzeArgs {
                source,
                input_format,
                format,
                output,
                config,
                sample_size,
                top_k,
                max_tracked_values,
            };
            handle_analyze(&args)
                .with_context(|| format!("failed to analyze {}", args.source))?;
        }
    }

    Ok(())
}
