//! Score CLI.
//!
//! Builds documentation sites into chunked bundles and serves them.

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use commands::{BuildArgs, ServeArgs};
use output::Output;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Documentation site engine.
#[derive(Parser)]
#[command(name = "score")]
#[command(version = VERSION)]
#[command(about = "Documentation site engine with on-demand chunk loading")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile markdown sources into a chunked site bundle.
    Build(BuildArgs),
    /// Start the documentation server.
    Serve(ServeArgs),
}

fn main() {
    let cli = Cli::parse();

    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .expect("Failed to create tokio runtime")
            .block_on(args.execute(VERSION)),
    };

    if let Err(e) = result {
        let output = Output::new();
        output.error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
