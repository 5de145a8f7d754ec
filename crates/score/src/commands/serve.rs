//! `score serve` command.

use std::path::PathBuf;

use clap::Args;
use score_config::{CliSettings, Config};
use score_server::{ServerConfig, run_server};

use super::build::build_site;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file.
    /// Default: auto-discover score.toml in current directory and parents.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host address to bind to. Overrides config.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on. Overrides config.
    #[arg(short, long)]
    port: Option<u16>,

    /// Build output directory to serve. Overrides config.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Build the site before serving.
    #[arg(long)]
    build: bool,

    /// Enable verbose output (show INFO logs).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            output_dir: self.output_dir,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let output = Output::new();
        if let Some(config_path) = &config.config_path {
            output.info(&format!("Using config: {}", config_path.display()));
        }

        if self.build {
            let summary = build_site(&config)?;
            output.success(&format!(
                "Built {} documents into {} chunks",
                summary.documents, summary.chunks
            ));
        }

        output.info(&format!(
            "Serving: {}",
            config.docs_resolved.output_dir.display()
        ));
        output.highlight(&format!(
            "Listening on http://{}:{}{}",
            config.server.host, config.server.port, config.site.base_url
        ));

        run_server(ServerConfig::from_config(&config, version)).await?;

        Ok(())
    }
}
