//! `score build` command.

use std::path::PathBuf;

use clap::Args;
use score_config::{CliSettings, Config};
use score_content::DocumentOptions;
use score_site::{BundleOptions, Site, emit_bundle};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file.
    /// Default: auto-discover score.toml in current directory and parents.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory. Overrides config.
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Build output directory. Overrides config.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl BuildArgs {
    /// Execute the build command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let output = Output::new();
        output.info(&format!(
            "Building {} from {}",
            config.site.title,
            config.docs_resolved.source_dir.display()
        ));

        let summary = build_site(&config)?;
        output.success(&format!(
            "Built {} documents into {} chunks",
            summary.documents, summary.chunks
        ));
        output.info(&format!("Output: {}", summary.output_dir.display()));

        Ok(())
    }
}

/// What a build produced.
#[derive(Debug)]
pub(crate) struct BuildSummary {
    pub(crate) documents: usize,
    pub(crate) chunks: usize,
    pub(crate) output_dir: PathBuf,
}

/// Compile the sources and write the bundle for `config`.
pub(crate) fn build_site(config: &Config) -> Result<BuildSummary, CliError> {
    let options = DocumentOptions {
        base_url: config.site.base_url.clone(),
        docs_route: config.site.docs_route.clone(),
        edit_url: config.site.edit_url.clone(),
    };
    let site = Site::load(
        &config.docs_resolved.source_dir,
        &options,
        &config.sidebar.categories,
    )?;

    let output_dir = config.docs_resolved.output_dir.clone();
    let manifest = emit_bundle(
        &site,
        &output_dir,
        &BundleOptions {
            public_path: config.site.base_url.clone(),
            docs_root: options.docs_root(),
            title: config.site.title.clone(),
            tagline: config.site.tagline.clone(),
        },
    )?;
    tracing::info!(
        documents = site.documents().len(),
        routes = manifest.routes.len(),
        output_dir = %output_dir.display(),
        "Site built"
    );

    Ok(BuildSummary {
        documents: site.documents().len(),
        chunks: manifest.chunks.len(),
        output_dir,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use score_site::{MANIFEST_FILENAME, SiteManifest};

    use super::*;

    fn write(root: &Path, path: &str, content: &str) {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }

    fn project(root: &Path) -> PathBuf {
        write(
            root,
            "score.toml",
            r#"
[site]
title = "SymphonyQL"
tagline = "A GraphQL implementation built with Apache Pekko"
base_url = "/SymphonyQL/"

[docs]
source_dir = "docs"
output_dir = "build"

[[sidebar.categories]]
label = "Getting Started"
"#,
        );
        write(
            root,
            "docs/intro.md",
            "---\nslug: /\nsidebar_position: 1\nsidebar_category: Getting Started\n---\n# Introduction\n",
        );
        write(
            root,
            "docs/installation.md",
            "---\nsidebar_position: 2\nsidebar_category: Getting Started\n---\n# Installation\n",
        );
        root.join("score.toml")
    }

    #[test]
    fn test_build_site_writes_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = project(dir.path());
        let config = Config::load(Some(&config_path), Some(&CliSettings::default())).unwrap();

        let summary = build_site(&config).unwrap();

        assert_eq!(summary.documents, 2);
        assert_eq!(summary.chunks, 3);
        assert!(summary.output_dir.join(MANIFEST_FILENAME).is_file());

        let manifest = SiteManifest::load(&summary.output_dir).unwrap();
        assert_eq!(manifest.title, "SymphonyQL");
        assert_eq!(manifest.docs_root, "/SymphonyQL/docs/");
        assert!(manifest.route("/SymphonyQL/docs/").is_some());
        assert!(manifest.route("/SymphonyQL/docs/installation").is_some());
    }

    #[test]
    fn test_build_site_honors_output_override() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = project(dir.path());
        let elsewhere = dir.path().join("public");
        let settings = CliSettings {
            output_dir: Some(elsewhere.clone()),
            ..Default::default()
        };
        let config = Config::load(Some(&config_path), Some(&settings)).unwrap();

        let summary = build_site(&config).unwrap();

        assert_eq!(summary.output_dir, elsewhere);
        assert!(elsewhere.join(MANIFEST_FILENAME).is_file());
        assert!(!dir.path().join("build").exists());
    }

    #[test]
    fn test_build_site_missing_sources() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = project(dir.path());
        let settings = CliSettings {
            source_dir: Some(dir.path().join("missing")),
            ..Default::default()
        };
        let config = Config::load(Some(&config_path), Some(&settings)).unwrap();

        let err = build_site(&config).unwrap_err();

        assert!(matches!(err, CliError::Content(_)));
    }

    #[test]
    fn test_demo_site_builds_with_full_sidebar() {
        let demo = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/symphonyql/score.toml");
        let dir = tempfile::tempdir().unwrap();
        let settings = CliSettings {
            output_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let config = Config::load(Some(&demo), Some(&settings)).unwrap();

        let summary = build_site(&config).unwrap();
        assert_eq!(summary.documents, 7);

        let options = DocumentOptions {
            base_url: config.site.base_url.clone(),
            docs_route: config.site.docs_route.clone(),
            edit_url: None,
        };
        let site = Site::load(
            &config.docs_resolved.source_dir,
            &options,
            &config.sidebar.categories,
        )
        .unwrap();
        let labels: Vec<_> = site
            .sidebar()
            .links()
            .into_iter()
            .map(|link| link.label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "Introduction",
                "Quick Start - Java",
                "Quick Start - Scala",
                "Installing",
                "Defining the Schema - Java",
                "Defining the Schema - Scala",
                "Schema Specification",
            ]
        );
        let manifest = SiteManifest::load(dir.path()).unwrap();
        assert!(manifest.route("/SymphonyQL/docs/schema-scala").is_some());
    }
}
