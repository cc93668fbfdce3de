//! `folio build` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_content::FsContentSource;
use folio_site::SiteBuilder;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for artifacts (default: .folio/dist/).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Sitemap hostname (overrides config).
    #[arg(long, env = "FOLIO_HOSTNAME")]
    hostname: Option<String>,

    /// Compile Sass/SCSS in demo code (overrides config).
    #[arg(long)]
    playground: Option<bool>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            hostname: self.hostname,
            playground: self.playground,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let source_dir = config.paths_resolved.source_dir.clone();
        if !source_dir.is_dir() {
            return Err(CliError::Validation(format!(
                "Source directory not found: {}",
                source_dir.display()
            )));
        }

        output.info(&format!("Source: {}", source_dir.display()));
        output.info(&format!(
            "Output: {}",
            config.paths_resolved.output_dir.display()
        ));

        let source = FsContentSource::new(source_dir, config.posts.dir.clone());
        let report = SiteBuilder::new(&config).build(&source)?;

        output.info(&format!(
            "{} posts, {} tags, {} demos",
            report.posts, report.tags, report.demos
        ));
        match report.sitemap_urls {
            Some(urls) => output.info(&format!("Sitemap: {urls} URLs")),
            None => output.warning("Sitemap skipped: no hostname configured"),
        }
        output.success(&format!(
            "Built {} artifacts to {}",
            report.artifacts.len(),
            report.output_dir.display()
        ));
        Ok(())
    }
}
