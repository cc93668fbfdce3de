//! `folio posts` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_content::FsContentSource;
use folio_posts::{PostSummary, load_posts};
use folio_site::posts_options;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the posts command.
#[derive(Args)]
pub(crate) struct PostsArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Print tag statistics.
    #[arg(long)]
    tags: bool,

    /// Print only featured posts.
    #[arg(long)]
    featured: bool,
}

impl PostsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let source = FsContentSource::new(
            config.paths_resolved.source_dir.clone(),
            config.posts.dir.clone(),
        );
        let data = load_posts(&source, &posts_options(&config.posts))?;

        let posts = if self.featured {
            &data.featured
        } else {
            &data.posts
        };
        if posts.is_empty() {
            output.warning("No posts found");
        }
        for post in posts {
            print_post(&output, post);
        }

        if self.tags {
            output.separator();
            for name in &data.tags.names {
                let count = data.tags.stats.get(name).copied().unwrap_or_default();
                output.line(&format!("{name} ({count})"));
            }
        }
        Ok(())
    }
}

fn print_post(output: &Output, post: &PostSummary) {
    let title = post.title.as_deref().unwrap_or("(untitled)");
    let date = post.date.iso.as_deref().unwrap_or("----------");
    let marker = if post.featured { " *" } else { "" };

    output.highlight(&format!("{date}  {title}{marker}"));
    output.detail(&format!(
        "            {} by {} [{}]",
        post.href,
        post.author,
        post.tags.join(", ")
    ));
    if !post.excerpt.is_empty() {
        output.line(&format!("            {}", post.excerpt));
    }
}
