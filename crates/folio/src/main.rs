//! Folio CLI - static site toolkit.
//!
//! Provides commands for:
//! - `build`: Write site artifacts (posts, site data, search, demos, sitemap)
//! - `posts`: Print the post listing
//! - `demo`: Decode a demo from a registry
//! - `copy`: Copy text to the clipboard

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, CopyArgs, DemoArgs, PostsArgs};
use output::Output;

/// Folio - static site toolkit.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build site artifacts.
    Build(BuildArgs),
    /// Print the post listing.
    Posts(PostsArgs),
    /// Decode a demo from a registry file.
    Demo(DemoArgs),
    /// Copy text to the clipboard.
    Copy(CopyArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Posts(args) => args.execute(),
        Commands::Demo(args) => args.execute(),
        Commands::Copy(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_verbose_flag() {
        let cli = Cli::try_parse_from(["folio", "posts", "--tags", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Posts(_)));
    }

    #[test]
    fn test_demo_requires_registry_and_src() {
        assert!(Cli::try_parse_from(["folio", "demo", "demos.json"]).is_err());
        assert!(Cli::try_parse_from(["folio", "demo", "demos.json", "a.demo.vue"]).is_ok());
        assert!(
            Cli::try_parse_from(["folio", "demo", "demos.json", "a.demo.vue", "--no-line-numbers"])
                .is_err()
        );
    }
}
