//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ldmeta - structured metadata (JSON-LD) for static pages
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory; config, page and HTML paths are relative to it
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: ldmeta.toml)
    #[arg(short = 'C', long, default_value = "ldmeta.toml")]
    pub config: PathBuf,

    /// Override base URL for the site.
    ///
    /// Useful for CI/CD deployments where the production URL differs from local development.
    ///
    /// Example:
    ///   ldmeta --base-url "https://example.github.io/blog" check pages/*.toml
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Resolve a page's structured data and print it as JSON-LD
    Resolve {
        /// Page data file (.toml or .json)
        page: PathBuf,
    },

    /// Resolve a page's structured data and inject it into an HTML document
    Inject {
        /// Page data file (.toml or .json)
        page: PathBuf,

        /// HTML document the page was rendered to
        html: PathBuf,

        /// Output path (rewrites the document in place if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resolve every given page and report failures
    Check {
        /// Page data files (.toml or .json)
        #[arg(required = true)]
        pages: Vec<PathBuf>,
    },

    /// List the filters available to data references
    Filters,
}
