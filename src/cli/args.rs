//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Content collections and base-path resolution for a static blog
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the current directory
    #[arg(short = 'C', long, default_value = crate::config::CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Override the base URL prefix (e.g. "/fedaipaca.com")
    #[arg(short, long, global = true)]
    pub base: Option<String>,

    /// Override the site URL; its path becomes the base prefix unless --base is set
    ///
    /// Useful for CI deployments to a project sub-path:
    ///   postbase query --site-url "https://user.github.io/fedaipaca.com"
    #[arg(short = 'U', long = "site-url", global = true, value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Load every collection and report front-matter problems
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },

    /// Print collection entries as JSON
    ///
    /// Each object starts with `id`, `path` and `url`. In `heroImage.src`,
    /// site paths (`/img/a.png`) get the base prefix, document-relative
    /// paths are given from the project root like `path`, and external
    /// URLs pass through.
    #[command(visible_alias = "q")]
    Query {
        #[command(flatten)]
        args: QueryArgs,
    },

    /// Prefix site-relative paths with the base URL
    #[command(visible_alias = "r")]
    Resolve {
        #[command(flatten)]
        args: ResolveArgs,
    },
}

impl Commands {
    /// Whether the command loads collection content.
    pub const fn reads_content(&self) -> bool {
        matches!(self, Self::Check { .. } | Self::Query { .. })
    }
}

/// Check command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Report errors without failing
    #[arg(long, short = 'w')]
    pub warn_only: bool,
}

/// Query command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct QueryArgs {
    /// Collection to query
    #[arg(default_value = "blog")]
    pub collection: String,

    /// Include draft entries in results
    #[arg(short, long)]
    pub drafts: bool,

    /// Only entries carrying this tag
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Only the entry with this id (drafts included)
    #[arg(short, long, conflicts_with = "tag")]
    pub id: Option<String>,

    /// Include the raw markdown body as `body`
    #[arg(short = 'B', long)]
    pub body: bool,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Filter out null/empty values from output
    #[arg(short = 'E', long)]
    pub filter_empty: bool,

    /// Filter output to specific fields (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub fields: Option<Vec<String>>,

    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

/// Resolve command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Site-relative paths, e.g. `/about/`
    #[arg(required = true)]
    pub paths: Vec<String>,
}
