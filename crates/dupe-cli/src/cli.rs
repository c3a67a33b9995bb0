//! CLI argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Dupe - Find open GitHub issues that describe the same topic.
///
/// Every option can also be given through the environment variable shown,
/// which is how the GitHub Action passes them.
#[derive(Debug, Parser)]
#[command(name = "dupe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Comparison mode: `all` cross-compares every open issue, `new` compares the newest one only
    pub mode: String,

    /// Repository as owner/repo
    #[arg(long, env = "OWNER_REPO")]
    pub repo: Option<String>,

    /// GitHub token
    #[arg(long, env = "PAT", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API root
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Duplicate label definition as JSON, e.g. {"name":"duplicate","color":"cfd3d7"}
    #[arg(long, env = "INPUT_DUPLLABEL")]
    pub label: Option<String>,

    /// Text opening every duplicate comment
    #[arg(long, env = "INPUT_DUPLCMTH")]
    pub comment_header: Option<String>,

    /// File to append the `duplicates-found` output to
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub github_output: Option<PathBuf>,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Chat model used for comparisons
    #[arg(long, env = "OPENAI_MODEL")]
    pub model: Option<String>,

    /// Compare and report without commenting or labelling
    #[arg(long)]
    pub dry_run: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
