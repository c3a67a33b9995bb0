//! One detection run, from parsed arguments to published output.

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::output;
use dupe_detector::{DuplicateDetector, RunReport};
use dupe_domain::Mode;
use dupe_github::GitHubClient;
use dupe_llm::OpenAiOracle;
use tracing::{debug, info};

/// Execute a run.
///
/// The mode is checked before anything touches the network, so a typo in
/// the mode never reaches the tracker or the oracle.
pub fn execute(cli: Cli) -> Result<RunReport> {
    let mode: Mode = cli.mode.parse()?;
    let config = Config::resolve(&cli)?;
    debug!(
        "Mode '{}', repository {}, model {}",
        mode,
        config.repository()?,
        config.oracle.model
    );

    let tracker = GitHubClient::new(
        config.repository()?,
        config.token()?,
        config.annotation.label.clone(),
        config.annotation.comment_header.clone(),
    )?
    .with_api_url(config.github.api_url.clone());

    if !config.annotation.dry_run {
        tracker.ensure_duplicate_label()?;
    }

    let oracle = OpenAiOracle::new(config.api_key()?, config.oracle.model.clone())?
        .with_endpoint(config.oracle.endpoint.clone())
        .with_max_text_length(config.oracle.max_text_length);

    let detector = DuplicateDetector::new(oracle, tracker, config.detector_config());
    let report = detector.run(mode)?;

    output::publish_count(config.output.github_output.as_deref(), report.duplicates_found)?;

    info!(
        "Run complete: {} issues, {} comparisons, {} skipped, {} annotated, {} failed, {} duplicates found",
        report.issues_fetched,
        report.comparisons,
        report.skipped_sources.len(),
        report.commands_applied,
        report.failures.len(),
        report.duplicates_found
    );

    Ok(report)
}
