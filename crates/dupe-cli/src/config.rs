//! Configuration management for the CLI.
//!
//! Values come from an optional TOML file, then command-line flags and their
//! environment fallbacks override whatever the file set.

use crate::cli::Cli;
use crate::error::{CliError, Result};
use dupe_detector::{DetectorConfig, DEFAULT_COMMENT_HEADER};
use dupe_github::{LabelDefinition, DEFAULT_API_URL};
use dupe_llm::openai::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use dupe_llm::MAX_TEXT_LENGTH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Issue tracker settings
    #[serde(default)]
    pub github: GitHubSettings,

    /// Similarity oracle settings
    #[serde(default)]
    pub oracle: OracleSettings,

    /// What gets written on duplicate issues
    #[serde(default)]
    pub annotation: AnnotationSettings,

    /// Where the run result is published
    #[serde(default)]
    pub output: OutputSettings,
}

/// Issue tracker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubSettings {
    /// API root
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Repository as owner/repo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    /// Access token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Similarity oracle settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleSettings {
    /// Chat-completions endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Characters kept from each title and body
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
}

/// Annotation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationSettings {
    /// Duplicate label to look for and create
    #[serde(default)]
    pub label: LabelDefinition,

    /// Text opening every duplicate comment
    #[serde(default = "default_comment_header")]
    pub comment_header: String,

    /// Detect without writing back
    #[serde(default)]
    pub dry_run: bool,
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    /// File the `duplicates-found` line is appended to; stdout when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_output: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Build the configuration for a run: file (if any), then CLI overrides.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli)?;
        config.validate()?;
        Ok(config)
    }

    /// Override file values with the ones given on the command line or environment.
    pub fn apply_cli(&mut self, cli: &Cli) -> Result<()> {
        if let Some(repo) = &cli.repo {
            self.github.repository = Some(repo.clone());
        }
        if let Some(token) = &cli.token {
            self.github.token = Some(token.clone());
        }
        if let Some(api_url) = &cli.api_url {
            self.github.api_url = api_url.clone();
        }
        if let Some(label) = &cli.label {
            self.annotation.label = LabelDefinition::from_json(label)?;
        }
        if let Some(header) = &cli.comment_header {
            self.annotation.comment_header = header.clone();
        }
        if cli.dry_run {
            self.annotation.dry_run = true;
        }
        if let Some(path) = &cli.github_output {
            self.output.github_output = Some(path.clone());
        }
        if let Some(key) = &cli.openai_api_key {
            self.oracle.api_key = Some(key.clone());
        }
        if let Some(model) = &cli.model {
            self.oracle.model = model.clone();
        }
        Ok(())
    }

    /// Check that everything a run needs is present.
    pub fn validate(&self) -> Result<()> {
        self.repository()?;
        self.token()?;
        self.api_key()?;
        if self.oracle.max_text_length == 0 {
            return Err(CliError::Config(
                "oracle.max_text_length must be greater than 0".into(),
            ));
        }
        self.detector_config().validate().map_err(CliError::Config)
    }

    /// Repository as owner/repo.
    pub fn repository(&self) -> Result<&str> {
        required(&self.github.repository, "repository (--repo / OWNER_REPO)")
    }

    /// GitHub token.
    pub fn token(&self) -> Result<&str> {
        required(&self.github.token, "GitHub token (--token / PAT)")
    }

    /// OpenAI API key.
    pub fn api_key(&self) -> Result<&str> {
        required(
            &self.oracle.api_key,
            "OpenAI API key (--openai-api-key / OPENAI_API_KEY)",
        )
    }

    /// Detector settings derived from this configuration.
    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            comment_header: self.annotation.comment_header.clone(),
            dry_run: self.annotation.dry_run,
        }
    }
}

fn required<'a>(value: &'a Option<String>, what: &str) -> Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CliError::Config(format!("missing {}", what))),
    }
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            repository: None,
            token: None,
        }
    }
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            max_text_length: default_max_text_length(),
        }
    }
}

impl Default for AnnotationSettings {
    fn default() -> Self {
        Self {
            label: LabelDefinition::default(),
            comment_header: default_comment_header(),
            dry_run: false,
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_text_length() -> usize {
    MAX_TEXT_LENGTH
}

fn default_comment_header() -> String {
    DEFAULT_COMMENT_HEADER.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["dupe", "all"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn complete() -> Config {
        let mut config = Config::default();
        config.github.repository = Some("octo/repo".into());
        config.github.token = Some("ghp_x".into());
        config.oracle.api_key = Some("sk-x".into());
        config
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(
            config.oracle.endpoint,
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(config.oracle.model, "gpt-4o-mini");
        assert_eq!(config.oracle.max_text_length, 500);
        assert_eq!(config.annotation.label.name, "duplicate");
        assert_eq!(
            config.annotation.comment_header,
            "Potential duplicates detected by dupe."
        );
        assert!(config.output.github_output.is_none());
    }

    #[test]
    fn test_default_config_is_incomplete() {
        assert!(matches!(
            Config::default().validate(),
            Err(CliError::Config(_))
        ));
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_blank_secret_is_missing() {
        let mut config = complete();
        config.github.token = Some("  ".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_text_length_rejected() {
        let mut config = complete();
        config.oracle.max_text_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[github]
repository = "octo/repo"
token = "ghp_file"

[oracle]
model = "gpt-4o"
api_key = "sk-file"
max_text_length = 200

[annotation]
comment_header = "Possible duplicates:"
label = {{ name = "dup", color = "ff0000" }}

[output]
github_output = "/tmp/out"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.repository().unwrap(), "octo/repo");
        assert_eq!(config.oracle.model, "gpt-4o");
        assert_eq!(config.oracle.max_text_length, 200);
        assert_eq!(config.oracle.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.annotation.label.name, "dup");
        assert_eq!(config.annotation.comment_header, "Possible duplicates:");
        assert_eq!(config.output.github_output, Some(PathBuf::from("/tmp/out")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Config::load(Path::new("/nonexistent/dupe.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn test_bad_toml_is_rejected() {
        assert!(matches!(
            Config::from_toml("[oracle]\nmax_text_length = \"long\""),
            Err(CliError::Toml(_))
        ));
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = Config::from_toml(
            "[github]\nrepository = \"file/repo\"\n[oracle]\nmodel = \"gpt-4o\"",
        )
        .unwrap();

        config
            .apply_cli(&cli(&[
                "--repo",
                "cli/repo",
                "--label",
                r#"{"name":"same-topic"}"#,
                "--comment-header",
                "Heads up:",
                "--dry-run",
            ]))
            .unwrap();

        assert_eq!(config.repository().unwrap(), "cli/repo");
        assert_eq!(config.annotation.label.name, "same-topic");
        assert!(config.annotation.label.color.is_none());
        assert_eq!(config.annotation.comment_header, "Heads up:");
        assert!(config.annotation.dry_run);
        assert!(config.detector_config().dry_run);
    }

    #[test]
    fn test_bad_label_json_is_rejected() {
        let mut config = Config::default();
        let result = config.apply_cli(&cli(&["--label", "duplicate"]));
        assert!(matches!(result, Err(CliError::GitHub(_))));
    }
}
