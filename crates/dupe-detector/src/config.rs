//! Configuration for the detector

use serde::{Deserialize, Serialize};

/// Header written at the top of every annotation comment unless configured
pub const DEFAULT_COMMENT_HEADER: &str = "Potential duplicates detected by dupe.";

/// Smallest corpus worth comparing
pub const MIN_CORPUS_SIZE: usize = 2;

/// Configuration for the detector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Text opening every annotation comment
    ///
    /// Also the marker the tracker looks for when deciding whether an issue
    /// was already annotated, so it must stay stable between runs.
    pub comment_header: String,

    /// Compare and report, but do not write anything back to the tracker
    pub dry_run: bool,
}

impl DetectorConfig {
    /// Create a configuration with the given comment header
    pub fn new(comment_header: impl Into<String>) -> Self {
        Self {
            comment_header: comment_header.into(),
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.comment_header.trim().is_empty() {
            // An empty header is a substring of every comment.
            return Err("comment_header must not be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            comment_header: DEFAULT_COMMENT_HEADER.to_string(),
            dry_run: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DetectorConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.dry_run);
    }

    #[test]
    fn test_blank_header_rejected() {
        assert!(DetectorConfig::new("   ").validate().is_err());
        assert!(DetectorConfig::new("").validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = DetectorConfig::from_toml("dry_run = true").unwrap();
        assert!(config.dry_run);
        assert_eq!(config.comment_header, DEFAULT_COMMENT_HEADER);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = DetectorConfig::new("Possible duplicates:");
        let parsed = DetectorConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_bad_toml() {
        assert!(DetectorConfig::from_toml("dry_run = \"maybe\"").is_err());
    }
}
