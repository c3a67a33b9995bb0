//! Run output publication.
//!
//! GitHub Actions collects step outputs from the file named by
//! `GITHUB_OUTPUT`, one `name=value` line each.

use crate::error::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Output name for the number of annotated relations
pub const DUPLICATES_FOUND: &str = "duplicates-found";

/// Render one output line.
pub fn output_line(name: &str, value: impl std::fmt::Display) -> String {
    format!("{}={}", name, value)
}

/// Publish `duplicates-found=<count>`.
///
/// Appends to `path` when given (creating the file if needed), otherwise
/// prints to stdout.
pub fn publish_count(path: Option<&Path>, count: usize) -> Result<()> {
    let line = output_line(DUPLICATES_FOUND, count);

    match path {
        Some(path) => {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{}", line)?;
        }
        None => println!("{}", line),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_output_line() {
        assert_eq!(output_line(DUPLICATES_FOUND, 3), "duplicates-found=3");
    }

    #[test]
    fn test_appends_to_existing_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "other-output=yes").unwrap();

        publish_count(Some(file.path()), 2).unwrap();

        let contents = fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents, "other-output=yes\nduplicates-found=2\n");
    }

    #[test]
    fn test_creates_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("github_output");

        publish_count(Some(&path), 0).unwrap();
        publish_count(Some(&path), 1).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "duplicates-found=0\nduplicates-found=1\n");
    }

    #[test]
    fn test_unwritable_path_is_error() {
        let dir = tempdir().unwrap();
        assert!(publish_count(Some(dir.path()), 1).is_err());
    }
}
