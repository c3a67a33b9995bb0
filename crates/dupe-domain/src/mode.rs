//! Mode module - the two comparison topologies

use std::fmt;
use std::str::FromStr;

/// Comparison topology for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Cross-compare every open issue against every later one (`"all"`)
    Full,

    /// Compare only the newest issue against the rest (`"new"`)
    Star,
}

impl Mode {
    /// Get the selector string for this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Full => "all",
            Mode::Star => "new",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for any selector other than `all` or `new`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedMode(pub String);

impl fmt::Display for UnsupportedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unsupported mode {}, abort", self.0)
    }
}

impl std::error::Error for UnsupportedMode {}

impl FromStr for Mode {
    type Err = UnsupportedMode;

    /// Selectors are matched exactly; `"All"` is not `"all"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Mode::Full),
            "new" => Ok(Mode::Star),
            other => Err(UnsupportedMode(other.to_string())),
        }
    }
}
