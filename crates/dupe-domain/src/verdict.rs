//! Verdict module - structured outcome of one pairwise comparison

use std::fmt;

/// Confidence attached to a duplicate verdict
///
/// Keeps both the numeric percentage and the exact token the oracle wrote,
/// so the rendered probability label (`"87%"`, `"92.5%"`) reproduces the
/// oracle's own spelling rather than a reformatted float.
#[derive(Debug, Clone, PartialEq)]
pub struct Confidence {
    percent: f64,
    token: String,
}

impl Confidence {
    /// Build a confidence from a numeric token such as `"92"` or `"87.5"`
    ///
    /// Returns an error if the token is not a number or falls outside `[0, 100]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dupe_domain::Confidence;
    ///
    /// let c = Confidence::from_token("92").unwrap();
    /// assert_eq!(c.percent(), 92.0);
    /// assert_eq!(c.fraction(), 0.92);
    /// assert_eq!(c.label(), "92%");
    /// ```
    pub fn from_token(token: &str) -> Result<Self, String> {
        let percent: f64 = token
            .parse()
            .map_err(|e| format!("Invalid confidence token '{}': {}", token, e))?;

        if !(0.0..=100.0).contains(&percent) {
            return Err(format!(
                "Confidence {} out of range [0, 100]",
                token
            ));
        }

        Ok(Self {
            percent,
            token: token.to_string(),
        })
    }

    /// Build a confidence from a percentage value
    ///
    /// # Panics
    /// Panics if the value is outside `[0, 100]`
    pub fn from_percent(percent: f64) -> Self {
        assert!(
            (0.0..=100.0).contains(&percent),
            "Confidence must be in [0, 100]"
        );

        Self {
            percent,
            token: percent.to_string(),
        }
    }

    /// Confidence as a percentage in `[0, 100]`
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Confidence as a fraction in `[0, 1]`
    pub fn fraction(&self) -> f64 {
        self.percent / 100.0
    }

    /// Human-readable probability label, e.g. `"87%"`
    pub fn label(&self) -> String {
        format!("{}%", self.token)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.token)
    }
}

/// Parsed decision for one pair of issues
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The oracle judged both issues to be about the same topic
    Duplicate(Confidence),

    /// Anything else
    Distinct,
}

impl Verdict {
    /// Whether this verdict declares a duplicate
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Verdict::Duplicate(_))
    }

    /// Confidence of a duplicate verdict
    pub fn confidence(&self) -> Option<&Confidence> {
        match self {
            Verdict::Duplicate(confidence) => Some(confidence),
            Verdict::Distinct => None,
        }
    }
}
