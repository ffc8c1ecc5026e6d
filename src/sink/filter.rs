//! Presentation filters for console lines.

use regex::Regex;

use crate::error::{Result, TuneupError};

/// Pattern for the per-percent progress lines printed by `sfc` and `DISM`.
pub const DEFAULT_NOISE_PATTERN: &str = "Verification.*%";

/// A set of regular expressions marking lines the console should not show.
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    patterns: Vec<Regex>,
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self {
            patterns: vec![Regex::new(DEFAULT_NOISE_PATTERN).expect("default pattern is valid")],
        }
    }
}

impl NoiseFilter {
    /// A filter that lets everything through.
    pub fn none() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Compile `patterns`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` naming the first invalid pattern.
    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p.as_ref()).map_err(|e| TuneupError::ConfigValidationError {
                    message: format!("invalid console filter '{}': {}", p.as_ref(), e),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn is_noise(&self, line: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_matches_verification_progress() {
        let filter = NoiseFilter::default();
        assert!(filter.is_noise("Verification 12% complete."));
        assert!(!filter.is_noise("Beginning verification phase of system scan."));
        assert!(!filter.is_noise("Verification complete"));
    }

    #[test]
    fn none_filter_passes_everything() {
        assert!(!NoiseFilter::none().is_noise("Verification 99%"));
    }

    #[test]
    fn from_patterns_compiles_all() {
        let filter = NoiseFilter::from_patterns(&["^\\[=+", "Progress: \\d+"]).unwrap();
        assert!(filter.is_noise("[====      ] 40.0%"));
        assert!(filter.is_noise("Progress: 12"));
        assert!(!filter.is_noise("done"));
    }

    #[test]
    fn from_patterns_rejects_invalid_regex() {
        let err = NoiseFilter::from_patterns(&["(unclosed"]).unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }
}
