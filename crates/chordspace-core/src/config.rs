//! Engine configuration loaded from TOML

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tolerance::{DEFAULT_EPSILON_FACTOR, OCTAVE};

/// Tunable parameters of a [`crate::ChordSpace`].
///
/// ```toml
/// epsilon_factor = 1000.0
/// octave = 12.0
/// generator = 1.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChordSpaceConfig {
    /// Multiple of machine epsilon inside which pitches compare equal.
    pub epsilon_factor: f64,
    /// Range of octave equivalence.
    pub octave: f64,
    /// Step of the equal temperament used by tempered transposition.
    pub generator: f64,
}

impl Default for ChordSpaceConfig {
    fn default() -> Self {
        Self {
            epsilon_factor: DEFAULT_EPSILON_FACTOR,
            octave: OCTAVE,
            generator: 1.0,
        }
    }
}

impl ChordSpaceConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        Ok(config.sanitized())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Replaces non-positive or non-finite values with their defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let pick = |name: &str, value: f64, fallback: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                tracing::warn!("Invalid {} {}, using {}", name, value, fallback);
                fallback
            }
        };
        Self {
            epsilon_factor: pick("epsilon_factor", self.epsilon_factor, defaults.epsilon_factor),
            octave: pick("octave", self.octave, defaults.octave),
            generator: pick("generator", self.generator, defaults.generator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChordSpaceError;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = ChordSpaceConfig::from_toml_str("").unwrap();
        assert_eq!(config, ChordSpaceConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = ChordSpaceConfig::from_toml_str("generator = 0.5\n").unwrap();
        assert_eq!(config.generator, 0.5);
        assert_eq!(config.octave, 12.0);
        assert_eq!(config.epsilon_factor, 1000.0);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ChordSpaceConfig::from_toml_str("octave = -12.0\nepsilon_factor = 0.0\n").unwrap();
        assert_eq!(config, ChordSpaceConfig::default());
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let err = ChordSpaceConfig::from_toml_str("octave = \"twelve\"").unwrap_err();
        assert!(matches!(err, ChordSpaceError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = ChordSpaceConfig::load("/nonexistent/chordspace.toml").unwrap_err();
        assert!(matches!(err, ChordSpaceError::Io(_)));
    }
}
