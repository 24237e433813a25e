use std::fs;
use std::path::Path;

use inflecta_align::DEFAULT_MAX_LEN;
use serde::{Deserialize, Serialize};

use crate::error::SuffixError;

/// Training and lookup parameters.
///
/// Missing fields fall back to their defaults, so a config file only needs
/// the values it changes:
///
/// ```toml
/// max_suf = 3
/// lowercase = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuffixConfig {
    /// Longest ending indexed by training and tried first by analysis.
    pub max_suf: usize,
    /// Lowercase forms and lemmas before training and words before lookup.
    pub lowercase: bool,
    /// Rules seen at most this many times are pruned.
    pub threshold: u32,
    /// Longest string the aligner accepts, in characters.
    pub max_len: usize,
}

impl Default for SuffixConfig {
    fn default() -> Self {
        Self {
            max_suf: 4,
            lowercase: false,
            threshold: 1,
            max_len: DEFAULT_MAX_LEN,
        }
    }
}

impl SuffixConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, SuffixError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SuffixError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SuffixConfig::default();
        assert_eq!(config.max_suf, 4);
        assert!(!config.lowercase);
        assert_eq!(config.threshold, 1);
        assert_eq!(config.max_len, DEFAULT_MAX_LEN);
    }

    #[test]
    fn test_partial_file() {
        let config = SuffixConfig::from_toml_str("max_suf = 2\nlowercase = true\n").unwrap();
        assert_eq!(
            config,
            SuffixConfig {
                max_suf: 2,
                lowercase: true,
                ..SuffixConfig::default()
            }
        );
        assert_eq!(SuffixConfig::from_toml_str("").unwrap(), SuffixConfig::default());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        assert!(matches!(
            SuffixConfig::from_toml_str("max_suffix = 2"),
            Err(SuffixError::Config(_))
        ));
        assert!(SuffixConfig::from_toml_str("threshold = -1").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("suffix.toml");
        fs::write(&path, "threshold = 0\n").unwrap();
        assert_eq!(SuffixConfig::load(&path).unwrap().threshold, 0);
        assert!(matches!(
            SuffixConfig::load(dir.path().join("missing.toml")),
            Err(SuffixError::Io(_))
        ));
    }
}
