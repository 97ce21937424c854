//! Shared configuration types for CLI commands

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Common configuration shared across commands
///
/// Loaded from an optional JSON file, then overridden by command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonConfig {
    /// Random seed for reproducibility
    pub seed: Option<u64>,

    /// Whether to show progress bars
    pub progress: bool,

    /// Verbose output
    pub verbose: bool,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            seed: None,
            progress: true,
            verbose: false,
        }
    }
}

impl CommonConfig {
    /// Read a configuration file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not valid JSON for
    /// this structure.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config file '{}'", path.display()),
            source,
        })?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Load `path` when given, otherwise start from defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply the global command-line switches. Each can only turn its option on.
    ///
    /// Seeds are per-command flags and are merged by the command that takes one.
    pub fn with_flags(mut self, verbose: bool, no_progress: bool) -> Self {
        self.verbose |= verbose;
        if no_progress {
            self.progress = false;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"seed": 17}}"#).unwrap();

        let config = CommonConfig::load(file.path()).unwrap();
        assert_eq!(config.seed, Some(17));
        assert!(config.progress);
        assert!(!config.verbose);
    }

    #[test]
    fn test_flags_override_file() {
        let config = CommonConfig {
            seed: Some(1),
            progress: true,
            verbose: false,
        }
        .with_flags(true, true);

        assert_eq!(config.seed, Some(1));
        assert!(!config.progress);
        assert!(config.verbose);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CommonConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn test_malformed_file_is_serialization_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            CommonConfig::load(file.path()),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_no_path_gives_defaults() {
        assert_eq!(
            CommonConfig::load_or_default(None).unwrap(),
            CommonConfig::default()
        );
    }
}
