use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::hash_function::HashFunction;
use crate::string_hash::Modulus;

pub const DEFAULT_HASH_SIZE: i32 = 728_570_000;
pub const DEFAULT_DISTINCT_SIZES: [i32; 3] = [100_000, 1_000_000, 10_000_000];

/// Settings for a full hash tester run, usually read from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TesterConfig {
    pub input: PathBuf,
    pub hash_output: PathBuf,
    pub distinct_output: PathBuf,
    pub functions: Vec<HashFunction>,
    pub hash_size: i32,
    pub distinct_sizes: Vec<i32>,
    /// Append to `hash_output` instead of truncating it.
    pub append: bool,
}

impl Default for TesterConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("keys.txt"),
            hash_output: PathBuf::from("hashes.csv"),
            distinct_output: PathBuf::from("distinct.csv"),
            functions: HashFunction::ALL.to_vec(),
            hash_size: DEFAULT_HASH_SIZE,
            distinct_sizes: DEFAULT_DISTINCT_SIZES.to_vec(),
            append: false,
        }
    }
}

impl TesterConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.functions.is_empty(), "at least one hash function is required");
        Modulus::new(self.hash_size).context("invalid hash_size")?;
        for &size in &self.distinct_sizes {
            Modulus::new(size).context("invalid entry in distinct_sizes")?;
        }
        Ok(())
    }
}

pub fn read_config(file_path: impl AsRef<Path>) -> Result<TesterConfig> {
    let file_path = file_path.as_ref();
    let config_data = fs::read_to_string(file_path)
        .with_context(|| format!("unable to read config file {}", file_path.display()))?;
    let config: TesterConfig = serde_json::from_str(&config_data)
        .with_context(|| format!("unable to parse config file {}", file_path.display()))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: TesterConfig = serde_json::from_str(r#"{"input": "words.txt"}"#).unwrap();
        assert_eq!(config.input, PathBuf::from("words.txt"));
        assert_eq!(config.hash_size, DEFAULT_HASH_SIZE);
        assert_eq!(config.distinct_sizes, vec![100_000, 1_000_000, 10_000_000]);
        assert_eq!(config.functions, HashFunction::ALL.to_vec());
        assert!(!config.append);
    }

    #[test]
    fn functions_use_historical_names() {
        let config: TesterConfig =
            serde_json::from_str(r#"{"functions": ["primeHash", "crossHash"]}"#).unwrap();
        assert_eq!(config.functions, vec![HashFunction::Prime, HashFunction::Cross]);
    }

    #[test]
    fn validate_rejects_bad_sizes() {
        let config = TesterConfig {
            distinct_sizes: vec![10, 0],
            ..TesterConfig::default()
        };
        assert!(config.validate().is_err());

        let config = TesterConfig {
            functions: Vec::new(),
            ..TesterConfig::default()
        };
        assert!(config.validate().is_err());

        assert!(TesterConfig::default().validate().is_ok());
    }

    #[test]
    fn read_config_reports_missing_file() {
        let err = read_config("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("unable to read config file"));
    }
}
