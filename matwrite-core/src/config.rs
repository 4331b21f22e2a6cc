// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML benchmark configuration with strict validation.
//!
//! Every field has a default, so an empty document (or no file at all)
//! yields the reference configuration: a 10000 x 5 matrix written 1000 times
//! to `test.txt` under `" %10.4f"` per column.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigValidationError, MatwriteError, MatwriteResult};
use crate::format::RowFormat;
use crate::formatter::Strategy;

pub const DEFAULT_ROWS: usize = 10_000;
pub const DEFAULT_COLS: usize = 5;
pub const DEFAULT_ITERATIONS: u64 = 1000;
pub const DEFAULT_REPEAT: u64 = 1;
pub const DEFAULT_OUTPUT_PATH: &str = "test.txt";

/// Per-column field of the default row template.
const DEFAULT_FIELD: &str = " %10.4f";

/// Joins a single-specifier template repeated across columns.
const FIELD_DELIMITER: &str = " ";

/// Largest matrix a single allocation can hold.
const MAX_CELLS: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// Seed used for the equivalence check when none is configured.
pub const DEFAULT_VERIFY_SEED: u64 = 0x5EED;

/// When the benchmark regenerates its input matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixRefresh {
    /// Fresh matrix before every timed execution
    #[default]
    PerTrial,
    /// One matrix per repetition group
    PerGroup,
}

/// Raw configuration as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBenchConfig {
    #[serde(default = "default_rows")]
    rows: usize,
    #[serde(default = "default_cols")]
    cols: usize,
    #[serde(default = "default_iterations")]
    iterations: u64,
    #[serde(default = "default_repeat")]
    repeat: u64,
    #[serde(default)]
    format: Option<String>,
    #[serde(default = "default_output_path")]
    output_path: String,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default = "default_verify")]
    verify: bool,
    #[serde(default)]
    matrix_refresh: MatrixRefresh,
    #[serde(default = "default_strategies")]
    strategies: Vec<Strategy>,
}

fn default_rows() -> usize {
    DEFAULT_ROWS
}

fn default_cols() -> usize {
    DEFAULT_COLS
}

fn default_iterations() -> u64 {
    DEFAULT_ITERATIONS
}

fn default_repeat() -> u64 {
    DEFAULT_REPEAT
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

fn default_verify() -> bool {
    true
}

fn default_strategies() -> Vec<Strategy> {
    Strategy::ALL.to_vec()
}

impl Default for RawBenchConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            iterations: default_iterations(),
            repeat: default_repeat(),
            format: None,
            output_path: default_output_path(),
            seed: None,
            verify: default_verify(),
            matrix_refresh: MatrixRefresh::default(),
            strategies: default_strategies(),
        }
    }
}

/// Default row template for `cols` columns.
pub fn default_format(cols: usize) -> String {
    DEFAULT_FIELD.repeat(cols)
}

/// Validated benchmark configuration.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub rows: usize,
    pub cols: usize,
    pub iterations: u64,
    pub repeat: u64,
    pub format: RowFormat,
    pub output_path: PathBuf,
    pub seed: Option<u64>,
    pub verify: bool,
    pub matrix_refresh: MatrixRefresh,
    pub strategies: Vec<Strategy>,
}

impl BenchConfig {
    /// The reference configuration (every field at its default).
    pub fn reference() -> MatwriteResult<Self> {
        ConfigLoader::validate(RawBenchConfig::default())
    }

    /// Seed for the equivalence check.
    pub fn verify_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_VERIFY_SEED)
    }

    /// Re-validate after fields were overridden (e.g. from the command line).
    pub fn revalidate(self) -> MatwriteResult<Self> {
        ConfigLoader::validate(RawBenchConfig {
            rows: self.rows,
            cols: self.cols,
            iterations: self.iterations,
            repeat: self.repeat,
            format: Some(self.format.as_str().to_string()),
            output_path: self.output_path.to_string_lossy().into_owned(),
            seed: self.seed,
            verify: self.verify,
            matrix_refresh: self.matrix_refresh,
            strategies: self.strategies,
        })
    }
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> MatwriteResult<BenchConfig> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(MatwriteError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content =
            std::fs::read_to_string(path).map_err(MatwriteError::io("reading config file"))?;

        Self::load_string(&content)
    }

    /// Load and validate configuration from a YAML string.
    pub fn load_string(content: &str) -> MatwriteResult<BenchConfig> {
        if content.trim().is_empty() {
            return Self::validate(RawBenchConfig::default());
        }

        let raw: RawBenchConfig =
            serde_yaml::from_str(content).map_err(|e| MatwriteError::ConfigParse {
                message: format!("YAML parse error: {}", e),
            })?;

        Self::validate(raw)
    }

    /// Validate raw configuration and convert to validated types.
    fn validate(raw: RawBenchConfig) -> MatwriteResult<BenchConfig> {
        Self::require_positive("rows", raw.rows as u64)?;
        Self::require_positive("cols", raw.cols as u64)?;
        Self::require_positive("iterations", raw.iterations)?;
        Self::require_positive("repeat", raw.repeat)?;

        let cells = raw
            .rows
            .checked_mul(raw.cols)
            .filter(|&cells| cells <= MAX_CELLS);
        if cells.is_none() {
            return Err(ConfigValidationError::InvalidFieldValue {
                field: "rows",
                value: raw.rows.to_string(),
                reason: format!("rows x cols must not exceed {} values", MAX_CELLS),
            }
            .into());
        }

        let template = raw.format.unwrap_or_else(|| default_format(raw.cols));
        let format = RowFormat::for_columns(&template, raw.cols, FIELD_DELIMITER).map_err(
            |e| match e {
                MatwriteError::ShapeMismatch { expected, actual } => {
                    MatwriteError::ConfigValidation(ConfigValidationError::FormatColumnMismatch {
                        placeholders: expected,
                        cols: actual,
                    })
                }
                other => other,
            },
        )?;

        if raw.output_path.trim().is_empty() {
            return Err(ConfigValidationError::InvalidFieldValue {
                field: "output_path",
                value: raw.output_path,
                reason: "Output path cannot be empty".to_string(),
            }
            .into());
        }

        if raw.strategies.is_empty() {
            return Err(ConfigValidationError::InvalidFieldValue {
                field: "strategies",
                value: "[]".to_string(),
                reason: "At least one strategy must be selected".to_string(),
            }
            .into());
        }

        let mut seen = std::collections::HashSet::new();
        for &strategy in &raw.strategies {
            if !seen.insert(strategy) {
                return Err(ConfigValidationError::DuplicateStrategy { strategy }.into());
            }
        }

        Ok(BenchConfig {
            rows: raw.rows,
            cols: raw.cols,
            iterations: raw.iterations,
            repeat: raw.repeat,
            format,
            output_path: PathBuf::from(raw.output_path),
            seed: raw.seed,
            verify: raw.verify,
            matrix_refresh: raw.matrix_refresh,
            strategies: raw.strategies,
        })
    }

    fn require_positive(field: &'static str, value: u64) -> MatwriteResult<()> {
        if value == 0 {
            return Err(ConfigValidationError::InvalidFieldValue {
                field,
                value: "0".to_string(),
                reason: "Must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CONFIG: &str = r#"
rows: 200
cols: 3
iterations: 10
repeat: 3
format: "%8.2f,%8.2f,%8.2f"
output_path: /tmp/matwrite.txt
seed: 99
verify: false
matrix_refresh: per_group
strategies: [flat_expansion, concat]
"#;

    #[test]
    fn test_valid_config() {
        let config = ConfigLoader::load_string(VALID_CONFIG).unwrap();
        assert_eq!(config.rows, 200);
        assert_eq!(config.cols, 3);
        assert_eq!(config.repeat, 3);
        assert_eq!(config.format.placeholders(), 3);
        assert_eq!(config.seed, Some(99));
        assert!(!config.verify);
        assert_eq!(config.matrix_refresh, MatrixRefresh::PerGroup);
        assert_eq!(
            config.strategies,
            vec![Strategy::FlatExpansion, Strategy::Concat]
        );
    }

    #[test]
    fn test_defaults_applied() {
        let config = ConfigLoader::load_string("").unwrap();
        assert_eq!(config.rows, 10_000);
        assert_eq!(config.cols, 5);
        assert_eq!(config.iterations, 1000);
        assert_eq!(config.repeat, 1);
        assert_eq!(
            config.format.as_str(),
            " %10.4f %10.4f %10.4f %10.4f %10.4f"
        );
        assert_eq!(config.output_path, PathBuf::from("test.txt"));
        assert!(config.verify);
        assert_eq!(config.strategies, Strategy::ALL.to_vec());
    }

    #[test]
    fn test_default_matches_loader_defaults() {
        let loaded = ConfigLoader::load_string("rows: 10000").unwrap();
        let default = BenchConfig::reference().unwrap();
        assert_eq!(loaded.format, default.format);
        assert_eq!(loaded.iterations, default.iterations);
        assert_eq!(loaded.output_path, default.output_path);
    }

    #[test]
    fn test_default_format_follows_cols() {
        let config = ConfigLoader::load_string("cols: 2").unwrap();
        assert_eq!(config.format.as_str(), " %10.4f %10.4f");
    }

    #[test]
    fn test_zero_rows_rejected() {
        assert!(ConfigLoader::load_string("rows: 0").is_err());
    }

    #[test]
    fn test_oversized_matrix_rejected() {
        let yaml = format!("rows: {}\ncols: 5\nformat: \"%f\"", usize::MAX / 2);
        let result = ConfigLoader::load_string(&yaml);
        assert!(matches!(
            result,
            Err(MatwriteError::ConfigValidation(
                ConfigValidationError::InvalidFieldValue { field: "rows", .. }
            ))
        ));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        assert!(ConfigLoader::load_string("iterations: 0").is_err());
    }

    #[test]
    fn test_format_column_mismatch() {
        let result = ConfigLoader::load_string("cols: 3\nformat: \"%f %f\"");
        assert!(matches!(
            result,
            Err(MatwriteError::ConfigValidation(
                ConfigValidationError::FormatColumnMismatch {
                    placeholders: 2,
                    cols: 3
                }
            ))
        ));
    }

    #[test]
    fn test_single_specifier_spans_columns() {
        let config = ConfigLoader::load_string("format: \"%10.4f\"").unwrap();
        assert_eq!(config.format.placeholders(), 5);
        assert_eq!(config.format.as_str(), "%10.4f %10.4f %10.4f %10.4f %10.4f");
        assert_eq!(
            config.format.render(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(),
            "    1.0000     2.0000     3.0000     4.0000     5.0000"
        );

        let revalidated = config.revalidate().unwrap();
        assert_eq!(revalidated.format.placeholders(), 5);
    }

    #[test]
    fn test_bad_format_rejected() {
        let result = ConfigLoader::load_string("cols: 1\nformat: \"%10.4d\"");
        assert!(matches!(result, Err(MatwriteError::FormatSpec(_))));
    }

    #[test]
    fn test_duplicate_strategy_rejected() {
        let result = ConfigLoader::load_string("strategies: [concat, concat]");
        assert!(matches!(
            result,
            Err(MatwriteError::ConfigValidation(
                ConfigValidationError::DuplicateStrategy { .. }
            ))
        ));
    }

    #[test]
    fn test_empty_strategies_rejected() {
        assert!(ConfigLoader::load_string("strategies: []").is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = ConfigLoader::load_string("row: 10");
        assert!(matches!(result, Err(MatwriteError::ConfigParse { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigLoader::load_file("/nonexistent/matwrite.yaml");
        assert!(matches!(result, Err(MatwriteError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_revalidate_after_override() {
        let mut config = BenchConfig::reference().unwrap();
        config.iterations = 0;
        assert!(config.revalidate().is_err());

        let mut config = BenchConfig::reference().unwrap();
        config.rows = 10;
        assert_eq!(config.revalidate().unwrap().rows, 10);
    }
}
