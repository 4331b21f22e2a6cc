// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Matrix-to-text serialization strategies.
//!
//! Three interchangeable ways of turning a [`Matrix`] into delimited text
//! under the same [`RowFormat`]. All three must produce identical bytes.
//!
//! - [`concat`]: grow one string row by row, write once.
//! - [`bulk`]: stream rows through a buffered writer (`savetxt`-style).
//! - [`flat`]: expand one composite template over the flattened values.

pub mod bulk;
pub mod concat;
pub mod flat;

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MatwriteError, MatwriteResult};
use crate::format::RowFormat;
use crate::matrix::Matrix;

pub use bulk::SaveTxtOptions;

/// A serialization strategy under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Formatter A: row-wise string concatenation
    Concat,
    /// Formatter B: bulk array-to-text writer
    BulkWriter,
    /// Formatter C: flattened single expansion
    FlatExpansion,
}

impl Strategy {
    /// Every strategy in reporting order (A, B, C).
    pub const ALL: [Strategy; 3] = [
        Strategy::Concat,
        Strategy::BulkWriter,
        Strategy::FlatExpansion,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Concat => "concat",
            Strategy::BulkWriter => "bulk_writer",
            Strategy::FlatExpansion => "flat_expansion",
        }
    }

    /// Short label: A, B or C.
    pub fn label(self) -> char {
        match self {
            Strategy::Concat => 'A',
            Strategy::BulkWriter => 'B',
            Strategy::FlatExpansion => 'C',
        }
    }

    /// Serialize `matrix` into `out`.
    pub fn write(
        self,
        matrix: &Matrix,
        format: &RowFormat,
        out: &mut dyn Write,
    ) -> MatwriteResult<()> {
        match self {
            Strategy::Concat => concat::write(matrix, format, out),
            Strategy::BulkWriter => {
                bulk::write_txt(out, matrix, &SaveTxtOptions::new(format.clone()))
            }
            Strategy::FlatExpansion => flat::write(matrix, format, out),
        }
    }

    /// Serialize `matrix` to `path`, creating or truncating the file.
    pub fn write_file(
        self,
        matrix: &Matrix,
        format: &RowFormat,
        path: &Path,
    ) -> MatwriteResult<()> {
        match self {
            Strategy::BulkWriter => {
                bulk::save_txt(path, matrix, &SaveTxtOptions::new(format.clone()))
            }
            _ => {
                let mut file =
                    File::create(path).map_err(MatwriteError::io("creating output file"))?;
                self.write(matrix, format, &mut file)
            }
        }
    }

    /// Serialize `matrix` into memory.
    pub fn render(self, matrix: &Matrix, format: &RowFormat) -> MatwriteResult<Vec<u8>> {
        let mut out = Vec::new();
        self.write(matrix, format, &mut out)?;
        Ok(out)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "concat" | "a" => Ok(Strategy::Concat),
            "bulk_writer" | "bulk" | "b" => Ok(Strategy::BulkWriter),
            "flat_expansion" | "flat" | "c" => Ok(Strategy::FlatExpansion),
            other => Err(format!(
                "unknown strategy '{}' (expected concat, bulk_writer or flat_expansion)",
                other
            )),
        }
    }
}

/// Check that `format` has one placeholder per matrix column.
pub(crate) fn check_columns(matrix: &Matrix, format: &RowFormat) -> MatwriteResult<()> {
    if format.placeholders() != matrix.cols() {
        return Err(MatwriteError::ShapeMismatch {
            expected: format.placeholders(),
            actual: matrix.cols(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scenario() -> (Matrix, RowFormat) {
        let matrix = Matrix::from_rows(vec![
            vec![1.5, 2.25],
            vec![0.1, 100.0],
            vec![-3.333, 0.0001],
        ])
        .unwrap();
        let format = RowFormat::parse("%10.4f %10.4f").unwrap();
        (matrix, format)
    }

    const EXPECTED: &str = "    1.5000     2.2500\n    0.1000   100.0000\n   -3.3330     0.0001\n";

    #[test]
    fn test_every_strategy_renders_scenario() {
        let (matrix, format) = scenario();
        for strategy in Strategy::ALL {
            let text = String::from_utf8(strategy.render(&matrix, &format).unwrap()).unwrap();
            assert_eq!(text, EXPECTED, "strategy {}", strategy);
        }
    }

    #[test]
    fn test_every_strategy_writes_file() {
        let (matrix, format) = scenario();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.txt");

        for strategy in Strategy::ALL {
            strategy.write_file(&matrix, &format, &path).unwrap();
            assert_eq!(std::fs::read_to_string(&path).unwrap(), EXPECTED);
        }
    }

    #[test]
    fn test_column_mismatch_rejected() {
        let (matrix, _) = scenario();
        let format = RowFormat::parse("%10.4f").unwrap();
        for strategy in Strategy::ALL {
            assert!(matches!(
                strategy.render(&matrix, &format),
                Err(MatwriteError::ShapeMismatch { .. })
            ));
        }
    }

    #[test]
    fn test_strategy_names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>().unwrap(), strategy);
        }
        assert_eq!("B".parse::<Strategy>().unwrap(), Strategy::BulkWriter);
        assert!("numpy".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_order_and_labels() {
        let labels: String = Strategy::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, "ABC");
    }
}
