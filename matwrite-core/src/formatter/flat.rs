// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Formatter C: flattened single expansion.
//!
//! The row template plus a newline is repeated once per row into one
//! composite template, which is then expanded in a single pass over the
//! flattened matrix. The composite placeholder count must equal the value
//! count exactly; there is no truncation and no padding.

use std::io::Write;

use crate::error::{MatwriteError, MatwriteResult};
use crate::format::RowFormat;
use crate::matrix::Matrix;

/// Repeat `template` plus a newline `rows` times and parse the result.
pub fn composite(template: &str, rows: usize) -> MatwriteResult<RowFormat> {
    let repeated = format!("{}\n", template).repeat(rows);
    Ok(RowFormat::parse(&repeated)?)
}

/// Expand `template` repeated `rows` times over `values` in one call.
pub fn expand(template: &str, rows: usize, values: &[f64]) -> MatwriteResult<String> {
    if rows == 0 {
        if values.is_empty() {
            return Ok(String::new());
        }
        return Err(MatwriteError::ShapeMismatch {
            expected: 0,
            actual: values.len(),
        });
    }

    let composite = composite(template, rows)?;
    composite.render(values)
}

/// Expand the whole matrix and write the result to `out` at once.
pub fn write(matrix: &Matrix, format: &RowFormat, out: &mut dyn Write) -> MatwriteResult<()> {
    let text = expand(format.as_str(), matrix.rows(), matrix.as_flat())?;
    out.write_all(text.as_bytes())
        .map_err(MatwriteError::io("writing expanded output"))?;
    out.flush().map_err(MatwriteError::io("flushing output"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_positional() {
        let text = expand("%.1f|%.1f", 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(text, "1.0|2.0\n3.0|4.0\n");
    }

    #[test]
    fn test_composite_placeholder_count() {
        let format = composite(" %10.4f %10.4f %10.4f %10.4f %10.4f", 100).unwrap();
        assert_eq!(format.placeholders(), 500);
    }

    #[test]
    fn test_too_few_values_fails() {
        let result = expand("%f %f", 3, &[0.0; 5]);
        assert!(matches!(
            result,
            Err(MatwriteError::ShapeMismatch {
                expected: 6,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_too_many_values_fails() {
        let result = expand("%f %f", 3, &[0.0; 7]);
        assert!(matches!(
            result,
            Err(MatwriteError::ShapeMismatch {
                expected: 6,
                actual: 7
            })
        ));
    }

    #[test]
    fn test_zero_rows() {
        assert_eq!(expand("%f", 0, &[]).unwrap(), "");
        assert!(expand("%f", 0, &[1.0]).is_err());
    }

    #[test]
    fn test_only_total_count_matters() {
        // the row template is not checked against the column count
        let matrix = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let format = RowFormat::parse("%.0f %.0f").unwrap();
        let text = expand(format.as_str(), 3, matrix.as_flat()).unwrap();
        assert_eq!(text, "1 2\n3 4\n5 6\n");
    }
}
