// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Formatter A: row-wise string concatenation.
//!
//! Each row is formatted into its own line and appended to one growing
//! buffer. The buffer is written in a single call once every row is in.
//! This is the naive baseline: the buffer grows with the row count.

use std::io::Write;

use crate::error::{MatwriteError, MatwriteResult};
use crate::format::RowFormat;
use crate::matrix::Matrix;

/// Build the whole document in memory.
pub fn render(matrix: &Matrix, format: &RowFormat) -> MatwriteResult<String> {
    super::check_columns(matrix, format)?;

    let mut stream = String::new();
    for row in matrix.iter_rows() {
        let mut line = format.render(row)?;
        line.push('\n');
        stream += &line;
    }
    Ok(stream)
}

/// Render the document, then write it to `out` at once.
pub fn write(matrix: &Matrix, format: &RowFormat, out: &mut dyn Write) -> MatwriteResult<()> {
    let stream = render(matrix, format)?;
    out.write_all(stream.as_bytes())
        .map_err(MatwriteError::io("writing concatenated output"))?;
    out.flush().map_err(MatwriteError::io("flushing output"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_line_per_row() {
        let matrix = Matrix::from_rows(vec![vec![0.5], vec![0.25], vec![0.125]]).unwrap();
        let format = RowFormat::parse("%6.3f").unwrap();
        let text = render(&matrix, &format).unwrap();
        assert_eq!(text, " 0.500\n 0.250\n 0.125\n");
    }

    #[test]
    fn test_empty_matrix_renders_nothing() {
        let matrix = Matrix::new(0, 2, Vec::new()).unwrap();
        let format = RowFormat::parse("%f %f").unwrap();
        assert_eq!(render(&matrix, &format).unwrap(), "");
    }
}
