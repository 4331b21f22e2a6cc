// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Output equivalence check across strategies.
//!
//! Every strategy renders the same matrix into memory and is compared
//! byte-for-byte against the concat output.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MatwriteError, MatwriteResult};
use crate::format::RowFormat;
use crate::formatter::Strategy;
use crate::matrix::Matrix;

/// Fingerprint of the output every strategy agreed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalenceReport {
    pub strategies: Vec<Strategy>,
    pub bytes: usize,
    pub lines: usize,
    pub crc32: u32,
}

/// Render `matrix` with every strategy and require identical output.
pub fn verify_equivalence(matrix: &Matrix, format: &RowFormat) -> MatwriteResult<EquivalenceReport> {
    verify_strategies(&Strategy::ALL, matrix, format)
}

/// Like [`verify_equivalence`] for a subset of strategies.
///
/// The first strategy in `strategies` is the reference.
pub fn verify_strategies(
    strategies: &[Strategy],
    matrix: &Matrix,
    format: &RowFormat,
) -> MatwriteResult<EquivalenceReport> {
    let Some((&reference, rest)) = strategies.split_first() else {
        return Ok(EquivalenceReport {
            strategies: Vec::new(),
            bytes: 0,
            lines: 0,
            crc32: crc32fast::hash(&[]),
        });
    };

    let expected = reference.render(matrix, format)?;
    let expected_crc = crc32fast::hash(&expected);
    debug!(strategy = %reference, bytes = expected.len(), crc32 = expected_crc, "Rendered");

    for &strategy in rest {
        let output = strategy.render(matrix, format)?;
        let crc32 = crc32fast::hash(&output);
        debug!(strategy = %strategy, bytes = output.len(), crc32, "Rendered");

        if crc32 != expected_crc || output != expected {
            return Err(MatwriteError::OutputMismatch {
                strategy,
                line: first_differing_line(&expected, &output),
            });
        }
    }

    Ok(EquivalenceReport {
        strategies: strategies.to_vec(),
        bytes: expected.len(),
        lines: expected.iter().filter(|&&b| b == b'\n').count(),
        crc32: expected_crc,
    })
}

/// 1-based line number of the first byte where `a` and `b` differ.
pub fn first_differing_line(a: &[u8], b: &[u8]) -> usize {
    let common = a
        .iter()
        .zip(b.iter())
        .position(|(x, y)| x != y)
        .unwrap_or_else(|| a.len().min(b.len()));
    1 + a[..common].iter().filter(|&&byte| byte == b'\n').count()
}
