// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! matwrite Core Library
//!
//! Serializes numeric matrices to fixed-width delimited text. Provides the
//! matrix type and its random generator, a printf-style row template
//! engine, three interchangeable serialization strategies, an output
//! equivalence check, and the YAML benchmark configuration.

pub mod config;
pub mod error;
pub mod format;
pub mod formatter;
pub mod matrix;
pub mod verify;

// Re-export commonly used types
pub use config::{BenchConfig, ConfigLoader, MatrixRefresh};
pub use error::{ConfigValidationError, FormatSpecError, MatwriteError, MatwriteResult};
pub use format::RowFormat;
pub use formatter::{SaveTxtOptions, Strategy};
pub use matrix::{Matrix, MatrixGenerator};
pub use verify::{verify_equivalence, EquivalenceReport};
