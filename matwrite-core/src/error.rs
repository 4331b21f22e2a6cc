// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Custom error types for matwrite.
//!
//! Explicit enum error types only. No `Box<dyn Error>`, no `anyhow::Result`
//! inside the library - every failure has a named variant.

use std::path::PathBuf;

use thiserror::Error;

use crate::formatter::Strategy;

/// Top-level error type for matrix serialization.
#[derive(Debug, Error)]
pub enum MatwriteError {
    // =========================================================================
    // Format Errors
    // =========================================================================
    #[error("Invalid row format")]
    FormatSpec(#[from] FormatSpecError),

    #[error("Shape mismatch: format expects {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Ragged matrix: row {row} has {actual} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Output of {strategy} diverges from concat at line {line}")]
    OutputMismatch { strategy: Strategy, line: usize },

    // =========================================================================
    // Configuration Errors - Fail-Fast on Invalid Config
    // =========================================================================
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("Configuration validation error")]
    ConfigValidation(#[from] ConfigValidationError),

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while parsing a printf-style row template.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatSpecError {
    #[error("Dangling '%' at byte offset {offset}")]
    DanglingPercent { offset: usize },

    #[error("Unsupported conversion '{conversion}' at byte offset {offset}")]
    UnsupportedConversion { conversion: char, offset: usize },

    #[error("Missing conversion character at byte offset {offset}")]
    MissingConversion { offset: usize },

    #[error("Field {field} overflows at byte offset {offset}")]
    NumberOverflow { field: &'static str, offset: usize },

    #[error("Template contains no conversion specifiers: {template:?}")]
    NoPlaceholders { template: String },
}

/// Configuration values that parsed but cannot be used.
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("Invalid field value: {field} = {value} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Format has {placeholders} placeholders but the matrix has {cols} columns")]
    FormatColumnMismatch { placeholders: usize, cols: usize },

    #[error("Duplicate strategy: {strategy}")]
    DuplicateStrategy { strategy: Strategy },
}

impl MatwriteError {
    /// Wrap an I/O error with a static description of what was being done.
    pub fn io(context: &'static str) -> impl FnOnce(std::io::Error) -> Self {
        move |source| Self::Io { context, source }
    }
}

/// Result type alias using MatwriteError.
pub type MatwriteResult<T> = Result<T, MatwriteError>;
