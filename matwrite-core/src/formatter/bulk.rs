// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Formatter B: bulk array-to-text writer.
//!
//! A `savetxt`-style primitive: rows are streamed through a buffered writer
//! using one reusable scratch line, with optional commented header and
//! footer blocks.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{MatwriteError, MatwriteResult};
use crate::format::RowFormat;
use crate::matrix::Matrix;

/// Options for [`save_txt`] and [`write_txt`].
#[derive(Debug, Clone)]
pub struct SaveTxtOptions {
    /// Per-row template, one placeholder per column
    pub format: RowFormat,
    /// Row terminator
    pub newline: String,
    /// Text written before the data, every line prefixed by `comments`
    pub header: Option<String>,
    /// Text written after the data, every line prefixed by `comments`
    pub footer: Option<String>,
    /// Prefix for header and footer lines
    pub comments: String,
}

impl SaveTxtOptions {
    /// Plain data rows terminated by `\n`.
    pub fn new(format: RowFormat) -> Self {
        Self {
            format,
            newline: "\n".to_string(),
            header: None,
            footer: None,
            comments: "# ".to_string(),
        }
    }

    pub fn newline(mut self, newline: impl Into<String>) -> Self {
        self.newline = newline.into();
        self
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }
}

/// Write `matrix` to `path`, creating or truncating the file.
pub fn save_txt(path: &Path, matrix: &Matrix, options: &SaveTxtOptions) -> MatwriteResult<()> {
    let file = File::create(path).map_err(MatwriteError::io("creating output file"))?;
    write_txt(&mut BufWriter::new(file), matrix, options)
}

/// Stream `matrix` into `out`.
pub fn write_txt(
    out: &mut dyn Write,
    matrix: &Matrix,
    options: &SaveTxtOptions,
) -> MatwriteResult<()> {
    super::check_columns(matrix, &options.format)?;

    if let Some(header) = non_empty(&options.header) {
        write_commented(out, header, options)?;
    }

    let mut line = String::new();
    for row in matrix.iter_rows() {
        line.clear();
        options.format.render_into(&mut line, row)?;
        line.push_str(&options.newline);
        out.write_all(line.as_bytes())
            .map_err(MatwriteError::io("writing row"))?;
    }

    if let Some(footer) = non_empty(&options.footer) {
        write_commented(out, footer, options)?;
    }

    out.flush().map_err(MatwriteError::io("flushing output"))
}

fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|t| !t.is_empty())
}

fn write_commented(
    out: &mut dyn Write,
    text: &str,
    options: &SaveTxtOptions,
) -> MatwriteResult<()> {
    let mut block = String::new();
    for line in text.split('\n') {
        block.push_str(&options.comments);
        block.push_str(line);
        block.push_str(&options.newline);
    }
    out.write_all(block.as_bytes())
        .map_err(MatwriteError::io("writing header or footer"))
}
