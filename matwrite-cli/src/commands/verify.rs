// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `matwrite verify` command - Check that all strategies agree.

use std::path::Path;

use matwrite_benchmark::FormatterSuite;

use crate::MatrixArgs;

pub fn execute(config_path: Option<&Path>, args: MatrixArgs) -> anyhow::Result<()> {
    let config = super::load_config(config_path, &args)?;
    let (rows, cols, seed) = (config.rows, config.cols, config.verify_seed());

    let report = FormatterSuite::new(config).verify()?;

    println!("✓ All {} strategies produce identical output", report.strategies.len());
    println!("  Matrix:   {} x {} (seed {})", rows, cols, seed);
    println!("  Bytes:    {}", report.bytes);
    println!("  Lines:    {}", report.lines);
    println!("  CRC32:    {:#010x}", report.crc32);
    Ok(())
}
