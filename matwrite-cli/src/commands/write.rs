// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `matwrite write` command - Serialize one matrix with one strategy.

use std::path::Path;

use anyhow::anyhow;
use matwrite_benchmark::harness::measure;
use matwrite_benchmark::metrics::format_duration;
use matwrite_core::{MatrixGenerator, Strategy};

use crate::MatrixArgs;

pub fn execute(config_path: Option<&Path>, strategy: &str, args: MatrixArgs) -> anyhow::Result<()> {
    let strategy: Strategy = strategy.parse().map_err(|e: String| anyhow!(e))?;
    let config = super::load_config(config_path, &args)?;

    let matrix = MatrixGenerator::from_optional_seed(config.seed).generate(config.rows, config.cols);
    let (result, elapsed) =
        measure(|| strategy.write_file(&matrix, &config.format, &config.output_path));
    result?;

    tracing::info!(
        strategy = %strategy,
        elapsed = %format_duration(elapsed.as_nanos() as u64),
        "Matrix written"
    );
    println!(
        "✓ Wrote {} x {} matrix to {} ({})",
        config.rows,
        config.cols,
        config.output_path.display(),
        strategy
    );
    Ok(())
}
