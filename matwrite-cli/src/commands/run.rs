// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `matwrite run` command - Time every strategy.

use std::path::Path;

use matwrite_benchmark::{FormatterSuite, JsonReporter};

use crate::RunArgs;

pub fn execute(config_path: Option<&Path>, args: RunArgs) -> anyhow::Result<()> {
    let mut config = super::load_config(config_path, &args.matrix)?;
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(repeat) = args.repeat {
        config.repeat = repeat;
    }
    if args.no_verify {
        config.verify = false;
    }
    let config = config.revalidate()?;

    tracing::info!(
        rows = config.rows,
        cols = config.cols,
        iterations = config.iterations,
        repeat = config.repeat,
        format = %config.format,
        output = %config.output_path.display(),
        "Starting benchmark"
    );

    let suite = FormatterSuite::new(config)
        .warmup(args.warmup)
        .keep_samples(args.keep_samples);
    let report = suite.run()?;

    for result in &report.results {
        println!("{}", result.timing.min_secs());
    }

    if let Some(dir) = args.report_dir {
        let path = JsonReporter::new(&dir)?.save(&report)?;
        tracing::info!(path = %path.display(), "Benchmark report saved");
    }

    Ok(())
}
