// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark runner for the serialization strategies.
//!
//! Strategies run strictly in sequence, each against freshly generated
//! matrices, all writing to the same output path. Any failure aborts the
//! whole run; there are no retries and no partial results.

use tracing::{debug, info, info_span};

use matwrite_core::{
    verify_equivalence, BenchConfig, EquivalenceReport, MatrixGenerator, MatrixRefresh,
    MatwriteError, MatwriteResult, Strategy,
};

use crate::harness::{BenchmarkHarness, GroupSetup};
use crate::metrics::{format_duration, BenchmarkReport, BenchmarkResult, RunSettings, TimingMetrics};

/// Runs every configured strategy through the timing harness.
pub struct FormatterSuite {
    config: BenchConfig,
    warmup: u64,
    keep_samples: bool,
}

impl FormatterSuite {
    pub fn new(config: BenchConfig) -> Self {
        Self {
            config,
            warmup: 0,
            keep_samples: false,
        }
    }

    /// Untimed executions per strategy before measurement.
    pub fn warmup(mut self, iterations: u64) -> Self {
        self.warmup = iterations;
        self
    }

    /// Keep every execution time in the report.
    pub fn keep_samples(mut self, keep: bool) -> Self {
        self.keep_samples = keep;
        self
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Render one seeded matrix with every strategy and require identical bytes.
    pub fn verify(&self) -> MatwriteResult<EquivalenceReport> {
        let seed = self.config.verify_seed();
        let matrix = MatrixGenerator::with_seed(seed).generate(self.config.rows, self.config.cols);
        let report = verify_equivalence(&matrix, &self.config.format)?;
        info!(
            seed,
            bytes = report.bytes,
            lines = report.lines,
            crc32 = report.crc32,
            "All strategies produce identical output"
        );
        Ok(report)
    }

    /// Verify (when enabled), then time each strategy in configured order.
    pub fn run(&self) -> MatwriteResult<BenchmarkReport> {
        let mut report = BenchmarkReport::new(RunSettings::from(&self.config));

        if self.config.verify {
            report.equivalence = Some(self.verify()?);
        }

        for &strategy in &self.config.strategies {
            let timing = self.run_strategy(strategy)?;
            let output_bytes = std::fs::metadata(&self.config.output_path)
                .map_err(MatwriteError::io("reading output file metadata"))?
                .len();

            report.add_result(
                BenchmarkResult::new(strategy, timing, self.config.iterations, self.config.repeat)
                    .with_metadata("label", strategy.label().to_string())
                    .with_metadata("output_bytes", output_bytes),
            );
        }

        Ok(report)
    }

    /// Time one strategy.
    ///
    /// With a configured seed every strategy sees the same matrix sequence.
    pub fn run_strategy(&self, strategy: Strategy) -> MatwriteResult<TimingMetrics> {
        let span = info_span!("strategy", name = %strategy, label = %strategy.label());
        let _guard = span.enter();

        let config = &self.config;
        let harness = BenchmarkHarness::new()
            .warmup(self.warmup)
            .iterations(config.iterations)
            .repeat(config.repeat)
            .keep_samples(self.keep_samples);
        let mode = match config.matrix_refresh {
            MatrixRefresh::PerTrial => GroupSetup::PerIteration,
            MatrixRefresh::PerGroup => GroupSetup::PerGroup,
        };

        info!(
            iterations = config.iterations,
            repeat = config.repeat,
            rows = config.rows,
            cols = config.cols,
            "Running"
        );

        let mut generator = MatrixGenerator::from_optional_seed(config.seed);
        let timings = harness.run_groups(
            mode,
            || generator.generate(config.rows, config.cols),
            |matrix| strategy.write_file(matrix, &config.format, &config.output_path),
        )?;

        let mut metrics = TimingMetrics::from_group_totals(timings.totals_ns, config.iterations);
        if let Some(samples) = timings.samples_ns {
            metrics = metrics.with_samples(samples);
        }

        debug!(groups = ?metrics.group_totals_ns, "Group totals");
        info!(
            min = %format_duration(metrics.min_ns),
            per_iteration = %format_duration(metrics.best_per_iteration_ns),
            "Finished"
        );

        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matwrite_core::ConfigLoader;
    use tempfile::TempDir;

    fn small_config(dir: &TempDir, extra: &str) -> BenchConfig {
        let yaml = format!(
            "rows: 50\niterations: 3\nrepeat: 2\nseed: 11\noutput_path: {}\n{}",
            dir.path().join("test.txt").display(),
            extra
        );
        ConfigLoader::load_string(&yaml).unwrap()
    }

    #[test]
    fn test_run_reports_every_strategy_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let suite = FormatterSuite::new(small_config(&temp_dir, ""));

        let report = suite.run().unwrap();
        let order: Vec<Strategy> = report.results.iter().map(|r| r.strategy).collect();
        assert_eq!(order, Strategy::ALL.to_vec());

        for result in &report.results {
            assert_eq!(result.timing.group_totals_ns.len(), 2);
            assert!(result.timing.min_secs() >= 0.0);
            assert_eq!(result.metadata["output_bytes"], serde_json::json!(50 * 56));
        }

        let bulk = report.result(Strategy::BulkWriter).unwrap();
        assert_eq!(bulk.metadata["label"], serde_json::json!("B"));

        let equivalence = report.equivalence.unwrap();
        assert_eq!(equivalence.lines, 50);
    }

    #[test]
    fn test_last_strategy_leaves_output() {
        let temp_dir = TempDir::new().unwrap();
        let config = small_config(&temp_dir, "strategies: [flat_expansion]\nverify: false");
        let path = config.output_path.clone();

        let report = FormatterSuite::new(config).run().unwrap();
        assert_eq!(report.results.len(), 1);
        assert!(report.equivalence.is_none());
        assert!(report.result(Strategy::Concat).is_none());
        assert!(report.result(Strategy::FlatExpansion).is_some());

        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 50);
    }

    #[test]
    fn test_samples_kept_on_request() {
        let temp_dir = TempDir::new().unwrap();
        let suite = FormatterSuite::new(small_config(&temp_dir, "matrix_refresh: per_group"))
            .keep_samples(true)
            .warmup(1);

        let timing = suite.run_strategy(Strategy::BulkWriter).unwrap();
        assert_eq!(timing.samples.unwrap().len(), 6);
    }

    #[test]
    fn test_unwritable_output_aborts() {
        let temp_dir = TempDir::new().unwrap();
        let yaml = format!(
            "rows: 5\niterations: 2\noutput_path: {}",
            temp_dir.path().join("missing").join("test.txt").display()
        );
        let suite = FormatterSuite::new(ConfigLoader::load_string(&yaml).unwrap());

        assert!(matches!(suite.run(), Err(MatwriteError::Io { .. })));
    }
}
