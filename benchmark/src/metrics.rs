// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Metrics types for benchmark results.
//!
//! The only aggregate computed is the minimum: the best group total is the
//! figure a strategy is judged by.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use sysinfo::System;

use matwrite_core::{BenchConfig, EquivalenceReport, MatrixRefresh, Strategy};

/// Timing of one strategy across its repetition groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingMetrics {
    /// Best (lowest) group total in nanoseconds
    pub min_ns: u64,
    /// Best group total divided by the iterations in that group
    pub best_per_iteration_ns: u64,
    /// Summed execution time of each group in nanoseconds
    pub group_totals_ns: Vec<u64>,
    /// Raw per-execution samples (optional, may be truncated)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples: Option<Vec<u64>>,
}

impl TimingMetrics {
    /// Build metrics from group totals (in nanoseconds).
    pub fn from_group_totals(group_totals_ns: Vec<u64>, iterations: u64) -> Self {
        let min_ns = group_totals_ns.iter().copied().min().unwrap_or(0);
        Self {
            min_ns,
            best_per_iteration_ns: if iterations == 0 { 0 } else { min_ns / iterations },
            group_totals_ns,
            samples: None,
        }
    }

    /// Attach raw samples, downsampled when very large.
    pub fn with_samples(mut self, samples: Vec<u64>) -> Self {
        let len = samples.len();
        self.samples = Some(if len > 10000 {
            samples.into_iter().step_by(len / 1000).collect()
        } else {
            samples
        });
        self
    }

    /// Best group total in seconds.
    pub fn min_secs(&self) -> f64 {
        self.min_ns as f64 / 1_000_000_000.0
    }
}

/// Format a duration in human-readable form (auto-selects ns/μs/ms/s).
pub fn format_duration(ns: u64) -> String {
    if ns < 1_000 {
        format!("{}ns", ns)
    } else if ns < 1_000_000 {
        format!("{:.2}μs", ns as f64 / 1_000.0)
    } else if ns < 1_000_000_000 {
        format!("{:.2}ms", ns as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", ns as f64 / 1_000_000_000.0)
    }
}

/// System information captured at benchmark time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system name
    pub os: String,
    /// OS version
    pub os_version: String,
    /// Kernel version (Linux)
    pub kernel_version: Option<String>,
    /// CPU model name
    pub cpu_model: String,
    /// Number of CPU cores
    pub cpu_cores: usize,
    /// Total system memory in bytes
    pub memory_bytes: u64,
    /// Hostname
    pub hostname: String,
}

impl SystemInfo {
    /// Collect current system information.
    pub fn collect() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();

        Self {
            os: System::name().unwrap_or_else(|| "Unknown".to_string()),
            os_version: System::os_version().unwrap_or_else(|| "Unknown".to_string()),
            kernel_version: System::kernel_version(),
            cpu_model: sys
                .cpus()
                .first()
                .map(|cpu| cpu.brand().to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            cpu_cores: sys.cpus().len(),
            memory_bytes: sys.total_memory(),
            hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// Serializable echo of the configuration a suite ran with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSettings {
    pub rows: usize,
    pub cols: usize,
    pub iterations: u64,
    pub repeat: u64,
    pub format: String,
    pub output_path: String,
    pub seed: Option<u64>,
    pub matrix_refresh: MatrixRefresh,
}

impl From<&BenchConfig> for RunSettings {
    fn from(config: &BenchConfig) -> Self {
        Self {
            rows: config.rows,
            cols: config.cols,
            iterations: config.iterations,
            repeat: config.repeat,
            format: config.format.as_str().to_string(),
            output_path: config.output_path.display().to_string(),
            seed: config.seed,
            matrix_refresh: config.matrix_refresh,
        }
    }
}

/// A single strategy's benchmark result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Name of the benchmark
    pub name: String,
    /// Strategy under test
    pub strategy: Strategy,
    pub timing: TimingMetrics,
    /// Executions per group
    pub iterations: u64,
    /// Number of groups
    pub repeat: u64,
    /// Additional metadata specific to this benchmark
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl BenchmarkResult {
    pub fn new(strategy: Strategy, timing: TimingMetrics, iterations: u64, repeat: u64) -> Self {
        Self {
            name: format!("{}_{}", strategy.label(), strategy.name()).to_lowercase(),
            strategy,
            timing,
            iterations,
            repeat,
            metadata: HashMap::new(),
        }
    }

    /// Add metadata to the result. Values that fail to serialize are skipped.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(value) = serde_json::to_value(value) {
            self.metadata.insert(key.into(), value);
        }
        self
    }
}

/// Complete benchmark suite report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Suite identifier
    pub benchmark_suite: String,
    /// Framework version
    pub version: String,
    /// Timestamp when benchmarks were run
    pub timestamp: DateTime<Utc>,
    /// System information
    pub system_info: SystemInfo,
    pub settings: RunSettings,
    /// Output fingerprint all strategies agreed on (when verified)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equivalence: Option<EquivalenceReport>,
    /// Individual benchmark results, in strategy order
    pub results: Vec<BenchmarkResult>,
}

impl BenchmarkReport {
    /// Create a new benchmark report.
    pub fn new(settings: RunSettings) -> Self {
        Self {
            benchmark_suite: "matwrite-formatters".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            system_info: SystemInfo::collect(),
            settings,
            equivalence: None,
            results: Vec::new(),
        }
    }

    /// Add a result to the report.
    pub fn add_result(&mut self, result: BenchmarkResult) {
        self.results.push(result);
    }

    /// Result for `strategy`, if it ran.
    pub fn result(&self, strategy: Strategy) -> Option<&BenchmarkResult> {
        self.results.iter().find(|r| r.strategy == strategy)
    }
}
