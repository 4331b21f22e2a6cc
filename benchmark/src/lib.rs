// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! matwrite Benchmarking Framework
//!
//! Times the matrix-to-text serialization strategies against each other.
//!
//! # Strategies
//!
//! - **A / concat**: row-wise string concatenation, written once
//! - **B / bulk_writer**: buffered `savetxt`-style streaming writer
//! - **C / flat_expansion**: one composite template over the flattened matrix
//!
//! # Data Output
//!
//! The suite reports the minimum group time per strategy and can save the
//! full run as JSON.

pub mod harness;
pub mod metrics;
pub mod reporter;
pub mod suite;

pub use harness::{BenchmarkHarness, GroupSetup, GroupTimings, Timer};
pub use metrics::{BenchmarkReport, BenchmarkResult, RunSettings, SystemInfo, TimingMetrics};
pub use reporter::JsonReporter;
pub use suite::FormatterSuite;
