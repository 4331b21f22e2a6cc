// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark harness for running and timing operations.
//!
//! Follows `timeit` semantics: a run is `repeat` groups of `iterations`
//! executions, and a group's figure is the summed time of its executions.
//! Setup work is never timed.

use std::time::{Duration, Instant};

/// When the setup closure runs inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSetup {
    /// Before every execution
    PerIteration,
    /// Once at the start of each group
    PerGroup,
}

/// Timings collected by [`BenchmarkHarness::run_groups`].
#[derive(Debug, Clone, Default)]
pub struct GroupTimings {
    /// Summed operation time of each group in nanoseconds
    pub totals_ns: Vec<u64>,
    /// Every individual execution in nanoseconds, if requested
    pub samples_ns: Option<Vec<u64>>,
}

/// A benchmark harness for measuring operation latency.
pub struct BenchmarkHarness {
    /// Number of untimed executions before measurement
    warmup_iterations: u64,
    /// Executions per repetition group
    measurement_iterations: u64,
    /// Number of repetition groups
    repeat: u64,
    /// Whether to keep raw sample data
    keep_raw_samples: bool,
}

impl BenchmarkHarness {
    /// Create a harness with `timeit`-like defaults: no warmup, 1000
    /// iterations, one group.
    pub fn new() -> Self {
        Self {
            warmup_iterations: 0,
            measurement_iterations: 1000,
            repeat: 1,
            keep_raw_samples: false,
        }
    }

    /// Set the number of warmup iterations.
    pub fn warmup(mut self, iterations: u64) -> Self {
        self.warmup_iterations = iterations;
        self
    }

    /// Set the number of measurement iterations per group.
    pub fn iterations(mut self, iterations: u64) -> Self {
        self.measurement_iterations = iterations;
        self
    }

    /// Set the number of repetition groups.
    pub fn repeat(mut self, repeat: u64) -> Self {
        self.repeat = repeat;
        self
    }

    /// Set whether to keep raw sample data.
    pub fn keep_samples(mut self, keep: bool) -> Self {
        self.keep_raw_samples = keep;
        self
    }

    /// Run `repeat` timed groups of an operation that needs no input.
    pub fn run<E, O>(&self, mut operation: O) -> Result<GroupTimings, E>
    where
        O: FnMut() -> Result<(), E>,
    {
        self.run_groups(GroupSetup::PerGroup, || (), |_| operation())
    }

    /// Run `repeat` timed groups with fresh untimed input for every execution.
    pub fn run_with_setup<I, E, S, O>(&self, setup: S, operation: O) -> Result<GroupTimings, E>
    where
        S: FnMut() -> I,
        O: FnMut(&I) -> Result<(), E>,
    {
        self.run_groups(GroupSetup::PerIteration, setup, operation)
    }

    /// Run `repeat` timed groups.
    ///
    /// `setup` produces the input for `operation` and is excluded from the
    /// measurement. The first error returned by `operation` aborts the run.
    pub fn run_groups<I, E, S, O>(
        &self,
        mode: GroupSetup,
        mut setup: S,
        mut operation: O,
    ) -> Result<GroupTimings, E>
    where
        S: FnMut() -> I,
        O: FnMut(&I) -> Result<(), E>,
    {
        // Warmup phase
        for _ in 0..self.warmup_iterations {
            let input = setup();
            operation(&input)?;
        }

        let mut timings = GroupTimings {
            totals_ns: Vec::with_capacity(self.repeat as usize),
            samples_ns: self.keep_raw_samples.then(|| {
                Vec::with_capacity((self.repeat * self.measurement_iterations) as usize)
            }),
        };

        // Measurement phase
        for _ in 0..self.repeat {
            let mut group_input = match mode {
                GroupSetup::PerGroup => Some(setup()),
                GroupSetup::PerIteration => None,
            };
            let mut total = Duration::ZERO;

            for _ in 0..self.measurement_iterations {
                let input = match group_input.take() {
                    Some(input) => input,
                    None => setup(),
                };

                let timer = Timer::start();
                operation(&input)?;
                let elapsed = timer.elapsed();

                if mode == GroupSetup::PerGroup {
                    group_input = Some(input);
                }

                total += elapsed;
                if let Some(samples) = timings.samples_ns.as_mut() {
                    samples.push(elapsed.as_nanos() as u64);
                }
            }

            timings.totals_ns.push(total.as_nanos() as u64);
        }

        Ok(timings)
    }
}

impl Default for BenchmarkHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Timer for measuring individual operations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Stop the timer and return elapsed nanoseconds.
    pub fn stop(self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }

    /// Stop the timer and return elapsed duration.
    pub fn elapsed(self) -> Duration {
        self.start.elapsed()
    }
}

/// Measure the execution time of a closure.
pub fn measure<F, T>(f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    (result, elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::thread;

    #[test]
    fn test_group_totals() {
        let harness = BenchmarkHarness::new().iterations(5).repeat(3);

        let timings = harness
            .run_groups(
                GroupSetup::PerIteration,
                || (),
                |_| {
                    thread::sleep(Duration::from_micros(100));
                    Ok::<(), Infallible>(())
                },
            )
            .unwrap();

        assert_eq!(timings.totals_ns.len(), 3);
        // Each group runs five 100μs operations
        for total in &timings.totals_ns {
            assert!(*total >= 500_000, "Group total {} < 500μs", total);
        }
        assert!(timings.samples_ns.is_none());
    }

    #[test]
    fn test_setup_is_not_timed() {
        let harness = BenchmarkHarness::new().iterations(3).keep_samples(true);

        let timings = harness
            .run_groups(
                GroupSetup::PerIteration,
                || thread::sleep(Duration::from_millis(20)),
                |_| Ok::<(), Infallible>(()),
            )
            .unwrap();

        let samples = timings.samples_ns.unwrap();
        assert_eq!(samples.len(), 3);
        assert!(timings.totals_ns[0] < 20_000_000);
    }

    #[test]
    fn test_setup_frequency() {
        let harness = BenchmarkHarness::new().warmup(2).iterations(4).repeat(3);

        let mut per_iteration = 0;
        harness
            .run_groups(
                GroupSetup::PerIteration,
                || per_iteration += 1,
                |_| Ok::<(), Infallible>(()),
            )
            .unwrap();
        assert_eq!(per_iteration, 2 + 4 * 3);

        let mut per_group = 0;
        harness
            .run_groups(
                GroupSetup::PerGroup,
                || per_group += 1,
                |_| Ok::<(), Infallible>(()),
            )
            .unwrap();
        assert_eq!(per_group, 2 + 3);
    }

    #[test]
    fn test_error_aborts_run() {
        let harness = BenchmarkHarness::new().iterations(10);
        let mut calls = 0;

        let result = harness.run_groups(
            GroupSetup::PerIteration,
            || (),
            |_| {
                calls += 1;
                if calls == 4 {
                    Err("disk full")
                } else {
                    Ok(())
                }
            },
        );

        assert_eq!(result.unwrap_err(), "disk full");
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_run_without_input() {
        let harness = BenchmarkHarness::new().warmup(1).iterations(4).repeat(2);
        let mut calls = 0;

        let timings = harness
            .run(|| {
                calls += 1;
                Ok::<(), Infallible>(())
            })
            .unwrap();

        assert_eq!(calls, 1 + 4 * 2);
        assert_eq!(timings.totals_ns.len(), 2);
    }

    #[test]
    fn test_run_with_setup_fresh_input() {
        let harness = BenchmarkHarness::new().iterations(3).repeat(2);
        let mut next = 0;
        let mut seen = Vec::new();

        harness
            .run_with_setup(
                || {
                    next += 1;
                    next
                },
                |input| {
                    seen.push(*input);
                    Ok::<(), Infallible>(())
                },
            )
            .unwrap();

        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_timer() {
        let timer = Timer::start();
        thread::sleep(Duration::from_millis(2));
        assert!(timer.stop() >= 2_000_000);

        let timer = Timer::start();
        thread::sleep(Duration::from_millis(2));
        assert!(timer.elapsed() >= Duration::from_millis(2));
    }

    #[test]
    fn test_measure() {
        let (result, duration) = measure(|| {
            thread::sleep(Duration::from_millis(5));
            42
        });

        assert_eq!(result, 42);
        assert!(duration >= Duration::from_millis(5));
    }
}
