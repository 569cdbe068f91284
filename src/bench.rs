//! Search timing benchmark
//!
//! Runs full searches over random 256-byte messages and reports how long
//! they take, which is what tuning buffer size and difficulty is about.

use std::time::Instant;

use anyhow::Context;
use log::debug;
use serde::Serialize;

use crate::config::PowConfig;
use crate::report::TimingStats;

/// Size of each random benchmark message
pub const MESSAGE_SIZE: usize = 256;

#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub work_buffer_size: usize,
    pub difficulty: u32,
    #[serde(flatten)]
    pub timing: TimingStats,
    pub max_nonce: u32,
    /// Attempts across all samples (sum of nonce + 1)
    pub total_attempts: u64,
}

/// Search `samples` random messages, consulting `should_stop` between attempts
///
/// Returns `Ok(None)` when `should_stop` interrupted a search.
pub fn run<F>(
    config: &PowConfig,
    samples: u32,
    mut should_stop: F,
) -> anyhow::Result<Option<BenchmarkReport>>
where
    F: FnMut() -> bool,
{
    let mut pow = config.solver()?;
    let mut times = Vec::with_capacity(samples as usize);
    let mut max_nonce = 0;
    let mut total_attempts = 0u64;
    let mut message = [0u8; MESSAGE_SIZE];

    for sample in 0..samples {
        getrandom::getrandom(&mut message).context("Failed to generate benchmark message")?;
        let digest = mempow_core::digest(&message);

        let start = Instant::now();
        let Some(solution) = pow.solve_until(&digest, config.difficulty, |_| should_stop()) else {
            return Ok(None);
        };
        let elapsed = start.elapsed().as_secs_f64() * 1000.0;

        debug!(
            "sample {}: nonce {} in {:.1} ms",
            sample, solution.nonce, elapsed
        );

        times.push(elapsed);
        max_nonce = max_nonce.max(solution.nonce);
        total_attempts += u64::from(solution.nonce) + 1;
    }

    Ok(Some(BenchmarkReport {
        work_buffer_size: config.work_buffer_size,
        difficulty: config.difficulty,
        timing: TimingStats::from_millis(&times),
        max_nonce,
        total_attempts,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(difficulty: u32) -> PowConfig {
        PowConfig {
            work_buffer_size: 16 * 1024,
            difficulty,
        }
    }

    #[test]
    fn test_benchmark_zero_difficulty() {
        let report = run(&small_config(0), 5, || false).unwrap().unwrap();

        assert_eq!(report.timing.samples, 5);
        assert_eq!(report.max_nonce, 0);
        assert_eq!(report.total_attempts, 5);
    }

    #[test]
    fn test_benchmark_counts_attempts() {
        let report = run(&small_config(3), 4, || false).unwrap().unwrap();

        assert_eq!(report.timing.samples, 4);
        assert!(report.total_attempts >= 4);
        assert!(report.total_attempts >= u64::from(report.max_nonce) + 1);
    }

    #[test]
    fn test_benchmark_stops() {
        let report = run(&small_config(64), 3, || true).unwrap();
        assert!(report.is_none());
    }

    #[test]
    fn test_benchmark_rejects_invalid_config() {
        assert!(run(&small_config(65), 1, || false).is_err());
    }

    #[test]
    fn test_benchmark_json_flattens_timing() {
        let report = run(&small_config(0), 2, || false).unwrap().unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["samples"], 2);
        assert!(json.get("mean_ms").is_some());
        assert!(json.get("timing").is_none());
    }
}
