//! Serializable results for `--json` output

use mempow_core::{leading_zero_bits, Solution};
use serde::Serialize;

use crate::config::PowConfig;
use crate::message::Challenge;

/// Outcome of a nonce search
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub digest: String,
    pub work_buffer_size: usize,
    pub difficulty: u32,
    pub nonce: u32,
    pub result: String,
    pub leading_zeros: u32,
    pub elapsed_ms: u64,
}

impl SearchReport {
    pub fn new(
        challenge: &Challenge,
        config: &PowConfig,
        solution: &Solution,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            digest: challenge.digest_hex(),
            work_buffer_size: config.work_buffer_size,
            difficulty: config.difficulty,
            nonce: solution.nonce,
            result: format!("{:016x}", solution.result),
            leading_zeros: solution.leading_zeros(),
            elapsed_ms,
        }
    }
}

/// Outcome of checking one nonce
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub digest: String,
    pub work_buffer_size: usize,
    pub difficulty: u32,
    pub nonce: u32,
    pub result: String,
    pub leading_zeros: u32,
    pub valid: bool,
}

impl VerifyReport {
    /// Build from the accumulated result of the attempt at `nonce`
    pub fn new(challenge: &Challenge, config: &PowConfig, nonce: u32, result: u64) -> Self {
        let leading_zeros = leading_zero_bits(result);
        Self {
            digest: challenge.digest_hex(),
            work_buffer_size: config.work_buffer_size,
            difficulty: config.difficulty,
            nonce,
            result: format!("{:016x}", result),
            leading_zeros,
            valid: leading_zeros >= config.difficulty,
        }
    }
}

/// Wall-time statistics over a set of searches
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingStats {
    pub samples: usize,
    pub mean_ms: f64,
    /// Sample standard deviation (0 with fewer than two samples)
    pub stddev_ms: f64,
}

impl TimingStats {
    pub fn from_millis(times: &[f64]) -> Self {
        let n = times.len() as f64;
        if times.is_empty() {
            return Self {
                samples: 0,
                mean_ms: 0.0,
                stddev_ms: 0.0,
            };
        }

        let s1: f64 = times.iter().sum();
        let s2: f64 = times.iter().map(|t| t * t).sum();
        let mean_ms = s1 / n;
        let stddev_ms = if times.len() < 2 {
            0.0
        } else {
            ((n * s2 - s1 * s1) / (n * (n - 1.0))).max(0.0).sqrt()
        };

        Self {
            samples: times.len(),
            mean_ms,
            stddev_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_stats() {
        let stats = TimingStats::from_millis(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stats.samples, 8);
        assert!((stats.mean_ms - 5.0).abs() < 1e-9);
        // Sample variance is 32 / 7
        assert!((stats.stddev_ms - (32.0f64 / 7.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_timing_stats_small_samples() {
        assert_eq!(TimingStats::from_millis(&[]).samples, 0);

        let single = TimingStats::from_millis(&[3.5]);
        assert_eq!(single.mean_ms, 3.5);
        assert_eq!(single.stddev_ms, 0.0);
    }

    #[test]
    fn test_verify_report_validity() {
        let challenge = Challenge::new(b"report".to_vec());
        let config = PowConfig {
            work_buffer_size: 1024,
            difficulty: 8,
        };

        let passing = VerifyReport::new(&challenge, &config, 3, 0x00FF_FFFF_FFFF_FFFF);
        assert!(passing.valid);
        assert_eq!(passing.leading_zeros, 8);
        assert_eq!(passing.result, "00ffffffffffffff");

        let failing = VerifyReport::new(&challenge, &config, 3, 0x01FF_FFFF_FFFF_FFFF);
        assert!(!failing.valid);
    }

    #[test]
    fn test_search_report_json() {
        let challenge = Challenge::new(Vec::new());
        let config = PowConfig::default();
        let solution = Solution {
            nonce: 0,
            result: 1,
        };

        let report = SearchReport::new(&challenge, &config, &solution, 12);
        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["nonce"], 0);
        assert_eq!(json["leading_zeros"], 63);
        assert_eq!(json["result"], "0000000000000001");
        assert_eq!(json["elapsed_ms"], 12);
    }
}
