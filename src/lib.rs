//! MemoryPoW Prover Library
//!
//! Message handling, configuration and benchmarking around the MemoryPoW
//! search kernel.
//!
//! # Overview
//!
//! A caller hashes its message with SHA-256 and searches for the smallest
//! nonce whose memory-hard attempt has enough leading zero bits. Verifiers
//! recompute that one attempt to accept or reject the work.
//!
//! # Example
//!
//! ```rust
//! use mempow::config::PowConfig;
//! use mempow::message::Challenge;
//!
//! let challenge = Challenge::from_hex("aabbcc").unwrap();
//! let config = PowConfig {
//!     work_buffer_size: 64 * 1024,
//!     difficulty: 4,
//! };
//!
//! let mut pow = config.solver().unwrap();
//! let solution = pow.solve(challenge.digest(), config.difficulty);
//! assert!(pow.verify(challenge.digest(), config.difficulty, solution.nonce));
//! ```

// Re-export the core algorithm
pub use mempow_core as algorithm;

pub mod bench;
pub mod config;
pub mod message;
pub mod report;

// Convenience re-exports
pub use algorithm::{meets_difficulty, MemoryPoW, Solution};
