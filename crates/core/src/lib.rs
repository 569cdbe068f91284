//! # MemoryPoW Core Algorithm
//!
//! A memory-hard proof-of-work: find the smallest 32-bit nonce whose
//! attempt, over a large pseudo-random work buffer, folds down to a 64-bit
//! value with at least `difficulty` leading zero bits.
//!
//! The output must be bit-exact across implementations, since independent
//! verifiers accept or reject work with the same computation.
//!
//! ## Features
//!
//! - **Memory-Hard**: every attempt rewrites an 8 MiB work buffer
//! - **Deterministic**: the same digest and difficulty always give the same nonce
//! - **Cheap to Verify**: checking a nonce costs exactly one attempt
//!
//! ## Algorithm Parameters
//!
//! - 8 MiB work buffer (1,048,576 words) by default
//! - xoshiro256+ generator, reseeded per nonce
//! - 1024 bounce reads per attempt
//!
//! ## Example
//!
//! ```rust
//! use mempow_core::{MemoryPoW, digest};
//!
//! let hash = digest(b"message bytes");
//!
//! // Reusable solver (avoids re-allocation)
//! let mut pow = MemoryPoW::with_buffer_size(256 * 1024).unwrap();
//! let solution = pow.solve(&hash, 6);
//!
//! assert!(solution.leading_zeros() >= 6);
//! assert!(pow.verify(&hash, 6, solution.nonce));
//! ```

mod error;
mod memory_pow;
mod params;
mod primitives;

#[cfg(feature = "ffi")]
mod ffi;

pub use error::Error;
pub use memory_pow::{
    MemoryPoW, Solution, compute, digest, digest_from_slice, validate_buffer_size,
    validate_difficulty, verify,
};
pub use params::*;
pub use primitives::{
    Xoshiro256Plus, bounce, fill_work_buffer, leading_zero_bits, long_hash, meets_difficulty,
    seed_for_attempt, seed_for_nonce,
};
