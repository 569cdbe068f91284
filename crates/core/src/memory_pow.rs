//! MemoryPoW nonce search and verification
//!
//! Each attempt:
//! - Seed: `seed *= SEED_MULTIPLIER` (starting from `INITIAL_SEED`)
//! - State: every word of the packed digest XORed with the seed
//! - Fill: the whole work buffer with xoshiro256+ output
//! - Bounce: 1024 reads at `(r & 0x7fffffff) % len`, XOR-folded
//! - Accept: result has at least `difficulty` leading zero bits
//!
//! The first nonce is 0 and nonces increase by one, so the search is fully
//! determined by the digest and difficulty.

use core::convert::Infallible;

use log::{debug, trace};
use sha2::{Digest, Sha256};

use crate::error::Error;
use crate::params::*;
use crate::primitives::{
    Xoshiro256Plus, bounce, fill_work_buffer, long_hash, meets_difficulty, seed_for_attempt,
};

/// A nonce that satisfied the difficulty, with the accumulated result it produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solution {
    pub nonce: u32,
    pub result: u64,
}

impl Solution {
    /// Leading zero bits of the accumulated result
    pub fn leading_zeros(&self) -> u32 {
        crate::primitives::leading_zero_bits(self.result)
    }
}

/// MemoryPoW solver
///
/// Owns the work buffer so it can be reused across searches without
/// reallocating it each time.
pub struct MemoryPoW {
    work_buffer: Vec<u64>,
}

impl MemoryPoW {
    /// Create a solver with the default 8 MiB work buffer
    pub fn new() -> Self {
        Self {
            work_buffer: vec![0u64; DEFAULT_WORK_BUFFER_WORDS],
        }
    }

    /// Create a solver with a work buffer of `size` bytes
    ///
    /// `size` must be a positive multiple of 8.
    pub fn with_buffer_size(size: usize) -> Result<Self, Error> {
        validate_buffer_size(size)?;
        Ok(Self {
            work_buffer: vec![0u64; size / WORD_SIZE],
        })
    }

    /// Work buffer size in bytes
    pub fn buffer_size(&self) -> usize {
        self.work_buffer.len() * WORD_SIZE
    }

    /// Compute the accumulated result of the attempt at `nonce`
    ///
    /// Uses the seed of the first pass over the nonce range. A search that
    /// runs past `u32::MAX` attempts wraps the nonce but not the seed; use
    /// [`MemoryPoW::attempt_at`] to reproduce those later attempts.
    pub fn attempt(&mut self, digest: &[u8; DIGEST_SIZE], nonce: u32) -> u64 {
        self.attempt_at(digest, u64::from(nonce))
    }

    /// Compute the accumulated result of the `index`-th attempt of a search
    ///
    /// The nonce reported for that attempt is `index as u32`.
    pub fn attempt_at(&mut self, digest: &[u8; DIGEST_SIZE], index: u64) -> u64 {
        let words = long_hash(digest);
        self.attempt_with_seed(&words, seed_for_attempt(index))
    }

    /// Search for the smallest nonce meeting `difficulty`
    ///
    /// There is no iteration cap. Difficulty above [`MAX_DIFFICULTY`] never
    /// succeeds; use [`compute`] for a bounds-checked search.
    pub fn solve(&mut self, digest: &[u8; DIGEST_SIZE], difficulty: u32) -> Solution {
        match self.search(digest, difficulty, |_| Ok::<(), Infallible>(())) {
            Ok(solution) => solution,
            Err(never) => match never {},
        }
    }

    /// Search like [`MemoryPoW::solve`], asking `should_stop` before every attempt
    ///
    /// The callback receives the nonce about to be tried. Returns `None` if the
    /// callback stopped the search first.
    pub fn solve_until<F>(
        &mut self,
        digest: &[u8; DIGEST_SIZE],
        difficulty: u32,
        mut should_stop: F,
    ) -> Option<Solution>
    where
        F: FnMut(u32) -> bool,
    {
        self.search(digest, difficulty, |nonce| {
            if should_stop(nonce) {
                Err(())
            } else {
                Ok(())
            }
        })
        .ok()
    }

    /// Check that `nonce` meets `difficulty` for `digest`
    ///
    /// Only the single attempt at `nonce` is recomputed; it is not checked
    /// that `nonce` is the smallest passing value.
    pub fn verify(&mut self, digest: &[u8; DIGEST_SIZE], difficulty: u32, nonce: u32) -> bool {
        meets_difficulty(self.attempt(digest, nonce), difficulty)
    }

    /// Sequential search; `before_attempt` aborts it by returning `Err`
    fn search<E, F>(
        &mut self,
        digest: &[u8; DIGEST_SIZE],
        difficulty: u32,
        mut before_attempt: F,
    ) -> Result<Solution, E>
    where
        F: FnMut(u32) -> Result<(), E>,
    {
        let words = long_hash(digest);
        let mut seed = INITIAL_SEED;
        let mut nonce: u32 = 0;

        debug!(
            "MemoryPoW search started (buffer: {} bytes, difficulty: {})",
            self.buffer_size(),
            difficulty
        );

        loop {
            if let Err(stop) = before_attempt(nonce) {
                debug!("MemoryPoW search stopped at nonce {}", nonce);
                return Err(stop);
            }

            seed = seed.wrapping_mul(SEED_MULTIPLIER);
            let result = self.attempt_with_seed(&words, seed);
            trace!("nonce {} -> {:016x}", nonce, result);

            if meets_difficulty(result, difficulty) {
                debug!("MemoryPoW search found nonce {}", nonce);
                return Ok(Solution { nonce, result });
            }

            nonce = nonce.wrapping_add(1);
        }
    }

    #[inline]
    fn attempt_with_seed(&mut self, words: &[u64; 4], seed: u64) -> u64 {
        let mut rng = Xoshiro256Plus::from_long_hash(words, seed);
        fill_work_buffer(&mut self.work_buffer, &mut rng);
        bounce(&self.work_buffer, &mut rng)
    }
}

impl Default for MemoryPoW {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject work buffer sizes that are zero or not a multiple of 8
pub fn validate_buffer_size(size: usize) -> Result<(), Error> {
    if size == 0 || size % WORD_SIZE != 0 {
        return Err(Error::InvalidBufferSize(size));
    }
    Ok(())
}

/// Reject difficulties that can never be met
pub fn validate_difficulty(difficulty: u32) -> Result<(), Error> {
    if difficulty > MAX_DIFFICULTY {
        return Err(Error::DifficultyOutOfRange(difficulty));
    }
    Ok(())
}

/// SHA-256 digest of a message, the input of every search
pub fn digest(message: &[u8]) -> [u8; DIGEST_SIZE] {
    Sha256::digest(message).into()
}

/// Convert a digest slice into the fixed-size form the solver takes
pub fn digest_from_slice(bytes: &[u8]) -> Result<[u8; DIGEST_SIZE], Error> {
    bytes
        .try_into()
        .map_err(|_| Error::InvalidDigestLength(bytes.len()))
}

/// Find the nonce for `message` with a fresh work buffer of `buffer_size` bytes
///
/// # Example
///
/// ```rust
/// use mempow_core::{compute, verify};
///
/// let nonce = compute(b"hello", 64 * 1024, 4).unwrap();
/// assert!(verify(b"hello", 64 * 1024, 4, nonce).unwrap());
/// ```
pub fn compute(message: &[u8], buffer_size: usize, difficulty: u32) -> Result<u32, Error> {
    validate_difficulty(difficulty)?;
    let mut pow = MemoryPoW::with_buffer_size(buffer_size)?;
    Ok(pow.solve(&digest(message), difficulty).nonce)
}

/// Check a nonce for `message` with a fresh work buffer of `buffer_size` bytes
pub fn verify(
    message: &[u8],
    buffer_size: usize,
    difficulty: u32,
    nonce: u32,
) -> Result<bool, Error> {
    validate_difficulty(difficulty)?;
    let mut pow = MemoryPoW::with_buffer_size(buffer_size)?;
    Ok(pow.verify(&digest(message), difficulty, nonce))
}
