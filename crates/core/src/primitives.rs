//! Building blocks of a single MemoryPoW attempt
//!
//! Digest loading, the xoshiro256+ generator, the work buffer fill, the
//! bounce accumulator and the leading-zero difficulty test.

use crate::params::{BOUNCE_ROUNDS, DIGEST_SIZE, INDEX_MASK, INITIAL_SEED, SEED_MULTIPLIER};

/// Pack a 32-byte digest into four big-endian 64-bit words
#[inline]
pub fn long_hash(digest: &[u8; DIGEST_SIZE]) -> [u64; 4] {
    let mut words = [0u64; 4];
    for (word, chunk) in words.iter_mut().zip(digest.chunks_exact(8)) {
        *word = chunk
            .iter()
            .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte));
    }
    words
}

/// xoshiro256+ generator over an externally seeded state
///
/// No seeding is done here: the state is whatever the caller derives
/// (see [`seed_for_nonce`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xoshiro256Plus {
    s: [u64; 4],
}

impl Xoshiro256Plus {
    /// Wrap an explicit 4-word state
    pub const fn from_state(s: [u64; 4]) -> Self {
        Self { s }
    }

    /// Derive the per-attempt state: every digest word XORed with the same seed
    #[inline]
    pub fn from_long_hash(long_hash: &[u64; 4], seed: u64) -> Self {
        Self {
            s: long_hash.map(|word| word ^ seed),
        }
    }

    /// Current state words
    pub const fn state(&self) -> [u64; 4] {
        self.s
    }

    /// Emit one output and advance the state
    ///
    /// The output is `s[0] + s[3]` taken before the state is mixed.
    #[inline(always)]
    pub fn next_u64(&mut self) -> u64 {
        let s = &mut self.s;
        let result = s[0].wrapping_add(s[3]);
        let temp = s[1] << 17;

        s[2] ^= s[0];
        s[3] ^= s[1];
        s[1] ^= s[2];
        s[0] ^= s[3];

        s[2] ^= temp;
        s[3] = s[3].rotate_left(45);

        result
    }
}

impl Iterator for Xoshiro256Plus {
    type Item = u64;

    #[inline(always)]
    fn next(&mut self) -> Option<u64> {
        Some(self.next_u64())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Overwrite every buffer entry, front to back, with successive generator outputs
#[inline]
pub fn fill_work_buffer(buffer: &mut [u64], rng: &mut Xoshiro256Plus) {
    for slot in buffer.iter_mut() {
        *slot = rng.next_u64();
    }
}

/// Fold [`BOUNCE_ROUNDS`] pseudo-randomly indexed entries into `buffer[0]`
///
/// The index is taken from the low 31 bits of each output before the
/// modulus. Reducing the full 64-bit output instead would change every nonce.
///
/// # Panics
///
/// Panics if `buffer` is empty.
#[inline]
pub fn bounce(buffer: &[u64], rng: &mut Xoshiro256Plus) -> u64 {
    let len = buffer.len() as u64;
    let mut result = buffer[0];

    for _ in 0..BOUNCE_ROUNDS {
        let index = (rng.next_u64() & INDEX_MASK) % len;
        result ^= buffer[index as usize];
    }

    result
}

/// Count leading zero bits of a 64-bit value; `leading_zero_bits(0) == 64`
///
/// Counted over the high half first, falling through to the low half with a
/// 32 offset when the high half is all zeros.
#[inline]
pub fn leading_zero_bits(x: u64) -> u32 {
    let high = (x >> 32) as u32;
    if high == 0 {
        32 + (x as u32).leading_zeros()
    } else {
        high.leading_zeros()
    }
}

/// Whether an accumulated result has at least `difficulty` leading zero bits
#[inline]
pub fn meets_difficulty(result: u64, difficulty: u32) -> bool {
    leading_zero_bits(result) >= difficulty
}

/// Seed used for the attempt at `nonce` within the first pass over the nonce range
///
/// Equal to `INITIAL_SEED * SEED_MULTIPLIER^(nonce + 1)` in wrapping u64
/// arithmetic, which is where the sequential search loop stands after
/// `nonce + 1` multiplications. A search that wraps the nonce keeps
/// advancing the seed, so after 2^32 attempts the seed for a nonce is
/// [`seed_for_attempt`] of the attempt index, not this value.
pub fn seed_for_nonce(nonce: u32) -> u64 {
    seed_for_attempt(u64::from(nonce))
}

/// Seed used for the `index`-th attempt of a search (counted from 0)
pub fn seed_for_attempt(index: u64) -> u64 {
    let mut exponent = index.wrapping_add(1);
    let mut base = SEED_MULTIPLIER;
    let mut power = 1u64;

    while exponent > 0 {
        if exponent & 1 == 1 {
            power = power.wrapping_mul(base);
        }
        base = base.wrapping_mul(base);
        exponent >>= 1;
    }

    INITIAL_SEED.wrapping_mul(power)
}
