//! MemoryPoW Algorithm Parameters
//!
//! Every value here is consensus-critical: changing any of them changes the
//! nonce found for every input.

/// Size of one work buffer entry in bytes
pub const WORD_SIZE: usize = 8;

/// SHA-256 digest size
pub const DIGEST_SIZE: usize = 32;

/// Default work buffer size in bytes (8 MiB)
pub const DEFAULT_WORK_BUFFER_SIZE: usize = 8 * 1024 * 1024;

/// Default number of 64-bit words in the work buffer (1,048,576)
pub const DEFAULT_WORK_BUFFER_WORDS: usize = DEFAULT_WORK_BUFFER_SIZE / WORD_SIZE;

/// Number of pseudo-random reads folded into the result per attempt
pub const BOUNCE_ROUNDS: usize = 1024;

/// Seed value before the first multiplication
pub const INITIAL_SEED: u64 = 8_682_522_807_148_012;

/// Odd multiplier applied to the seed before every attempt
pub const SEED_MULTIPLIER: u64 = 1_181_783_497_276_652_981;

/// Bounce index mask (non-negative range of a signed 32-bit integer)
pub const INDEX_MASK: u64 = 0x7fff_ffff;

/// Highest satisfiable difficulty (leading zero bits of a u64)
pub const MAX_DIFFICULTY: u32 = 64;

/// Difficulty used when the caller gives none
pub const DEFAULT_DIFFICULTY: u32 = 12;
