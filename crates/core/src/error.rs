//! Error type for the checked MemoryPoW entry points

use thiserror::Error;

use crate::params::{MAX_DIFFICULTY, WORD_SIZE};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("work buffer size must be a positive multiple of {} bytes, got {0}", WORD_SIZE)]
    InvalidBufferSize(usize),

    #[error("difficulty {0} can never be met (maximum is {})", MAX_DIFFICULTY)]
    DifficultyOutOfRange(u32),

    #[error("digest must be 32 bytes, got {0}")]
    InvalidDigestLength(usize),
}
