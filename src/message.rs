//! Message input handling
//!
//! Decodes hex-encoded messages and derives the SHA-256 digest that the
//! search runs over.

use mempow_core::DIGEST_SIZE;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MessageError {
    #[error("Invalid hex message: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Decode a hex message, accepting an optional `0x` prefix and surrounding whitespace
pub fn decode_hex(input: &str) -> Result<Vec<u8>, MessageError> {
    let trimmed = input.trim();
    let hex_str = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    Ok(hex::decode(hex_str)?)
}

/// A message together with its digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    message: Vec<u8>,
    digest: [u8; DIGEST_SIZE],
}

impl Challenge {
    pub fn new(message: Vec<u8>) -> Self {
        let digest = mempow_core::digest(&message);
        Self { message, digest }
    }

    pub fn from_hex(input: &str) -> Result<Self, MessageError> {
        Ok(Self::new(decode_hex(input)?))
    }

    pub fn message(&self) -> &[u8] {
        &self.message
    }

    pub fn digest(&self) -> &[u8; DIGEST_SIZE] {
        &self.digest
    }

    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex("aabbcc").unwrap(), vec![0xaa, 0xbb, 0xcc]);
        assert_eq!(decode_hex("0xAABBCC").unwrap(), vec![0xaa, 0xbb, 0xcc]);
        assert_eq!(decode_hex("  0Xaa\n").unwrap(), vec![0xaa]);
        assert_eq!(decode_hex("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_hex_errors() {
        assert!(decode_hex("abc").is_err());
        assert!(decode_hex("zz").is_err());
    }

    #[test]
    fn test_empty_message_digest() {
        let challenge = Challenge::from_hex("").unwrap();
        assert!(challenge.message().is_empty());
        assert_eq!(
            challenge.digest_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
