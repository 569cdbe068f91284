use mempow_core::{DIGEST_SIZE, Error, MemoryPoW, digest_from_slice, meets_difficulty};
use wasm_bindgen::prelude::*;

fn to_js(err: Error) -> JsError {
    JsError::new(&err.to_string())
}

#[wasm_bindgen]
pub struct Benchmark {
    pow: MemoryPoW,
}

impl Default for Benchmark {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Benchmark {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            pow: MemoryPoW::new(),
        }
    }

    /// Run benchmark with specified number of attempts
    /// Returns attempts per second, or NaN without a `window.performance`
    #[wasm_bindgen]
    pub fn run(&mut self, num_attempts: u32) -> f64 {
        let Some(performance) = web_sys::window().and_then(|w| w.performance()) else {
            return f64::NAN;
        };

        let hash = mempow_core::digest(b"benchmark_input");
        let start = performance.now();

        for nonce in 0..num_attempts {
            let _ = self.pow.attempt(&hash, nonce);
        }

        let elapsed_s = (performance.now() - start) / 1000.0;

        (num_attempts as f64) / elapsed_s
    }

    /// Get algorithm parameters as JSON string
    #[wasm_bindgen]
    pub fn get_params(&self) -> String {
        format!(
            r#"{{"buffer_kb": {}, "bounce_rounds": {}, "max_difficulty": {}}}"#,
            self.pow.buffer_size() / 1024,
            mempow_core::BOUNCE_ROUNDS,
            mempow_core::MAX_DIFFICULTY
        )
    }
}

/// SHA-256 of a message, the digest every other export takes
#[wasm_bindgen]
pub fn hash_message(message: &[u8]) -> Vec<u8> {
    mempow_core::digest(message).to_vec()
}

/// Search for the nonce of a 32-byte digest with a `buffer_size`-byte work buffer
#[wasm_bindgen]
pub fn compute_nonce(hash: &[u8], buffer_size: usize, difficulty: u32) -> Result<u32, JsError> {
    let digest = digest_from_slice(hash).map_err(to_js)?;
    mempow_core::validate_difficulty(difficulty).map_err(to_js)?;
    let mut pow = MemoryPoW::with_buffer_size(buffer_size).map_err(to_js)?;
    Ok(pow.solve(&digest, difficulty).nonce)
}

/// Check a nonce against a 32-byte digest
#[wasm_bindgen]
pub fn verify_nonce(
    hash: &[u8],
    buffer_size: usize,
    difficulty: u32,
    nonce: u32,
) -> Result<bool, JsError> {
    let digest = digest_from_slice(hash).map_err(to_js)?;
    let mut pow = MemoryPoW::with_buffer_size(buffer_size).map_err(to_js)?;
    Ok(pow.verify(&digest, difficulty, nonce))
}

/// Batched search for Web Worker usage.
/// Keeps the work buffer across batches and counts attempts the way a single
/// blocking search does (the seed keeps advancing if the nonce wraps), so the
/// first nonce reported is the same one `MemoryPoW::solve` returns.
#[wasm_bindgen]
pub struct Miner {
    pow: MemoryPoW,
    digest: [u8; DIGEST_SIZE],
    difficulty: u32,
    attempts: u64,
    found: Option<u32>,
}

#[wasm_bindgen]
impl Miner {
    #[wasm_bindgen(constructor)]
    pub fn new(hash_hex: &str, buffer_size: usize, difficulty: u32) -> Result<Miner, JsError> {
        let bytes = hex::decode(hash_hex)?;
        Ok(Miner {
            pow: MemoryPoW::with_buffer_size(buffer_size).map_err(to_js)?,
            digest: digest_from_slice(&bytes).map_err(to_js)?,
            difficulty,
            attempts: 0,
            found: None,
        })
    }

    /// Nonce the next batch starts from
    #[wasm_bindgen(getter)]
    pub fn next_nonce(&self) -> u32 {
        self.attempts as u32
    }

    /// Try up to `batch_size` nonces. Returns JSON string:
    /// `{"found":true,"nonce":N,"count":M}` or `{"found":false,"count":M}`
    ///
    /// Once a nonce is found every later call reports it again with `count` 0.
    pub fn mine_batch(&mut self, batch_size: u32) -> String {
        if let Some(nonce) = self.found {
            return format!(r#"{{"found":true,"nonce":{},"count":0}}"#, nonce);
        }

        for i in 0..batch_size {
            let nonce = self.attempts as u32;
            let result = self.pow.attempt_at(&self.digest, self.attempts);
            self.attempts += 1;

            if meets_difficulty(result, self.difficulty) {
                self.found = Some(nonce);
                return format!(
                    r#"{{"found":true,"nonce":{},"count":{}}}"#,
                    nonce,
                    i + 1
                );
            }
        }

        format!(r#"{{"found":false,"count":{}}}"#, batch_size)
    }
}
