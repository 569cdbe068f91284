//! C FFI bindings for native embedding

use crate::{DIGEST_SIZE, MemoryPoW};
use core::slice;

/// Opaque solver handle for FFI
pub struct MemPowSolver {
    inner: MemoryPoW,
}

/// Create a new solver with a work buffer of `buffer_size` bytes
/// Returns null if the size is not a positive multiple of 8
/// (caller must free a non-null handle with mempow_free)
#[unsafe(no_mangle)]
pub extern "C" fn mempow_new(buffer_size: usize) -> *mut MemPowSolver {
    match MemoryPoW::with_buffer_size(buffer_size) {
        Ok(inner) => Box::into_raw(Box::new(MemPowSolver { inner })),
        Err(_) => core::ptr::null_mut(),
    }
}

/// Free a solver instance
#[unsafe(no_mangle)]
pub extern "C" fn mempow_free(solver: *mut MemPowSolver) {
    if !solver.is_null() {
        unsafe {
            let _ = Box::from_raw(solver);
        }
    }
}

/// Search for the nonce of a 32-byte digest
/// - solver: pointer from mempow_new()
/// - hash: pointer to 32 digest bytes
/// - difficulty: required leading zero bits
///
/// Returns u32::MAX for null pointers. u32::MAX is also a valid nonce, so
/// only pass null when the result is going to be discarded.
#[unsafe(no_mangle)]
pub extern "C" fn mempow_compute(
    solver: *mut MemPowSolver,
    hash: *const u8,
    difficulty: u32,
) -> u32 {
    if solver.is_null() || hash.is_null() {
        return u32::MAX;
    }

    unsafe {
        let solver = &mut *solver;
        let digest: &[u8; DIGEST_SIZE] = match slice::from_raw_parts(hash, DIGEST_SIZE).try_into() {
            Ok(digest) => digest,
            Err(_) => return u32::MAX,
        };
        solver.inner.solve(digest, difficulty).nonce
    }
}

/// Check a nonce against a 32-byte digest
#[unsafe(no_mangle)]
pub extern "C" fn mempow_verify(
    solver: *mut MemPowSolver,
    hash: *const u8,
    difficulty: u32,
    nonce: u32,
) -> bool {
    if solver.is_null() || hash.is_null() {
        return false;
    }

    unsafe {
        let solver = &mut *solver;
        let digest: &[u8; DIGEST_SIZE] = match slice::from_raw_parts(hash, DIGEST_SIZE).try_into() {
            Ok(digest) => digest,
            Err(_) => return false,
        };
        solver.inner.verify(digest, difficulty, nonce)
    }
}

/// Benchmark: run N attempts with the default buffer and return total microseconds
#[unsafe(no_mangle)]
pub extern "C" fn mempow_benchmark(iterations: u32) -> u64 {
    use std::time::Instant;

    let mut solver = MemoryPoW::new();
    let digest = crate::digest(b"benchmark test input data for native callers");

    let start = Instant::now();
    for nonce in 0..iterations {
        let _ = solver.attempt(&digest, nonce);
    }
    let elapsed = start.elapsed();

    elapsed.as_micros() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUFFER: usize = 64 * 1024;

    #[test]
    fn test_new_rejects_invalid_size() {
        assert!(mempow_new(0).is_null());
        assert!(mempow_new(7).is_null());
    }

    #[test]
    fn test_null_pointers_are_tolerated() {
        let hash = crate::digest(b"null");
        assert_eq!(
            mempow_compute(core::ptr::null_mut(), hash.as_ptr(), 0),
            u32::MAX
        );
        assert!(!mempow_verify(core::ptr::null_mut(), hash.as_ptr(), 0, 0));

        let solver = mempow_new(BUFFER);
        assert!(!solver.is_null());
        assert_eq!(mempow_compute(solver, core::ptr::null(), 0), u32::MAX);
        assert!(!mempow_verify(solver, core::ptr::null(), 0, 0));
        mempow_free(solver);

        mempow_free(core::ptr::null_mut());
    }

    #[test]
    fn test_compute_then_verify_through_handle() {
        let hash = crate::digest(b"native caller");
        let solver = mempow_new(BUFFER);

        let nonce = mempow_compute(solver, hash.as_ptr(), 5);
        let expected = MemoryPoW::with_buffer_size(BUFFER)
            .unwrap()
            .solve(&hash, 5)
            .nonce;

        assert_eq!(nonce, expected);
        assert!(mempow_verify(solver, hash.as_ptr(), 5, nonce));
        assert!(!mempow_verify(solver, hash.as_ptr(), 65, nonce));
        mempow_free(solver);
    }
}
