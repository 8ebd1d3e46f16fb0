//! Short code generation and validation utilities.
//!
//! Codes are 6 characters drawn uniformly from the 62-symbol alphanumeric
//! alphabet, giving 62^6 (about 5.6e10) possible codes. Generation carries
//! no uniqueness guarantee; collision handling belongs to
//! [`crate::application::services::ShorteningService`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Number of characters in a short code.
pub const CODE_LENGTH: usize = 6;

/// Symbols a short code may contain.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Draws one code from the given randomness source.
///
/// # Examples
///
/// ```ignore
/// let mut rng = rand::rng();
/// let code = generate_code(&mut rng);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Returns true if `code` has the shape of a generated short code.
///
/// Lets lookups reject garbage input without touching storage.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Source of candidate short codes.
///
/// Implementations must be cheap and must not block: the shortening service
/// calls `generate` repeatedly while retrying collisions.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Generator backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl RandomCodeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code(&mut rand::rng())
    }
}

/// Generator with a fixed seed, producing a reproducible code sequence.
#[derive(Debug)]
pub struct SeededCodeGenerator {
    rng: Mutex<StdRng>,
}

impl SeededCodeGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl CodeGenerator for SeededCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        generate_code(&mut *rng)
    }
}
