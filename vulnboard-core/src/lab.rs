//! Intentionally weak building blocks of the training target.
//!
//! Everything in here is a known anti-pattern that static analyzers
//! and scanners are expected to report.

use md5::{Digest, Md5};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::fmt;

pub const LAB_DB_USER: &str = "admin";
/// Hard-coded secret for scanners to find. Nothing connects with it.
pub const LAB_DB_PASSWORD: &str = "Univ3rs1dSecret!";

pub const LAB_PLAIN_PASSWORD: &str = "password_prueba";

pub const FORCED_ERROR_MESSAGE: &str = "FORZADO: Detalle interno de prueba";

// Upper bound of PHP's rand() on 64-bit builds.
const WEAK_TOKEN_MAX: u32 = 2_147_483_647;

/// Unsalted MD5 hex digest.
pub fn weak_password_digest(plain: &str) -> String {
    let digest = Md5::digest(plain.as_bytes());
    format!("{digest:x}")
}

/// A token from a non-cryptographic generator.
pub fn weak_token() -> u32 {
    SmallRng::from_entropy().gen_range(0..=WEAK_TOKEN_MAX)
}

/// Diagnostic text that ends up verbatim in an HTML comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugNote(String);

impl DebugNote {
    pub fn new(note: impl Into<String>) -> Self {
        Self(note.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DebugNote {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
