//! Port abstraction for password hashing.

use super::define_port_error;

define_port_error! {
    /// Errors raised while hashing or verifying passwords.
    pub enum PasswordHashError {
        /// Hashing backend failed.
        Hash { message: String } => "password hashing failed: {message}",
    }
}

/// Hashes signup passwords and verifies login attempts.
///
/// Hashing is CPU-bound rather than I/O-bound, so the port is synchronous;
/// adapters choosing an expensive cost factor should document the latency.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check a plaintext password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}
