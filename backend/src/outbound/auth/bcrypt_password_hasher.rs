//! Bcrypt-backed `PasswordHasher` adapter.

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Hashes passwords with bcrypt.
///
/// The cost factor defaults to [`bcrypt::DEFAULT_COST`]; tests lower it to
/// keep suites fast.
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the default bcrypt cost.
    pub const fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Create a hasher with an explicit cost factor.
    pub const fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        bcrypt::hash(password, self.cost)
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        bcrypt::verify(password, hash).map_err(|err| PasswordHashError::hash(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn hash_then_verify_round_trips() {
        let hasher = BcryptPasswordHasher::with_cost(4);
        let hash = hasher.hash("correct horse").expect("hash succeeds");
        assert!(hasher.verify("correct horse", &hash).expect("verify"));
        assert!(!hasher.verify("wrong horse", &hash).expect("verify"));
    }

    #[rstest]
    fn malformed_hashes_error_rather_than_match() {
        let hasher = BcryptPasswordHasher::with_cost(4);
        assert!(hasher.verify("anything", "not-a-bcrypt-hash").is_err());
    }
}
