//! Password hashing and verification.
//!
//! bcrypt embeds a per-hash random salt and the cost factor in the hash
//! string itself, so `verify_password` needs no external state and two
//! hashes of the same plaintext never match each other.

use tracing::debug;

use crate::error::AppError;

/// Hash a plaintext password with the given bcrypt cost factor.
pub fn hash_password(plaintext: &str, cost: u32) -> Result<String, AppError> {
    bcrypt::hash(plaintext, cost)
        .map_err(|e| AppError::internal(format!("failed to hash password: {e}")))
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// A malformed hash string verifies as `false` rather than erroring; the
/// caller treats it exactly like a wrong password.
pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    match bcrypt::verify(plaintext, hash) {
        Ok(matches) => matches,
        Err(e) => {
            debug!(error = %e, "stored password hash did not parse");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{hash_password, verify_password};

    // Lowest cost bcrypt accepts; keeps the suite fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn roundtrip_verifies() {
        let hash = hash_password("correct horse battery staple", TEST_COST).unwrap();
        assert!(verify_password("correct horse battery staple", &hash));
    }

    #[test]
    fn wrong_password_fails() {
        let hash = hash_password("correct horse battery staple", TEST_COST).unwrap();
        assert!(!verify_password("incorrect horse", &hash));
    }

    #[test]
    fn same_plaintext_hashes_differently_but_both_verify() {
        let a = hash_password("hunter2", TEST_COST).unwrap();
        let b = hash_password("hunter2", TEST_COST).unwrap();
        assert_ne!(a, b);
        assert!(verify_password("hunter2", &a));
        assert!(verify_password("hunter2", &b));
    }

    #[test]
    fn malformed_hash_verifies_false() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
        assert!(!verify_password("anything", ""));
    }
}
