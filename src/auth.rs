use anyhow::{Context, Result};
use std::sync::LazyLock;

use crate::models::User;

pub(crate) const HASH_COST: u32 = bcrypt::DEFAULT_COST;

static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| bcrypt::hash("migas-unknown-user", HASH_COST).ok());

pub(crate) fn hash_password(password: &str) -> Result<String> {
    hash_with_cost(password, HASH_COST)
}

pub(crate) fn hash_with_cost(password: &str, cost: u32) -> Result<String> {
    bcrypt::hash(password, cost).context("Failed to hash password")
}

/// A malformed stored hash counts as a mismatch.
pub(crate) fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// True only for an existing user with a matching password. An unknown
/// user still pays for one bcrypt verification so both failures take the
/// same time.
pub(crate) fn check_credentials(user: Option<&User>, password: &str) -> bool {
    match user {
        Some(u) => verify_password(password, &u.password_hash),
        None => {
            if let Some(hash) = DUMMY_HASH.as_deref() {
                let _ = bcrypt::verify(password, hash);
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_is_salted_and_verifies() {
        let a = hash_with_cost("rahasia", TEST_COST).unwrap();
        let b = hash_with_cost("rahasia", TEST_COST).unwrap();
        assert_ne!(a, b);
        assert!(!a.contains("rahasia"));
        assert!(verify_password("rahasia", &a));
        assert!(!verify_password("salah", &a));
    }

    #[test]
    fn test_malformed_hash_rejects() {
        assert!(!verify_password("rahasia", "plaintext"));
    }

    #[test]
    fn test_check_credentials() {
        let user = User::new("admin", hash_with_cost("rahasia", TEST_COST).unwrap());
        assert!(check_credentials(Some(&user), "rahasia"));
        assert!(!check_credentials(Some(&user), "Rahasia"));
        assert!(!check_credentials(None, "rahasia"));
    }
}
