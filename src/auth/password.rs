use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::auth::PasswordHashing;

/// Argon2id with the crate defaults and a fresh random salt per hash.
/// Output is a PHC string (`$argon2id$v=19$...`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl PasswordHashing for Argon2Hasher {
    fn hash_password(&self, plain: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| {
                error!(error = %e, "argon2 hash_password error");
                anyhow::anyhow!(e.to_string())
            })?
            .to_string();
        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    #[test]
    fn hash_is_a_verifiable_phc_string() {
        let hash = Argon2Hasher
            .hash_password("Secur3P@ssw0rd!")
            .expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"));

        let parsed = PasswordHash::new(&hash).expect("PHC string should parse");
        assert!(Argon2::default()
            .verify_password(b"Secur3P@ssw0rd!", &parsed)
            .is_ok());
        assert!(Argon2::default()
            .verify_password(b"wrong-password", &parsed)
            .is_err());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = Argon2Hasher.hash_password("longEnoughPassword").unwrap();
        let b = Argon2Hasher.hash_password("longEnoughPassword").unwrap();
        assert_ne!(a, b);
    }
}
