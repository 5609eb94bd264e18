use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Hash a pin with a fresh random salt. The output is a PHC string; the
/// plaintext is never stored or logged.
pub fn hash_pin(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Verify a pin against a stored hash. Returns Ok(false) on mismatch and an
/// error only when the stored hash itself is unparseable.
pub fn verify_pin(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let pin = "1234";
        let hash = hash_pin(pin).expect("hashing should succeed");
        assert!(verify_pin(pin, &hash).expect("verify should succeed"));
    }

    #[test]
    fn hash_never_equals_plaintext() {
        let pin = "1234";
        let hash = hash_pin(pin).expect("hashing should succeed");
        assert_ne!(hash, pin);
    }

    #[test]
    fn same_pin_hashes_differently_but_both_verify() {
        let pin = "4321";
        let first = hash_pin(pin).expect("hashing should succeed");
        let second = hash_pin(pin).expect("hashing should succeed");
        // Salted: re-hashing never reproduces the stored value.
        assert_ne!(first, second);
        assert!(verify_pin(pin, &first).unwrap());
        assert!(verify_pin(pin, &second).unwrap());
    }

    #[test]
    fn verify_rejects_wrong_pin() {
        let hash = hash_pin("1234").expect("hashing should succeed");
        assert!(!verify_pin("0000", &hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_pin("1234", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
