use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password must not be empty")]
    Empty,
    #[error("stored password hash is not a PHC string: {0}")]
    MalformedHash(password_hash::Error),
    #[error("argon2 failed: {0}")]
    Hashing(password_hash::Error),
}

/// Hash with a fresh salt into a PHC string for `users.password_hash`.
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    if plain.is_empty() {
        return Err(PasswordError::Empty);
    }
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hashing)
}

/// `Ok(false)` on mismatch; errors only when the stored hash is unreadable.
pub fn verify_password(plain: &str, stored: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored).map_err(PasswordError::MalformedHash)?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_not_plaintext() {
        let hash = hash_password("honeybadger1").expect("hashing should succeed");
        assert_ne!(hash, "honeybadger1");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn verify_accepts_only_hashed_password() {
        let hash = hash_password("maplesyrup2").expect("hashing should succeed");
        assert!(verify_password("maplesyrup2", &hash).expect("verify should succeed"));
        assert!(!verify_password("maplesyrup3", &hash).expect("verify should not error"));
    }

    #[test]
    fn same_password_gets_fresh_salt() {
        let a = hash_password("cottoncandy3").unwrap();
        let b = hash_password("cottoncandy3").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_password_is_rejected() {
        assert!(matches!(hash_password(""), Err(PasswordError::Empty)));
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(matches!(
            verify_password("anything", "not-a-valid-hash"),
            Err(PasswordError::MalformedHash(_))
        ));
    }
}
