use lazy_static::lazy_static;
use regex::Regex;

pub mod password;
pub mod repo;
pub mod repo_types;

pub use repo_types::{Gender, NewUser, User};

/// Emails are stored trimmed and lowercased; lookups must match that form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}
