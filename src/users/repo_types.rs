use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::schema::Table;

/// Gender code with its recommended daily sugar allowance, in grams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Gender {
    pub gender_code: String,
    pub allowance: i32,
}

impl Table for Gender {
    const NAME: &'static str = "gender";
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Gender gender_code={} allowance={}>",
            self.gender_code, self.allowance
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub gender_code: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Table for User {
    const NAME: &'static str = "users";
    const REFERENCES: &'static [&'static str] = &[Gender::NAME];
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<User user_id={} gender_code={}>",
            self.user_id,
            self.gender_code.as_deref().unwrap_or("None")
        )
    }
}

/// Registration input; `password` is hashed before it reaches the database.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub gender_code: Option<String>,
}
