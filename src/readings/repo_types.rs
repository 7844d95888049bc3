use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::schema::Table;
use crate::users::User;

/// One weight reading. `recorded_at` is when the user weighed in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Weight {
    pub weight_id: i32,
    pub user_id: i32,
    pub current_weight: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}

impl Table for Weight {
    const NAME: &'static str = "weight";
    const REFERENCES: &'static [&'static str] = &[User::NAME];
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Weight weight_id={} current_weight={}>",
            self.weight_id, self.current_weight
        )
    }
}

/// One blood-glucose reading.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Glucose {
    pub glucose_id: i32,
    pub user_id: i32,
    pub current_glucose: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}

impl Table for Glucose {
    const NAME: &'static str = "glucose";
    const REFERENCES: &'static [&'static str] = &[User::NAME];
}

impl fmt::Display for Glucose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Glucose glucose_id={} current_glucose={}>",
            self.glucose_id, self.current_glucose
        )
    }
}
