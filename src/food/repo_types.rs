use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::schema::Table;
use crate::users::User;

/// Catalog entry. `cost` is the item's sugar content and never varies per meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Food {
    pub food_id: i32,
    pub name: String,
    pub cost: i32,
}

impl Table for Food {
    const NAME: &'static str = "food";
}

impl fmt::Display for Food {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Food food_id={} cost={}>", self.food_id, self.cost)
    }
}

/// A user eating a catalog item at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SugarIntake {
    pub consumption_id: i32,
    pub user_id: i32,
    pub food_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub consumed_at: OffsetDateTime,
    pub notes: Option<String>,
}

impl Table for SugarIntake {
    const NAME: &'static str = "sugar_consumption";
    const REFERENCES: &'static [&'static str] = &[User::NAME, Food::NAME];
}

impl fmt::Display for SugarIntake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Sugar consumption_id={} notes={}>",
            self.consumption_id,
            self.notes.as_deref().unwrap_or("None")
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSugarIntake {
    pub user_id: i32,
    pub food_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub consumed_at: OffsetDateTime,
    pub notes: Option<String>,
}

/// Intake event joined with the catalog entry it refers to.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SugarIntakeEntry {
    pub consumption_id: i32,
    pub user_id: i32,
    pub food_id: i32,
    pub food_name: String,
    pub cost: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub consumed_at: OffsetDateTime,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn display() {
        let food = Food {
            food_id: 2,
            name: "Cola (12 oz)".into(),
            cost: 39,
        };
        assert_eq!(food.to_string(), "<Food food_id=2 cost=39>");

        let intake = SugarIntake {
            consumption_id: 5,
            user_id: 1,
            food_id: 2,
            consumed_at: datetime!(2024-03-04 13:00 UTC),
            notes: Some("lunch".into()),
        };
        assert_eq!(intake.to_string(), "<Sugar consumption_id=5 notes=lunch>");
    }

    #[test]
    fn intake_entry_serializes_rfc3339() {
        let entry = SugarIntakeEntry {
            consumption_id: 1,
            user_id: 2,
            food_id: 2,
            food_name: "Cola (12 oz)".into(),
            cost: 39,
            consumed_at: datetime!(2024-03-04 13:00 UTC),
            notes: None,
        };
        let out = serde_json::to_value(&entry).unwrap();
        assert_eq!(out["consumed_at"], "2024-03-04T13:00:00Z");
        assert_eq!(out["cost"], 39);

        let intake: SugarIntake = serde_json::from_str(
            r#"{"consumption_id":5,"user_id":1,"food_id":2,"consumed_at":"2024-03-04T13:00:00Z","notes":"lunch"}"#,
        )
        .unwrap();
        assert_eq!(intake.consumed_at, datetime!(2024-03-04 13:00 UTC));
    }
}
