use std::collections::HashSet;

use serde::{de::DeserializeOwned, Deserialize};
use time::OffsetDateTime;

use crate::food::{Food, NewSugarIntake};
use crate::users::{is_valid_email, Gender, NewUser};

const GENDER_CSV: &str = include_str!("../../seed_data/gender.csv");
const USERS_CSV: &str = include_str!("../../seed_data/users.csv");
const FOOD_CSV: &str = include_str!("../../seed_data/food.csv");
const SUGAR_CSV: &str = include_str!("../../seed_data/sugar_consumption.csv");
const WEIGHT_CSV: [(&str, &str); 3] = [
    ("weight_1.csv", include_str!("../../seed_data/weight_1.csv")),
    ("weight_2.csv", include_str!("../../seed_data/weight_2.csv")),
    ("weight_3.csv", include_str!("../../seed_data/weight_3.csv")),
];
const GLUCOSE_CSV: [(&str, &str); 3] = [
    ("glucose_1.csv", include_str!("../../seed_data/glucose_1.csv")),
    ("glucose_2.csv", include_str!("../../seed_data/glucose_2.csv")),
    ("glucose_3.csv", include_str!("../../seed_data/glucose_3.csv")),
];

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("{file}: {source}")]
    Csv {
        file: &'static str,
        source: csv::Error,
    },
    #[error("gender code {0:?} must be exactly one character")]
    InvalidGenderCode(String),
    #[error("gender code {0:?} declared more than once")]
    DuplicateGenderCode(String),
    #[error("{file}: duplicate id {id}")]
    DuplicateId { file: &'static str, id: i32 },
    #[error("user {user_id} has invalid email {email:?}")]
    InvalidEmail { user_id: i32, email: String },
    #[error("{file}: row {row} references missing {target} {key}")]
    DanglingReference {
        file: &'static str,
        row: usize,
        target: &'static str,
        key: String,
    },
}

/// A development user. Ids are fixed so other fixtures can reference them.
#[derive(Debug, Clone, Deserialize)]
pub struct UserFixture {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub gender_code: Option<String>,
}

impl UserFixture {
    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            password: self.password.clone(),
            gender_code: self.gender_code.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightFixture {
    pub user_id: i32,
    pub current_weight: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GlucoseFixture {
    pub user_id: i32,
    pub current_glucose: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}

/// Every development fixture batch, parsed and checked for consistency.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub gender: Vec<Gender>,
    pub users: Vec<UserFixture>,
    pub food: Vec<Food>,
    pub sugar_consumption: Vec<NewSugarIntake>,
    pub weight: [Vec<WeightFixture>; 3],
    pub glucose: [Vec<GlucoseFixture>; 3],
}

pub fn parse<T: DeserializeOwned>(file: &'static str, data: &str) -> Result<Vec<T>, FixtureError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    reader
        .deserialize::<T>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| FixtureError::Csv { file, source })
}

fn parse_batches<T: DeserializeOwned>(
    files: &[(&'static str, &str); 3],
) -> Result<[Vec<T>; 3], FixtureError> {
    let [a, b, c] = files;
    Ok([
        parse(a.0, a.1)?,
        parse(b.0, b.1)?,
        parse(c.0, c.1)?,
    ])
}

impl Fixtures {
    /// The fixture set compiled into the binary from `seed_data/`.
    pub fn embedded() -> Result<Self, FixtureError> {
        let fixtures = Self {
            gender: parse("gender.csv", GENDER_CSV)?,
            users: parse("users.csv", USERS_CSV)?,
            food: parse("food.csv", FOOD_CSV)?,
            sugar_consumption: parse("sugar_consumption.csv", SUGAR_CSV)?,
            weight: parse_batches(&WEIGHT_CSV)?,
            glucose: parse_batches(&GLUCOSE_CSV)?,
        };
        fixtures.validate()?;
        Ok(fixtures)
    }

    pub fn validate(&self) -> Result<(), FixtureError> {
        let mut codes = HashSet::new();
        for g in &self.gender {
            if g.gender_code.chars().count() != 1 {
                return Err(FixtureError::InvalidGenderCode(g.gender_code.clone()));
            }
            if !codes.insert(g.gender_code.as_str()) {
                return Err(FixtureError::DuplicateGenderCode(g.gender_code.clone()));
            }
        }

        let mut user_ids = HashSet::new();
        for (row, u) in self.users.iter().enumerate() {
            if !user_ids.insert(u.user_id) {
                return Err(FixtureError::DuplicateId {
                    file: "users.csv",
                    id: u.user_id,
                });
            }
            if !is_valid_email(&u.email) {
                return Err(FixtureError::InvalidEmail {
                    user_id: u.user_id,
                    email: u.email.clone(),
                });
            }
            if let Some(code) = &u.gender_code {
                if !codes.contains(code.as_str()) {
                    return Err(dangling("users.csv", row, "gender", code));
                }
            }
        }

        let mut food_ids = HashSet::new();
        for f in &self.food {
            if !food_ids.insert(f.food_id) {
                return Err(FixtureError::DuplicateId {
                    file: "food.csv",
                    id: f.food_id,
                });
            }
        }

        for (row, s) in self.sugar_consumption.iter().enumerate() {
            if !user_ids.contains(&s.user_id) {
                return Err(dangling("sugar_consumption.csv", row, "user", s.user_id));
            }
            if !food_ids.contains(&s.food_id) {
                return Err(dangling("sugar_consumption.csv", row, "food", s.food_id));
            }
        }

        for (batch, &(file, _)) in self.weight.iter().zip(WEIGHT_CSV.iter()) {
            for (row, w) in batch.iter().enumerate() {
                if !user_ids.contains(&w.user_id) {
                    return Err(dangling(file, row, "user", w.user_id));
                }
            }
        }
        for (batch, &(file, _)) in self.glucose.iter().zip(GLUCOSE_CSV.iter()) {
            for (row, g) in batch.iter().enumerate() {
                if !user_ids.contains(&g.user_id) {
                    return Err(dangling(file, row, "user", g.user_id));
                }
            }
        }

        Ok(())
    }
}

fn dangling(file: &'static str, row: usize, target: &'static str, key: impl ToString) -> FixtureError {
    FixtureError::DanglingReference {
        file,
        row,
        target,
        key: key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_fixtures_are_consistent() {
        let fixtures = Fixtures::embedded().expect("embedded fixtures should validate");
        assert_eq!(fixtures.gender.len(), 3);
        assert_eq!(fixtures.users.len(), 6);
        assert_eq!(fixtures.food.len(), 12);
        assert_eq!(fixtures.sugar_consumption.len(), 20);
        assert!(fixtures.weight.iter().all(|b| b.len() == 6));
        assert!(fixtures.glucose.iter().all(|b| b.len() == 6));
    }

    #[test]
    fn gender_codes_are_single_unique_characters() {
        let fixtures = Fixtures::embedded().unwrap();
        let codes: HashSet<_> = fixtures.gender.iter().map(|g| &g.gender_code).collect();
        assert_eq!(codes.len(), fixtures.gender.len());
        assert!(fixtures.gender.iter().all(|g| g.gender_code.chars().count() == 1));
    }

    #[test]
    fn empty_columns_become_none() {
        let fixtures = Fixtures::embedded().unwrap();
        let fran = fixtures.users.iter().find(|u| u.user_id == 6).unwrap();
        assert_eq!(fran.gender_code, None);
        assert_eq!(fran.phone, None);
        assert!(fixtures.sugar_consumption.iter().any(|s| s.notes.is_none()));
    }

    #[test]
    fn weight_batches_are_successive() {
        let fixtures = Fixtures::embedded().unwrap();
        for pair in fixtures.weight.windows(2) {
            let last = pair[0].iter().map(|w| w.recorded_at).max().unwrap();
            let first = pair[1].iter().map(|w| w.recorded_at).min().unwrap();
            assert!(last < first);
        }
    }

    #[test]
    fn rejects_long_gender_code() {
        let mut fixtures = Fixtures::embedded().unwrap();
        fixtures.gender[0].gender_code = "FF".into();
        assert!(matches!(
            fixtures.validate(),
            Err(FixtureError::InvalidGenderCode(code)) if code == "FF"
        ));
    }

    #[test]
    fn rejects_duplicate_gender_code() {
        let mut fixtures = Fixtures::embedded().unwrap();
        fixtures.gender[1].gender_code = fixtures.gender[0].gender_code.clone();
        assert!(matches!(
            fixtures.validate(),
            Err(FixtureError::DuplicateGenderCode(_))
        ));
    }

    #[test]
    fn rejects_unknown_gender_on_user() {
        let mut fixtures = Fixtures::embedded().unwrap();
        fixtures.users[0].gender_code = Some("Z".into());
        let err = fixtures.validate().unwrap_err();
        assert!(matches!(
            err,
            FixtureError::DanglingReference { target: "gender", .. }
        ));
    }

    #[test]
    fn rejects_intake_for_missing_food() {
        let mut fixtures = Fixtures::embedded().unwrap();
        fixtures.sugar_consumption[3].food_id = 999;
        let err = fixtures.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "sugar_consumption.csv: row 3 references missing food 999"
        );
    }

    #[test]
    fn rejects_reading_for_missing_user() {
        let mut fixtures = Fixtures::embedded().unwrap();
        fixtures.glucose[2][0].user_id = 42;
        assert!(matches!(
            fixtures.validate(),
            Err(FixtureError::DanglingReference {
                file: "glucose_3.csv",
                target: "user",
                ..
            })
        ));
    }

    #[test]
    fn rejects_bad_email() {
        let mut fixtures = Fixtures::embedded().unwrap();
        fixtures.users[2].email = "cleo-at-sugarcoins".into();
        assert!(matches!(
            fixtures.validate(),
            Err(FixtureError::InvalidEmail { user_id: 3, .. })
        ));
    }

    #[test]
    fn malformed_timestamp_names_the_file() {
        let data = "user_id,current_weight,recorded_at\n1,70,yesterday\n";
        let err = parse::<WeightFixture>("weight_x.csv", data).unwrap_err();
        assert!(err.to_string().starts_with("weight_x.csv:"));
    }
}
