pub mod repo;
pub mod repo_types;

pub use repo_types::{Food, NewSugarIntake, SugarIntake, SugarIntakeEntry};
