pub mod app;
pub mod config;
pub mod db;
pub mod food;
pub mod readings;
pub mod schema;
pub mod seed;
pub mod users;

pub use config::AppConfig;
pub use db::{connect_to_db, provision_database, AppState, Provisioning};
