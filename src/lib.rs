//! Autocatalog: REST catalog of cars and motorbikes backed by PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod filters;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod validator;

pub use config::{load_from_env, AppConfig, Environment};
pub use error::{AppError, ConfigError};
pub use filters::{Filters, Metadata};
pub use migration::apply_migrations;
pub use models::{Car, Motorbike, Record, Resource};
pub use routes::app;
pub use service::CrudService;
pub use state::AppState;
pub use store::{create_pool, ensure_database_exists};
pub use validator::Validator;
