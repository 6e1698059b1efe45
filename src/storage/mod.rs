//! Storage module for the record store and configuration.

pub mod config;
pub mod repository;
pub mod schema;
pub mod store;

pub use config::{
    default_db_path, get_config_path, get_data_dir, load_config, save_config, AppConfig,
    ConfigError, WeekStart,
};
pub use repository::{DataExport, Repository, RepositoryError};
pub use store::{Collection, Store, StoreError};
