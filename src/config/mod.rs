/// Database connection and schema creation
pub mod database;

/// Store list and ordering-weekday schedule from config.toml
pub mod schedule;
