pub mod database;

pub use database::PgStore;
