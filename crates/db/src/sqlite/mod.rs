//! SQLite-Implementierungen der Repository-Traits

pub mod activities;
pub mod bugs;
pub mod pool;
pub mod users;

pub use pool::SqliteDb;
