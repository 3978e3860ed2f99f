pub mod config;
pub mod error;
pub mod executor;
pub mod http;
pub mod logger;
pub mod models;
pub mod registration;
pub mod store;

#[cfg(test)]
mod test_support;

pub use self::config::{ServiceConfig, UnreadPolicy};
pub use error::ServiceError;
pub use executor::{HubOptions, QueryExecutor};
pub use store::{DatabaseStore, RecordStore};
