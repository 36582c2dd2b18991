//! Types shared across the client: wire models, configuration, and the
//! error taxonomy.

pub mod config;
pub mod error;
pub mod models;

pub use error::ClientError;
