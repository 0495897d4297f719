//! Credentials and the Postgres-backed executor.

pub mod credentials;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use credentials::{ConnectionConfiguration, Credentials};
#[cfg(feature = "postgres")]
pub use postgres::Connection;
