pub mod argument;
pub mod compiler;
pub mod connection;
pub mod error;
pub mod executor;
pub mod instruction;
#[cfg(feature = "postgres")]
pub mod lsd;
pub mod operation;
pub mod schema;
pub mod trip;

#[cfg(feature = "cli")]
pub mod cli;

pub use argument::{Selection, SelectionPair};
pub use compiler::{Placement, compile};
pub use connection::{ConnectionConfiguration, Credentials};
#[cfg(feature = "postgres")]
pub use connection::Connection;
pub use error::{ConfigurationError, ConnectivityError, Error, ExecutionError, Result, ValidationError};
pub use executor::{Executor, Row};
pub use instruction::Instruction;
#[cfg(feature = "postgres")]
pub use lsd::{Lsd, tab};
pub use operation::{Operation, Target, TimeMode};
pub use schema::Schema;
pub use trip::Trip;
