use std::sync::Arc;

use crate::{
    connection::{Connection, ConnectionConfiguration},
    error::Result,
    trip::Trip,
};

/// Entry point: owns one connection and opens trips on it.
///
/// ```no_run
/// # async fn hacker_news() -> internetdata::Result<()> {
/// use internetdata::Schema;
///
/// let lsd = internetdata::tab(None)?;
/// let posts = lsd
///     .connect()
///     .navigate("https://news.ycombinator.com")
///     .group("span.titleline")
///     .select(("a", "post"))
///     .run(&Schema::array(Schema::object([("post", Schema::string())])))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Lsd {
    connection: Arc<Connection>,
}

impl Lsd {
    /// Resolves credentials eagerly; a missing user or password fails here,
    /// not on the first query.
    pub fn new(config: Option<ConnectionConfiguration>) -> Result<Self> {
        Ok(Self::with_connection(Connection::new(config)?))
    }

    pub fn with_connection(connection: Connection) -> Self {
        Lsd {
            connection: Arc::new(connection),
        }
    }

    pub fn connection(&self) -> &Arc<Connection> {
        &self.connection
    }

    /// Opens a new, empty trip. Trips share the connection and nothing else.
    pub fn connect(&self) -> Trip {
        Trip::new(self.connection.clone())
    }
}

/// Shorthand for [`Lsd::new`].
pub fn tab(config: Option<ConnectionConfiguration>) -> Result<Lsd> {
    Lsd::new(config)
}
