use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use sqlx::{
    Column, Row as _, TypeInfo, ValueRef,
    postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgRow},
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::credentials::{ConnectionConfiguration, Credentials};
use crate::{
    error::{ConnectivityError, Error, ExecutionError, Result},
    executor::{Executor, Row},
    schema::decimal_to_number,
};

pub const LSD_HOST: &str = "lsd.so";
pub const LSD_PORT: u16 = 5432;

/// Cheapest trip the interpreter accepts, used to check a held handle.
pub const PROBE_QUERY: &str = "FROM https://lsd.so |> SELECT title";

/// A lazily opened handle to the LSD interpreter over the Postgres wire
/// protocol.
///
/// The database is named after the user. A handle is acquired on first
/// use, probed before every reuse and re-acquired once if the probe fails.
pub struct Connection {
    host: String,
    port: u16,
    credentials: Credentials,
    pool: Mutex<Option<PgPool>>,
}

impl Connection {
    /// Resolves credentials and prepares a connection. No network traffic
    /// happens until the first query.
    pub fn new(config: Option<ConnectionConfiguration>) -> Result<Self> {
        let credentials = Credentials::resolve(config.as_ref())?;
        Ok(Self::with_credentials(credentials))
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Connection {
            host: LSD_HOST.to_string(),
            port: LSD_PORT,
            credentials,
            pool: Mutex::new(None),
        }
    }

    /// Points the connection at another interpreter, e.g. a local one.
    pub fn with_host(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(self.credentials.user())
            .password(self.credentials.password())
            .database(self.credentials.user())
    }

    /// Returns a live handle, opening or replacing the held one as needed.
    pub async fn establish_connection(&self) -> Result<PgPool> {
        let mut held = self.pool.lock().await;

        if let Some(pool) = held.clone() {
            let probe = sqlx::raw_sql(PROBE_QUERY).execute(&pool).await;
            match probe {
                Ok(_) => return Ok(pool),
                Err(e) => {
                    warn!(host = %self.host, error = %e, "connection probe failed, reconnecting");
                    pool.close().await;
                    *held = None;
                }
            }
        }

        info!(host = %self.host, user = %self.credentials.user(), "connecting");
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(self.connect_options())
            .await
            .map_err(|e| self.connectivity(e))?;

        *held = Some(pool.clone());
        Ok(pool)
    }

    fn connectivity(&self, e: sqlx::Error) -> Error {
        ConnectivityError {
            host: self.host.clone(),
            message: e.to_string(),
        }
        .into()
    }

    fn classify(&self, e: sqlx::Error) -> Error {
        match e {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => self.connectivity(e),
            other => ExecutionError::new(other.to_string()).into(),
        }
    }
}

#[async_trait]
impl Executor for Connection {
    async fn execute(&self, query: &str) -> Result<Vec<Row>> {
        let pool = self.establish_connection().await?;
        debug!(query, "running query");

        let rows = sqlx::raw_sql(query)
            .fetch_all(&pool)
            .await
            .map_err(|e| self.classify(e))?;

        rows.iter()
            .map(|row| decode_row(row).map_err(|e| ExecutionError::new(e.to_string()).into()))
            .collect()
    }
}

fn decode_row(row: &PgRow) -> std::result::Result<Row, sqlx::Error> {
    let mut decoded = Row::new();
    for column in row.columns() {
        let value = decode_column(row, column.ordinal(), column.type_info().name())?;
        decoded.insert(column.name().to_string(), value);
    }
    Ok(decoded)
}

/// Maps a Postgres column onto the closest JSON value. Types without a
/// JSON counterpart are passed through as their text form.
fn decode_column(row: &PgRow, index: usize, type_name: &str) -> std::result::Result<Value, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(Value::Null);
    }

    let value = match type_name {
        "BOOL" => Value::Bool(row.try_get(index)?),
        "INT2" => Value::from(row.try_get::<i16, _>(index)?),
        "INT4" => Value::from(row.try_get::<i32, _>(index)?),
        "INT8" => Value::from(row.try_get::<i64, _>(index)?),
        "FLOAT4" => float(f64::from(row.try_get::<f32, _>(index)?)),
        "FLOAT8" => float(row.try_get::<f64, _>(index)?),
        "NUMERIC" => {
            let decimal: Decimal = row.try_get(index)?;
            decimal_to_number(decimal, false)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(decimal.to_string()))
        }
        "JSON" | "JSONB" => row.try_get::<Value, _>(index)?,
        _ => Value::String(row.try_get_unchecked::<String, _>(index)?),
    };
    Ok(value)
}

/// NaN and infinities have no JSON form and become `null`.
fn float(f: f64) -> Value {
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}
