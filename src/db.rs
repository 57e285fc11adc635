use std::time::Duration;

use sqlx::Connection;
use sqlx::postgres::{PgConnectOptions, PgConnection};

use crate::errors::SinkError;

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Open a fresh connection. Each recording call owns its connection; there is no pool.
pub async fn connect(options: Option<&PgConnectOptions>) -> Result<PgConnection, SinkError> {
    let options = options.ok_or(SinkError::Unconfigured)?;
    match tokio::time::timeout(CONNECT_TIMEOUT, PgConnection::connect_with(options)).await {
        Ok(Ok(conn)) => Ok(conn),
        Ok(Err(e)) => Err(SinkError::Connect(e)),
        Err(_) => Err(SinkError::Timeout),
    }
}

/// Close a connection, logging rather than failing if the goodbye is not acknowledged.
pub async fn release(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        log::debug!("Error closing PostgreSQL connection: {e}");
    }
}
