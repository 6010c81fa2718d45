//! Async-shared handle over one migrated SQLite connection.
//!
//! # Invariants
//! - The connection is only reachable through `run`/`run_in_transaction`.
//! - Storage calls execute on tokio's blocking pool, never on a runtime
//!   worker thread.
//! - The lock is held for exactly one storage call.

use super::{open_db, open_db_in_memory, DbError, DbResult};
use rusqlite::{Connection, TransactionBehavior};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinError;

/// Cloneable handle shared by every request of the catalog service.
#[derive(Clone)]
pub struct SharedDb {
    conn: Arc<Mutex<Connection>>,
}

impl SharedDb {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Opens a database file, migrating it first.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        open_db(path).map(Self::new)
    }

    /// Opens a fresh in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        open_db_in_memory().map(Self::new)
    }

    /// Runs one storage call with exclusive access to the connection.
    ///
    /// # Errors
    /// - Whatever `op` returns.
    /// - `DbError::Worker` when the blocking task panics or is cancelled.
    pub async fn run<T, E, F>(&self, op: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<DbError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn).lock_owned().await;
        match tokio::task::spawn_blocking(move || op(&*conn)).await {
            Ok(result) => result,
            Err(err) => Err(E::from(worker_failed(err))),
        }
    }

    /// Runs `op` inside an immediate transaction.
    ///
    /// Commits when `op` returns `Ok`; any error rolls every write back.
    pub async fn run_in_transaction<T, E, F>(&self, op: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<rusqlite::Error> + From<DbError> + Send + 'static,
    {
        let mut conn = Arc::clone(&self.conn).lock_owned().await;
        let task = tokio::task::spawn_blocking(move || -> Result<T, E> {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let value = op(&*tx)?;
            tx.commit()?;
            Ok(value)
        });
        match task.await {
            Ok(result) => result,
            Err(err) => Err(E::from(worker_failed(err))),
        }
    }
}

fn worker_failed(err: JoinError) -> DbError {
    let reason = if err.is_panic() {
        "panicked"
    } else {
        "was cancelled"
    };
    DbError::Worker(format!("storage task {reason}"))
}
