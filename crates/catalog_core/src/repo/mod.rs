//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data-access contracts the catalog service consumes
//!   (`count`, `find`, `find by id`, `find one`, `save`).
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes call the model's `validate()` before persistence.
//! - Constraint violations surface as `RepoError::Constraint`, not as raw
//!   SQLite failures.

pub mod author_repo;
pub mod book_repo;
mod error;

pub use error::{RepoError, RepoResult};

use log::warn;
use rusqlite::Connection;
use uuid::Uuid;

pub(crate) fn parse_uuid(column: &str, text: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{text}` in {column}")))
}

/// Runs `op` inside a named savepoint so multi-row writes land atomically,
/// whether or not the caller already opened a transaction.
pub(crate) fn with_savepoint<T>(
    conn: &Connection,
    name: &str,
    op: impl FnOnce() -> RepoResult<T>,
) -> RepoResult<T> {
    conn.execute_batch(&format!("SAVEPOINT {name};"))?;
    match op() {
        Ok(value) => {
            conn.execute_batch(&format!("RELEASE {name};"))?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) =
                conn.execute_batch(&format!("ROLLBACK TO {name}; RELEASE {name};"))
            {
                warn!(
                    "event=savepoint_rollback module=repo status=error savepoint={name} error={rollback_err}"
                );
            }
            Err(err)
        }
    }
}
