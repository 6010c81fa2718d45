//! Author repository contract and SQLite implementation.
//!
//! # Invariants
//! - Author names are unique; `find_or_create_author` relies on the unique
//!   index to stay race-free.
//! - Listing order is insertion order.

use super::{parse_uuid, RepoError, RepoResult};
use crate::model::author::{Author, AuthorId};
use rusqlite::{params, Connection, Row};

const AUTHOR_SELECT_SQL: &str = "SELECT uuid, name, born FROM authors";

/// Outcome of an atomic find-or-create on the author name key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorUpsert {
    pub author: Author,
    /// `true` when this call inserted the record.
    pub created: bool,
}

/// Repository interface for author records.
pub trait AuthorRepository {
    fn count_authors(&self) -> RepoResult<i64>;
    fn list_authors(&self) -> RepoResult<Vec<Author>>;
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    /// Exact, case-sensitive name lookup.
    fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>>;
    /// Returns the author named `name`, inserting it first when absent.
    fn find_or_create_author(&self, name: &str) -> RepoResult<AuthorUpsert>;
    fn update_author(&self, author: &Author) -> RepoResult<()>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn count_authors(&self) -> RepoResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM authors;", [], |row| row.get(0))?;
        Ok(count)
    }

    fn list_authors(&self) -> RepoResult<Vec<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} ORDER BY seq ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut authors = Vec::new();

        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }

        Ok(authors)
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_author_row(row)?)),
            None => Ok(None),
        }
    }

    fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        let mut stmt = self.conn.prepare(&format!(
            "{AUTHOR_SELECT_SQL} WHERE name = ?1 ORDER BY seq ASC LIMIT 1;"
        ))?;
        let mut rows = stmt.query([name])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_author_row(row)?)),
            None => Ok(None),
        }
    }

    fn find_or_create_author(&self, name: &str) -> RepoResult<AuthorUpsert> {
        let candidate = Author::new(name);
        candidate.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO authors (uuid, name)
             VALUES (?1, ?2)
             ON CONFLICT(name) DO NOTHING;",
            params![candidate.id.to_string(), candidate.name.as_str()],
        )?;

        let author = self.find_author_by_name(name)?.ok_or_else(|| {
            RepoError::InvalidData(format!("author `{name}` missing after upsert"))
        })?;

        Ok(AuthorUpsert {
            author,
            created: inserted == 1,
        })
    }

    fn update_author(&self, author: &Author) -> RepoResult<()> {
        author.validate()?;

        let changed = self.conn.execute(
            "UPDATE authors SET name = ?1, born = ?2 WHERE uuid = ?3;",
            params![author.name.as_str(), author.born, author.id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(author.id));
        }

        Ok(())
    }
}

fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    let uuid_text: String = row.get("uuid")?;
    let author = Author {
        id: parse_uuid("authors.uuid", &uuid_text)?,
        name: row.get("name")?,
        born: row.get("born")?,
    };
    author
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("authors row `{uuid_text}`: {err}")))?;
    Ok(author)
}
