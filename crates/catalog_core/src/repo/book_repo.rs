//! Book repository contract and SQLite implementation.
//!
//! # Invariants
//! - A book row and its genre rows are written in one savepoint.
//! - Genre filtering is an exact, case-sensitive membership test.
//! - Listing order is insertion order.

use super::{parse_uuid, with_savepoint, RepoError, RepoResult};
use crate::model::author::AuthorId;
use crate::model::book::{Book, BookId};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const BOOK_SELECT_SQL: &str = "SELECT uuid, title, published, author_uuid FROM books";
const GENRES_BY_BOOK_SQL: &str =
    "SELECT genre FROM book_genres WHERE book_uuid = ?1 ORDER BY position ASC;";

/// Query options for listing books.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookListQuery {
    /// Keep only books whose genres contain this exact value.
    pub genre: Option<String>,
}

/// Repository interface for book records.
pub trait BookRepository {
    fn count_books(&self) -> RepoResult<i64>;
    fn list_books(&self, query: &BookListQuery) -> RepoResult<Vec<Book>>;
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>>;
    fn create_book(&self, book: &Book) -> RepoResult<BookId>;
    fn count_books_by_author(&self, author_id: AuthorId) -> RepoResult<i64>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn load_genres(&self, book_uuid: &str) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare_cached(GENRES_BY_BOOK_SQL)?;
        let genres = stmt
            .query_map([book_uuid], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(genres)
    }

    fn parse_book_row(&self, row: &Row<'_>) -> RepoResult<Book> {
        let uuid_text: String = row.get("uuid")?;
        let author_text: String = row.get("author_uuid")?;

        let book = Book {
            id: parse_uuid("books.uuid", &uuid_text)?,
            title: row.get("title")?,
            published: row.get("published")?,
            author_id: parse_uuid("books.author_uuid", &author_text)?,
            genres: self.load_genres(&uuid_text)?,
        };
        book.validate()
            .map_err(|err| RepoError::InvalidData(format!("books row `{uuid_text}`: {err}")))?;
        Ok(book)
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn count_books(&self) -> RepoResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM books;", [], |row| row.get(0))?;
        Ok(count)
    }

    fn list_books(&self, query: &BookListQuery) -> RepoResult<Vec<Book>> {
        let mut sql = format!("{BOOK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(genre) = query.genre.as_deref() {
            sql.push_str(
                " AND EXISTS (
                    SELECT 1 FROM book_genres
                    WHERE book_genres.book_uuid = books.uuid
                      AND book_genres.genre = ?
                )",
            );
            bind_values.push(Value::Text(genre.to_string()));
        }

        sql.push_str(" ORDER BY seq ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(self.parse_book_row(row)?);
        }

        Ok(books)
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(self.parse_book_row(row)?)),
            None => Ok(None),
        }
    }

    fn create_book(&self, book: &Book) -> RepoResult<BookId> {
        book.validate()?;

        let book_uuid = book.id.to_string();
        let result = with_savepoint(self.conn, "create_book", || {
            self.conn.execute(
                "INSERT INTO books (uuid, title, published, author_uuid)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    book_uuid.as_str(),
                    book.title.as_str(),
                    book.published,
                    book.author_id.to_string(),
                ],
            )?;

            let mut insert_genre = self.conn.prepare_cached(
                "INSERT INTO book_genres (book_uuid, position, genre) VALUES (?1, ?2, ?3);",
            )?;
            for (position, genre) in book.genres.iter().enumerate() {
                insert_genre.execute(params![book_uuid.as_str(), position as i64, genre])?;
            }

            Ok(book.id)
        });

        result.map_err(|err| match err {
            RepoError::Constraint(message) if message.contains("books.title") => {
                RepoError::Constraint(format!(
                    "book title must be unique, `{}` already exists",
                    book.title
                ))
            }
            other => other,
        })
    }

    fn count_books_by_author(&self, author_id: AuthorId) -> RepoResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM books WHERE author_uuid = ?1;",
            [author_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
