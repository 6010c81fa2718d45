//! Catalog use-case service.
//!
//! # Responsibility
//! - Implement the author/book queries and mutations on top of repositories.
//! - Own the find-or-create flow behind `add_book`.
//!
//! # Invariants
//! - `add_book` runs author upsert and book insert in one transaction; a
//!   rejected book leaves no new author behind.
//! - `edit_author` never creates authors.
//! - Write rejections always carry the full request as `invalid_args`.

use crate::db::SharedDb;
use crate::model::author::{Author, AuthorId};
use crate::model::book::Book;
use crate::repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
use crate::repo::book_repo::{BookListQuery, BookRepository, SqliteBookRepository};
use crate::repo::{RepoError, RepoResult};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;
use uuid::Uuid;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Service error for catalog use-cases.
#[derive(Debug)]
pub enum CatalogError {
    /// The store rejected a write; `invalid_args` echoes the request.
    Validation {
        message: String,
        invalid_args: serde_json::Value,
    },
    /// `edit_author` targeted a name with no matching author.
    AuthorNotFound(String),
    /// Any other persistence failure.
    Repo(RepoError),
}

impl CatalogError {
    fn from_write(err: RepoError, request: &impl Serialize) -> Self {
        if err.is_rejection() {
            return Self::Validation {
                message: err.to_string(),
                invalid_args: serde_json::to_value(request).unwrap_or(serde_json::Value::Null),
            };
        }
        Self::Repo(err)
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { message, .. } => write!(f, "{message}"),
            Self::AuthorNotFound(name) => write!(f, "author not found: `{name}`"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CatalogError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Input of the `addBook` mutation, as the client sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddBookRequest {
    pub title: String,
    /// Omitted from `invalid_args` when the client did not send it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<i32>,
    /// Author name; resolved to an existing author or created.
    pub author: String,
    /// Null entries are kept here and skipped when the book is stored.
    pub genres: Vec<Option<String>>,
}

/// Input of the `editAuthor` mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditAuthorRequest {
    pub name: String,
    pub set_born_to: i32,
}

/// Catalog facade shared by all request handlers.
#[derive(Clone)]
pub struct CatalogService {
    db: SharedDb,
}

impl CatalogService {
    pub fn new(db: SharedDb) -> Self {
        Self { db }
    }

    /// Total number of persisted books.
    pub async fn book_count(&self) -> CatalogResult<i64> {
        let count = self
            .db
            .run(|conn| SqliteBookRepository::new(conn).count_books())
            .await?;
        Ok(count)
    }

    /// Total number of persisted authors.
    pub async fn author_count(&self) -> CatalogResult<i64> {
        let count = self
            .db
            .run(|conn| SqliteAuthorRepository::new(conn).count_authors())
            .await?;
        Ok(count)
    }

    /// Lists books in insertion order, optionally keeping one genre only.
    pub async fn all_books(&self, genre: Option<&str>) -> CatalogResult<Vec<Book>> {
        let query = BookListQuery {
            genre: genre.map(str::to_owned),
        };
        let genre_filter = query.genre.is_some();
        let books = self
            .db
            .run(move |conn| SqliteBookRepository::new(conn).list_books(&query))
            .await?;
        debug!(
            "event=books_list module=service status=ok genre_filter={genre_filter} count={}",
            books.len()
        );
        Ok(books)
    }

    /// Lists authors in insertion order.
    pub async fn all_authors(&self) -> CatalogResult<Vec<Author>> {
        let authors = self
            .db
            .run(|conn| SqliteAuthorRepository::new(conn).list_authors())
            .await?;
        debug!(
            "event=authors_list module=service status=ok count={}",
            authors.len()
        );
        Ok(authors)
    }

    /// Resolves a book's author reference.
    pub async fn author_by_id(&self, id: AuthorId) -> CatalogResult<Option<Author>> {
        let author = self
            .db
            .run(move |conn| SqliteAuthorRepository::new(conn).get_author(id))
            .await?;
        Ok(author)
    }

    /// Number of books referencing `author_id`; computed on every call.
    pub async fn book_count_for_author(&self, author_id: AuthorId) -> CatalogResult<i64> {
        let count = self
            .db
            .run(move |conn| SqliteBookRepository::new(conn).count_books_by_author(author_id))
            .await?;
        Ok(count)
    }

    /// Adds a book, reusing the author with the given name or creating it.
    ///
    /// # Errors
    /// - `CatalogError::Validation` when the book or a new author is rejected.
    /// - `CatalogError::Repo` for storage failures.
    pub async fn add_book(&self, request: AddBookRequest) -> CatalogResult<Book> {
        let started_at = Instant::now();
        let input = request.clone();

        let outcome = self
            .db
            .run_in_transaction(move |conn| -> RepoResult<(Book, bool)> {
                let mut book = Book::new(input.title.as_str(), Uuid::nil());
                book.published = input.published;
                book.genres = Book::genres_from_input(&input.genres)?;
                book.validate()?;

                let upsert =
                    SqliteAuthorRepository::new(conn).find_or_create_author(&input.author)?;
                book.author_id = upsert.author.id;
                SqliteBookRepository::new(conn).create_book(&book)?;

                Ok((book, upsert.created))
            })
            .await;

        match outcome {
            Ok((book, author_created)) => {
                info!(
                    "event=book_add module=service status=ok book_id={} author_id={} author_created={} duration_ms={}",
                    book.id,
                    book.author_id,
                    author_created,
                    started_at.elapsed().as_millis()
                );
                Ok(book)
            }
            Err(err) => Err(write_failed("book_add", err, &request, started_at)),
        }
    }

    /// Sets the birth year of the author with the given name.
    ///
    /// # Errors
    /// - `CatalogError::AuthorNotFound` when no author has that name.
    /// - `CatalogError::Validation` when the store rejects the update.
    pub async fn edit_author(&self, request: EditAuthorRequest) -> CatalogResult<Author> {
        let started_at = Instant::now();
        let EditAuthorRequest { name, set_born_to } = request.clone();

        let outcome = self
            .db
            .run(move |conn| -> RepoResult<Option<Author>> {
                let repo = SqliteAuthorRepository::new(conn);
                let Some(mut author) = repo.find_author_by_name(&name)? else {
                    return Ok(None);
                };
                author.set_born(set_born_to);
                repo.update_author(&author)?;
                Ok(Some(author))
            })
            .await;

        match outcome {
            Ok(Some(author)) => {
                info!(
                    "event=author_edit module=service status=ok author_id={} duration_ms={}",
                    author.id,
                    started_at.elapsed().as_millis()
                );
                Ok(author)
            }
            Ok(None) | Err(RepoError::NotFound(_)) => {
                warn!("event=author_edit module=service status=error error_code=author_not_found");
                Err(CatalogError::AuthorNotFound(request.name))
            }
            Err(err) => Err(write_failed("author_edit", err, &request, started_at)),
        }
    }
}

fn write_failed(
    event: &str,
    err: RepoError,
    request: &impl Serialize,
    started_at: Instant,
) -> CatalogError {
    let duration_ms = started_at.elapsed().as_millis();
    if err.is_rejection() {
        warn!(
            "event={event} module=service status=error error_code=rejected duration_ms={duration_ms} error={err}"
        );
    } else {
        error!(
            "event={event} module=service status=error error_code=storage_failed duration_ms={duration_ms} error={err}"
        );
    }
    CatalogError::from_write(err, request)
}
