//! Core of the catalog service: authors, books, storage and the GraphQL API.
//! This crate is the single source of truth for catalog invariants.

pub mod db;
pub mod graphql;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::SharedDb;
pub use graphql::{build_schema, export_sdl, CatalogSchema};
pub use logging::{default_log_level, init_logging, logging_status, LogSink};
pub use model::author::{Author, AuthorId};
pub use model::book::{Book, BookId};
pub use model::validation::CatalogValidationError;
pub use repo::author_repo::{AuthorRepository, AuthorUpsert, SqliteAuthorRepository};
pub use repo::book_repo::{BookListQuery, BookRepository, SqliteBookRepository};
pub use repo::{RepoError, RepoResult};
pub use service::catalog_service::{
    AddBookRequest, CatalogError, CatalogResult, CatalogService, EditAuthorRequest,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
