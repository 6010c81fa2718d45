use super::types::{AuthorObject, BookObject};
use crate::service::catalog_service::CatalogService;
use async_graphql::{Context, ErrorExtensions, Object, Result};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn book_count(&self, ctx: &Context<'_>) -> Result<i64> {
        ctx.data::<CatalogService>()?
            .book_count()
            .await
            .map_err(|err| err.extend())
    }

    async fn author_count(&self, ctx: &Context<'_>) -> Result<i64> {
        ctx.data::<CatalogService>()?
            .author_count()
            .await
            .map_err(|err| err.extend())
    }

    /// All books, or only those whose genres contain `genre` exactly.
    async fn all_books(&self, ctx: &Context<'_>, genre: Option<String>) -> Result<Vec<BookObject>> {
        let books = ctx
            .data::<CatalogService>()?
            .all_books(genre.as_deref())
            .await
            .map_err(|err| err.extend())?;
        Ok(books.into_iter().map(BookObject).collect())
    }

    async fn all_authors(&self, ctx: &Context<'_>) -> Result<Vec<AuthorObject>> {
        let authors = ctx
            .data::<CatalogService>()?
            .all_authors()
            .await
            .map_err(|err| err.extend())?;
        Ok(authors.into_iter().map(AuthorObject).collect())
    }
}
