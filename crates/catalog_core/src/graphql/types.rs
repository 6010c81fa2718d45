use super::error::CODE_INTERNAL;
use crate::model::author::Author;
use crate::model::book::Book;
use crate::service::catalog_service::CatalogService;
use async_graphql::{Context, Error, ErrorExtensions, Object, Result, ID};

/// GraphQL view of an author record.
pub struct AuthorObject(pub Author);

#[Object(name = "Author")]
impl AuthorObject {
    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn born(&self) -> Option<i32> {
        self.0.born
    }

    /// Number of books crediting this author, counted per request.
    async fn book_count(&self, ctx: &Context<'_>) -> Result<i64> {
        ctx.data::<CatalogService>()?
            .book_count_for_author(self.0.id)
            .await
            .map_err(|err| err.extend())
    }
}

/// GraphQL view of a book record.
pub struct BookObject(pub Book);

#[Object(name = "Book")]
impl BookObject {
    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn published(&self) -> Option<i32> {
        self.0.published
    }

    /// Resolved lazily from the stored author reference.
    async fn author(&self, ctx: &Context<'_>) -> Result<AuthorObject> {
        let author = ctx
            .data::<CatalogService>()?
            .author_by_id(self.0.author_id)
            .await
            .map_err(|err| err.extend())?;

        author.map(AuthorObject).ok_or_else(|| {
            Error::new(format!(
                "author {} referenced by book {} does not exist",
                self.0.author_id, self.0.id
            ))
            .extend_with(|_, extensions| extensions.set("code", CODE_INTERNAL))
        })
    }

    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn genres(&self) -> Vec<Option<String>> {
        self.0.genres.iter().cloned().map(Some).collect()
    }
}
