use super::types::{AuthorObject, BookObject};
use crate::service::catalog_service::{AddBookRequest, CatalogService, EditAuthorRequest};
use async_graphql::{Context, ErrorExtensions, Object, Result};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Adds a book; an unknown author name creates the author as well.
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        title: String,
        published: Option<i32>,
        author: String,
        genres: Vec<Option<String>>,
    ) -> Result<Option<BookObject>> {
        let request = AddBookRequest {
            title,
            published,
            author,
            genres,
        };
        let book = ctx
            .data::<CatalogService>()?
            .add_book(request)
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(BookObject(book)))
    }

    async fn edit_author(
        &self,
        ctx: &Context<'_>,
        name: String,
        set_born_to: i32,
    ) -> Result<Option<AuthorObject>> {
        let author = ctx
            .data::<CatalogService>()?
            .edit_author(EditAuthorRequest { name, set_born_to })
            .await
            .map_err(|err| err.extend())?;
        Ok(Some(AuthorObject(author)))
    }
}
