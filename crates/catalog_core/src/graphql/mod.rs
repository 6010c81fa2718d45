//! GraphQL schema over the catalog service.
//!
//! # Responsibility
//! - Map each `Query`/`Mutation` field onto one typed `CatalogService` call.
//! - Render service errors with stable extension codes.
//!
//! # Invariants
//! - Resolvers hold no state; the service is injected as schema data.
//! - The exported SDL is the wire contract for clients.

mod error;
mod mutation;
mod query;
mod types;

pub use error::{CODE_BAD_USER_INPUT, CODE_INTERNAL, CODE_NOT_FOUND};
pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use types::{AuthorObject, BookObject};

use crate::service::catalog_service::CatalogService;
use async_graphql::{EmptySubscription, Schema};

pub type CatalogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the executable schema bound to `service`.
pub fn build_schema(service: CatalogService) -> CatalogSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}

/// Renders the schema definition language without binding a service.
pub fn export_sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}
