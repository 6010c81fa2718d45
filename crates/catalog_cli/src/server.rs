//! HTTP transport for the catalog schema.
//!
//! ## Routes
//!
//! - `POST /`: execute one GraphQL request (JSON in, JSON out).
//! - `GET /`: GraphiQL playground pointed at `/`.
//! - `GET /health`: `{ "status": "ok", "version": "..." }`.

use async_graphql::http::GraphiQLSource;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use catalog_core::{core_version, CatalogSchema};
use log::{debug, info, warn};
use serde_json::json;
use std::net::SocketAddr;

/// Builds the router serving `schema`.
pub fn router(schema: CatalogSchema) -> Router {
    Router::new()
        .route("/", get(graphiql_handler).post(graphql_handler))
        .route("/health", get(health_handler))
        .with_state(schema)
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve(schema: CatalogSchema, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    info!("event=server_ready module=server status=ok url=http://{local_addr}/");

    axum::serve(listener, router(schema))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn graphql_handler(
    State(schema): State<CatalogSchema>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    debug!(
        "event=graphql_request module=server status=start operation={}",
        request.operation_name.as_deref().unwrap_or("anonymous")
    );
    let response = schema.execute(request).await;
    if response.is_err() {
        debug!(
            "event=graphql_request module=server status=error errors={}",
            response.errors.len()
        );
    }
    Json(response)
}

async fn graphiql_handler() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/").finish())
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok", "version": core_version() }))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=server_signal module=server status=error error={err}");
    }
}

#[cfg(test)]
mod tests {
    use super::router;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use catalog_core::{build_schema, CatalogService, SharedDb};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> axum::Router {
        router(build_schema(CatalogService::new(
            SharedDb::open_in_memory().unwrap(),
        )))
    }

    async fn post_graphql(app: axum::Router, query: &str) -> Value {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "query": query }).to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn post_executes_mutations_and_queries() {
        let app = app();

        let added = post_graphql(
            app.clone(),
            r#"mutation { addBook(title: "Refactoring", author: "Martin Fowler", genres: ["tech"]) { title author { name } } }"#,
        )
        .await;
        assert_eq!(
            added["data"]["addBook"],
            json!({ "title": "Refactoring", "author": { "name": "Martin Fowler" } })
        );

        let counted = post_graphql(app, "{ bookCount authorCount }").await;
        assert_eq!(counted["data"], json!({ "bookCount": 1, "authorCount": 1 }));
    }

    #[tokio::test]
    async fn get_root_serves_graphiql() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.to_lowercase().contains("graphiql"));
    }

    #[tokio::test]
    async fn health_reports_version() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], catalog_core::core_version());
    }
}
