use crate::service::catalog_service::CatalogError;
use async_graphql::{Error, ErrorExtensions, Value};
use log::warn;

/// Extension code for rejected writes; `invalidArgs` carries the input.
pub const CODE_BAD_USER_INPUT: &str = "BAD_USER_INPUT";
pub const CODE_NOT_FOUND: &str = "NOT_FOUND";
pub const CODE_INTERNAL: &str = "INTERNAL_SERVER_ERROR";

impl ErrorExtensions for CatalogError {
    fn extend(&self) -> Error {
        Error::new(self.to_string()).extend_with(|_, extensions| match self {
            CatalogError::Validation { invalid_args, .. } => {
                extensions.set("code", CODE_BAD_USER_INPUT);
                match Value::from_json(invalid_args.clone()) {
                    Ok(args) => extensions.set("invalidArgs", args),
                    Err(err) => warn!(
                        "event=graphql_error module=graphql status=error error_code=invalid_args_unrenderable error={err}"
                    ),
                }
            }
            CatalogError::AuthorNotFound(_) => extensions.set("code", CODE_NOT_FOUND),
            CatalogError::Repo(_) => extensions.set("code", CODE_INTERNAL),
        })
    }
}
