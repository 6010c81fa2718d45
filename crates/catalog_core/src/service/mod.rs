//! Catalog use-case services.
//!
//! # Responsibility
//! - Expose one typed async entry point per catalog query and mutation.
//! - Translate repository failures into the user-facing error taxonomy.

pub mod catalog_service;
