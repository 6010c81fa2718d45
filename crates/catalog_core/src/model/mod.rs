//! Catalog domain model.
//!
//! # Responsibility
//! - Define the `Author` and `Book` records stored by the catalog.
//! - Own field constraints checked before every write.
//!
//! # Invariants
//! - Every record is identified by a stable UUID that is never reused.
//! - A book references its author by id; it never owns the author.

pub mod author;
pub mod book;
pub mod validation;
