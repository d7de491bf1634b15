//! Core type definitions for rollcall.
//!
//! This crate defines the plain data the people picker moves between its
//! lists:
//! - [`Person`] records returned by a directory service
//! - [`PersonId`] identifiers (opaque directory strings)
//! - [`TokenItem`] payloads carried by token add/remove events
//!
//! Nothing here performs I/O or owns any picker state.

mod ids;
mod person;
mod token;

pub use ids::PersonId;
pub use person::Person;
pub use token::TokenItem;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid person id: {0:?}")]
    InvalidId(String),
}
