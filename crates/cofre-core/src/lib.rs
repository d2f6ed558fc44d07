//! COFRE Core — domain entities, repository traits, and shared error
//! types for the back-office services.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{CofreError, CofreResult};
