//! Domain models for COFRE.
//!
//! These are the core types shared across all crates. Each entity
//! enforces its own lifecycle invariants through guarded mutators.

pub mod finance;
pub mod user;
