//! COFRE Application — thin orchestration over the domain entities
//! and repository traits.
//!
//! Services load by id (absence is a `NotFound`), let the entity's own
//! guard methods enforce lifecycle invariants, and persist through
//! presence-aware change structs. Domain errors propagate untouched.

pub mod finance_service;
pub mod user_service;

pub use finance_service::{Balance, CreateFinanceInput, FinanceService, UpdateFinanceInput};
pub use user_service::{CreateUserInput, UpdateUserInput, UserService};
