//! SurrealDB repository implementations.

mod finance;
mod user;

pub use finance::SurrealFinanceRepository;
pub use user::SurrealUserRepository;
