//! COFRE Gateway — the wire boundary.
//!
//! Translates typed RPC messages into service calls and folds every
//! outcome into a `{success, data?, error?}` envelope. Also owns the
//! domain-error-to-HTTP-status mapping the outer transport applies.

pub mod dto;
pub mod envelope;
pub mod finance;
pub mod messages;
pub mod user;

pub use dto::{AuthResponse, BalanceResponse, FinanceResponse, RefreshResponse, UserResponse};
pub use envelope::{http_status, Envelope};
pub use finance::FinanceGateway;
pub use messages::{FinanceMessage, UserMessage};
pub use user::UserGateway;
