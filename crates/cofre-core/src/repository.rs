//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Lookups by id deliberately do
//! NOT filter on `is_deleted` so callers can act on soft-deleted rows
//! (restore, or reject with a domain error instead of a not-found).
//! List and aggregate operations only see non-deleted rows.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::CofreResult;
use crate::models::finance::{Finance, FinanceStatus, FinanceType};
use crate::models::user::{Address, User, UserStatus};

/// Offset/limit pagination parameters for list queries.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub skip: u64,
    pub take: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { skip: 0, take: 10 }
    }
}

/// Sparse update for a user row. `None` means "leave unchanged".
///
/// Presence is carried by the `Option` wrapper, never by truthiness of
/// the value itself, so empty strings and other falsy-but-valid values
/// still round-trip.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub nome: Option<String>,
    pub endereco: Option<Address>,
    pub status: Option<UserStatus>,
    pub password: Option<String>,
}

/// Sparse update for a finance row. Outer `Option` is presence, the
/// inner `Option` on `data_pagamento` distinguishes set from clear.
#[derive(Debug, Clone, Default)]
pub struct FinanceChanges {
    pub descricao: Option<String>,
    pub valor: Option<f64>,
    pub categoria: Option<String>,
    pub status: Option<FinanceStatus>,
    pub data_pagamento: Option<Option<DateTime<Utc>>>,
}

pub trait UserRepository: Send + Sync {
    /// Insert the full row, then re-read it by id so the returned
    /// object reflects server-computed defaults.
    fn create(&self, user: User) -> impl Future<Output = CofreResult<User>> + Send;

    /// Lookup by id, including soft-deleted rows.
    fn find_by_id(&self, id: Uuid) -> impl Future<Output = CofreResult<Option<User>>> + Send;

    /// Lookup by email among non-deleted rows.
    fn find_by_email(&self, email: &str)
    -> impl Future<Output = CofreResult<Option<User>>> + Send;

    /// Non-deleted rows, newest-first by `created`.
    fn find_all(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = CofreResult<Vec<User>>> + Send;

    fn update(
        &self,
        id: Uuid,
        changes: UserChanges,
    ) -> impl Future<Output = CofreResult<User>> + Send;

    fn delete(&self, id: Uuid) -> impl Future<Output = CofreResult<()>> + Send;

    fn restore(&self, id: Uuid) -> impl Future<Output = CofreResult<()>> + Send;

    /// Count of non-deleted rows.
    fn count(&self) -> impl Future<Output = CofreResult<u64>> + Send;

    /// Whether a non-deleted user with this email exists, optionally
    /// excluding one id (so a user can keep their own email on update).
    fn email_exists(
        &self,
        email: &str,
        exclude_id: Option<Uuid>,
    ) -> impl Future<Output = CofreResult<bool>> + Send;
}

pub trait FinanceRepository: Send + Sync {
    /// Insert the full row, then re-read it by id.
    fn create(&self, finance: Finance) -> impl Future<Output = CofreResult<Finance>> + Send;

    /// Lookup by id, including soft-deleted rows.
    fn find_by_id(&self, id: Uuid) -> impl Future<Output = CofreResult<Option<Finance>>> + Send;

    /// Non-deleted rows, newest-first by `data_transacao`.
    fn find_all(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = CofreResult<Vec<Finance>>> + Send;

    /// Non-deleted rows for one user, newest-first by `data_transacao`.
    fn find_by_user_id(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = CofreResult<Vec<Finance>>> + Send;

    fn update(
        &self,
        id: Uuid,
        changes: FinanceChanges,
    ) -> impl Future<Output = CofreResult<Finance>> + Send;

    fn delete(&self, id: Uuid) -> impl Future<Output = CofreResult<()>> + Send;

    fn restore(&self, id: Uuid) -> impl Future<Output = CofreResult<()>> + Send;

    fn count(&self) -> impl Future<Output = CofreResult<u64>> + Send;

    fn count_by_user_id(&self, user_id: Uuid) -> impl Future<Output = CofreResult<u64>> + Send;

    /// Sum of `valor` over non-deleted, `Confirmada` rows of the given
    /// type for one user. `0.0` when no rows match.
    fn sum_by_user_id(
        &self,
        user_id: Uuid,
        tipo: FinanceType,
    ) -> impl Future<Output = CofreResult<f64>> + Send;
}
