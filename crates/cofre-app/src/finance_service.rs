//! Finance application service.
//!
//! Status transitions keep the original read-then-write pattern: the
//! entity guard runs against the loaded snapshot and the resulting
//! state is written back without a conditional update, so concurrent
//! transitions are last-write-wins.

use chrono::{DateTime, Utc};
use cofre_core::error::{CofreError, CofreResult};
use cofre_core::models::finance::{Finance, FinanceType};
use cofre_core::repository::{FinanceChanges, FinanceRepository, Pagination};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CreateFinanceInput {
    pub user_id: Uuid,
    pub tipo: FinanceType,
    pub descricao: String,
    pub valor: f64,
    pub categoria: String,
    pub data_transacao: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateFinanceInput {
    pub descricao: Option<String>,
    pub valor: Option<f64>,
    pub categoria: Option<String>,
}

/// Per-user balance over confirmed, non-deleted transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct Balance {
    pub user_id: Uuid,
    pub receitas: f64,
    pub despesas: f64,
    pub saldo: f64,
}

pub struct FinanceService<R: FinanceRepository> {
    repo: R,
}

impl<R: FinanceRepository> FinanceService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: CreateFinanceInput) -> CofreResult<Finance> {
        if input.valor <= 0.0 {
            return Err(CofreError::validation("Value must be greater than zero"));
        }

        let finance = Finance::new(
            input.user_id,
            input.tipo,
            input.descricao,
            input.valor,
            input.categoria,
            input.data_transacao,
        );
        self.repo.create(finance).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> CofreResult<Finance> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| CofreError::not_found("Finance", id))
    }

    pub async fn find_all(&self, pagination: Pagination) -> CofreResult<Vec<Finance>> {
        self.repo.find_all(pagination).await
    }

    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> CofreResult<Vec<Finance>> {
        self.repo.find_by_user_id(user_id, pagination).await
    }

    pub async fn update(&self, id: Uuid, input: UpdateFinanceInput) -> CofreResult<Finance> {
        let mut finance = self.find_by_id(id).await?;

        if finance.is_deleted {
            return Err(CofreError::validation("Cannot update a deleted transaction"));
        }

        let mut changes = FinanceChanges::default();
        if let Some(descricao) = input.descricao {
            finance.update_description(descricao)?;
            changes.descricao = Some(finance.descricao.clone());
        }
        if let Some(valor) = input.valor {
            finance.update_value(valor)?;
            changes.valor = Some(finance.valor);
        }
        if let Some(categoria) = input.categoria {
            finance.update_category(categoria)?;
            changes.categoria = Some(finance.categoria.clone());
        }

        self.repo.update(id, changes).await
    }

    pub async fn delete(&self, id: Uuid) -> CofreResult<()> {
        self.find_by_id(id).await?;
        self.repo.delete(id).await
    }

    pub async fn restore(&self, id: Uuid) -> CofreResult<()> {
        let finance = self.find_by_id(id).await?;

        if !finance.is_deleted {
            return Err(CofreError::validation("Transaction is not deleted"));
        }

        self.repo.restore(id).await
    }

    pub async fn confirm(&self, id: Uuid) -> CofreResult<Finance> {
        let mut finance = self.find_by_id(id).await?;
        finance.confirm()?;

        self.repo
            .update(
                id,
                FinanceChanges {
                    status: Some(finance.status),
                    data_pagamento: Some(finance.data_pagamento),
                    ..Default::default()
                },
            )
            .await
    }

    pub async fn cancel(&self, id: Uuid) -> CofreResult<Finance> {
        let mut finance = self.find_by_id(id).await?;
        finance.cancel()?;

        self.repo
            .update(
                id,
                FinanceChanges {
                    status: Some(finance.status),
                    ..Default::default()
                },
            )
            .await
    }

    pub async fn get_user_balance(&self, user_id: Uuid) -> CofreResult<Balance> {
        let receitas = self
            .repo
            .sum_by_user_id(user_id, FinanceType::Receita)
            .await?;
        let despesas = self
            .repo
            .sum_by_user_id(user_id, FinanceType::Despesa)
            .await?;

        Ok(Balance {
            user_id,
            receitas,
            despesas,
            saldo: receitas - despesas,
        })
    }
}
