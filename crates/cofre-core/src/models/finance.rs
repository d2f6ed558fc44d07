//! Finance (transaction) domain model.
//!
//! A transaction starts out `Pendente` and moves to `Confirmada` or
//! `Cancelada`. The two settled states are terminal with respect to
//! each other; either can still be soft-deleted and restored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CofreError, CofreResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FinanceType {
    Receita,
    Despesa,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FinanceStatus {
    Pendente,
    Confirmada,
    Cancelada,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finance {
    pub id: Uuid,
    /// Owning user. Not validated against user existence at this level.
    pub user_id: Uuid,
    pub tipo: FinanceType,
    pub descricao: String,
    pub valor: f64,
    pub categoria: String,
    pub status: FinanceStatus,
    pub data_transacao: DateTime<Utc>,
    pub data_pagamento: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub deleted: Option<DateTime<Utc>>,
}

impl Finance {
    /// Create a new pending transaction with a fresh ID.
    pub fn new(
        user_id: Uuid,
        tipo: FinanceType,
        descricao: impl Into<String>,
        valor: f64,
        categoria: impl Into<String>,
        data_transacao: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            tipo,
            descricao: descricao.into(),
            valor,
            categoria: categoria.into(),
            status: FinanceStatus::Pendente,
            data_transacao: data_transacao.unwrap_or(now),
            data_pagamento: None,
            is_deleted: false,
            created: now,
            updated: now,
            deleted: None,
        }
    }

    /// Settle the transaction. Stamps `data_pagamento`.
    pub fn confirm(&mut self) -> CofreResult<()> {
        if self.is_deleted {
            return Err(CofreError::validation(
                "Cannot confirm a deleted transaction",
            ));
        }
        if self.status == FinanceStatus::Cancelada {
            return Err(CofreError::validation(
                "Cannot confirm a cancelled transaction",
            ));
        }
        self.status = FinanceStatus::Confirmada;
        self.data_pagamento = Some(Utc::now());
        self.updated = Utc::now();
        Ok(())
    }

    pub fn cancel(&mut self) -> CofreResult<()> {
        if self.is_deleted {
            return Err(CofreError::validation(
                "Cannot cancel a deleted transaction",
            ));
        }
        if self.status == FinanceStatus::Confirmada {
            return Err(CofreError::validation(
                "Cannot cancel a confirmed transaction",
            ));
        }
        self.status = FinanceStatus::Cancelada;
        self.updated = Utc::now();
        Ok(())
    }

    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
        self.deleted = Some(Utc::now());
        self.updated = Utc::now();
    }

    pub fn restore(&mut self) {
        self.is_deleted = false;
        self.deleted = None;
        self.updated = Utc::now();
    }

    pub fn update_description(&mut self, descricao: impl Into<String>) -> CofreResult<()> {
        if self.is_deleted {
            return Err(CofreError::validation(
                "Cannot update description of a deleted transaction",
            ));
        }
        let descricao = descricao.into();
        if descricao.trim().is_empty() {
            return Err(CofreError::validation("Description cannot be empty"));
        }
        self.descricao = descricao;
        self.updated = Utc::now();
        Ok(())
    }

    pub fn update_value(&mut self, valor: f64) -> CofreResult<()> {
        if self.is_deleted {
            return Err(CofreError::validation(
                "Cannot update value of a deleted transaction",
            ));
        }
        if valor <= 0.0 {
            return Err(CofreError::validation("Value must be greater than zero"));
        }
        if self.status == FinanceStatus::Confirmada {
            return Err(CofreError::validation(
                "Cannot update value of a confirmed transaction",
            ));
        }
        self.valor = valor;
        self.updated = Utc::now();
        Ok(())
    }

    pub fn update_category(&mut self, categoria: impl Into<String>) -> CofreResult<()> {
        if self.is_deleted {
            return Err(CofreError::validation(
                "Cannot update category of a deleted transaction",
            ));
        }
        let categoria = categoria.into();
        if categoria.trim().is_empty() {
            return Err(CofreError::validation("Category cannot be empty"));
        }
        self.categoria = categoria;
        self.updated = Utc::now();
        Ok(())
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == FinanceStatus::Confirmada && !self.is_deleted
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == FinanceStatus::Cancelada
    }

    pub fn is_income(&self) -> bool {
        self.tipo == FinanceType::Receita
    }

    pub fn is_expense(&self) -> bool {
        self.tipo == FinanceType::Despesa
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receita(valor: f64) -> Finance {
        Finance::new(
            Uuid::new_v4(),
            FinanceType::Receita,
            "Salario",
            valor,
            "renda",
            None,
        )
    }

    #[test]
    fn new_finance_is_pending_and_not_deleted() {
        let f = receita(5000.0);
        assert_eq!(f.status, FinanceStatus::Pendente);
        assert!(!f.is_deleted);
        assert!(f.data_pagamento.is_none());
        assert!(f.is_income());
        assert!(!f.is_expense());
    }

    #[test]
    fn confirm_sets_payment_date() {
        let mut f = receita(5000.0);
        f.confirm().unwrap();
        assert_eq!(f.status, FinanceStatus::Confirmada);
        assert!(f.data_pagamento.is_some());
        assert!(f.is_confirmed());
    }

    #[test]
    fn confirmed_cannot_be_cancelled() {
        let mut f = receita(5000.0);
        f.confirm().unwrap();
        let err = f.cancel().unwrap_err();
        assert_eq!(err.to_string(), "Cannot cancel a confirmed transaction");
        assert_eq!(f.status, FinanceStatus::Confirmada);
    }

    #[test]
    fn cancelled_cannot_be_confirmed() {
        let mut f = receita(5000.0);
        f.cancel().unwrap();
        assert!(f.is_cancelled());
        let err = f.confirm().unwrap_err();
        assert_eq!(err.to_string(), "Cannot confirm a cancelled transaction");
        assert_eq!(f.status, FinanceStatus::Cancelada);
        assert!(f.data_pagamento.is_none());
    }

    #[test]
    fn deleted_transaction_rejects_every_mutation() {
        let mut f = receita(5000.0);
        f.soft_delete();

        assert_eq!(
            f.confirm().unwrap_err().to_string(),
            "Cannot confirm a deleted transaction"
        );
        assert_eq!(
            f.cancel().unwrap_err().to_string(),
            "Cannot cancel a deleted transaction"
        );
        assert_eq!(
            f.update_value(10.0).unwrap_err().to_string(),
            "Cannot update value of a deleted transaction"
        );
        assert_eq!(
            f.update_description("x").unwrap_err().to_string(),
            "Cannot update description of a deleted transaction"
        );
        assert_eq!(
            f.update_category("x").unwrap_err().to_string(),
            "Cannot update category of a deleted transaction"
        );
    }

    #[test]
    fn restore_clears_deletion_marks() {
        let mut f = receita(5000.0);
        f.soft_delete();
        assert!(f.is_deleted);
        assert!(f.deleted.is_some());

        f.restore();
        assert!(!f.is_deleted);
        assert!(f.deleted.is_none());
        // Mutations work again after restore.
        f.confirm().unwrap();
    }

    #[test]
    fn update_value_rejects_non_positive() {
        let mut f = receita(5000.0);
        assert_eq!(
            f.update_value(0.0).unwrap_err().to_string(),
            "Value must be greater than zero"
        );
        assert_eq!(
            f.update_value(-1.5).unwrap_err().to_string(),
            "Value must be greater than zero"
        );
        assert_eq!(f.valor, 5000.0);
    }

    #[test]
    fn update_value_rejects_confirmed() {
        let mut f = receita(5000.0);
        f.confirm().unwrap();
        assert_eq!(
            f.update_value(100.0).unwrap_err().to_string(),
            "Cannot update value of a confirmed transaction"
        );
    }

    #[test]
    fn update_value_stamps_updated() {
        let mut f = receita(5000.0);
        let before = f.updated;
        f.update_value(123.45).unwrap();
        assert_eq!(f.valor, 123.45);
        assert!(f.updated >= before);
    }

    #[test]
    fn update_description_and_category_reject_blank() {
        let mut f = receita(5000.0);
        assert_eq!(
            f.update_description("  ").unwrap_err().to_string(),
            "Description cannot be empty"
        );
        assert_eq!(
            f.update_category("").unwrap_err().to_string(),
            "Category cannot be empty"
        );
        f.update_description("Salario mensal").unwrap();
        f.update_category("renda fixa").unwrap();
        assert_eq!(f.descricao, "Salario mensal");
        assert_eq!(f.categoria, "renda fixa");
    }
}
