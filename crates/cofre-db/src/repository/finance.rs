//! SurrealDB implementation of [`FinanceRepository`].
//!
//! `sum_by_user_id` only counts non-deleted `confirmada` rows of the
//! requested type; an empty match yields `0.0`, never a null.

use chrono::{DateTime, Utc};
use cofre_core::error::CofreResult;
use cofre_core::models::finance::{Finance, FinanceStatus, FinanceType};
use cofre_core::repository::{FinanceChanges, FinanceRepository, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct FinanceRow {
    user_id: String,
    tipo: String,
    descricao: String,
    valor: f64,
    categoria: String,
    status: String,
    data_transacao: DateTime<Utc>,
    data_pagamento: Option<DateTime<Utc>>,
    is_deleted: bool,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
    deleted: Option<DateTime<Utc>>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct FinanceRowWithId {
    record_id: String,
    user_id: String,
    tipo: String,
    descricao: String,
    valor: f64,
    categoria: String,
    status: String,
    data_transacao: DateTime<Utc>,
    data_pagamento: Option<DateTime<Utc>>,
    is_deleted: bool,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
    deleted: Option<DateTime<Utc>>,
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// Row struct for sum queries.
#[derive(Debug, SurrealValue)]
struct SumRow {
    total: f64,
}

fn parse_tipo(s: &str) -> Result<FinanceType, DbError> {
    match s {
        "receita" => Ok(FinanceType::Receita),
        "despesa" => Ok(FinanceType::Despesa),
        other => Err(DbError::Decode(format!("unknown finance type: {other}"))),
    }
}

fn tipo_to_string(t: FinanceType) -> &'static str {
    match t {
        FinanceType::Receita => "receita",
        FinanceType::Despesa => "despesa",
    }
}

fn parse_status(s: &str) -> Result<FinanceStatus, DbError> {
    match s {
        "pendente" => Ok(FinanceStatus::Pendente),
        "confirmada" => Ok(FinanceStatus::Confirmada),
        "cancelada" => Ok(FinanceStatus::Cancelada),
        other => Err(DbError::Decode(format!("unknown finance status: {other}"))),
    }
}

fn status_to_string(s: FinanceStatus) -> &'static str {
    match s {
        FinanceStatus::Pendente => "pendente",
        FinanceStatus::Confirmada => "confirmada",
        FinanceStatus::Cancelada => "cancelada",
    }
}

impl FinanceRow {
    fn into_finance(self, id: Uuid) -> Result<Finance, DbError> {
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| DbError::Decode(format!("invalid user UUID: {e}")))?;
        Ok(Finance {
            id,
            user_id,
            tipo: parse_tipo(&self.tipo)?,
            descricao: self.descricao,
            valor: self.valor,
            categoria: self.categoria,
            status: parse_status(&self.status)?,
            data_transacao: self.data_transacao,
            data_pagamento: self.data_pagamento,
            is_deleted: self.is_deleted,
            created: self.created,
            updated: self.updated,
            deleted: self.deleted,
        })
    }
}

impl FinanceRowWithId {
    fn try_into_finance(self) -> Result<Finance, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| DbError::Decode(format!("invalid user UUID: {e}")))?;
        Ok(Finance {
            id,
            user_id,
            tipo: parse_tipo(&self.tipo)?,
            descricao: self.descricao,
            valor: self.valor,
            categoria: self.categoria,
            status: parse_status(&self.status)?,
            data_transacao: self.data_transacao,
            data_pagamento: self.data_pagamento,
            is_deleted: self.is_deleted,
            created: self.created,
            updated: self.updated,
            deleted: self.deleted,
        })
    }
}

/// SurrealDB implementation of the Finance repository.
#[derive(Clone)]
pub struct SurrealFinanceRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealFinanceRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> FinanceRepository for SurrealFinanceRepository<C> {
    async fn create(&self, finance: Finance) -> CofreResult<Finance> {
        let id = finance.id;
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('finance', $id) SET \
                 user_id = $user_id, tipo = $tipo, \
                 descricao = $descricao, valor = $valor, \
                 categoria = $categoria, status = $status, \
                 data_transacao = $data_transacao, \
                 data_pagamento = $data_pagamento, \
                 is_deleted = $is_deleted, \
                 created = $created, updated = $updated, \
                 deleted = $deleted",
            )
            .bind(("id", id_str.clone()))
            .bind(("user_id", finance.user_id.to_string()))
            .bind(("tipo", tipo_to_string(finance.tipo).to_string()))
            .bind(("descricao", finance.descricao))
            .bind(("valor", finance.valor))
            .bind(("categoria", finance.categoria))
            .bind(("status", status_to_string(finance.status).to_string()))
            .bind(("data_transacao", finance.data_transacao))
            .bind(("data_pagamento", finance.data_pagamento))
            .bind(("is_deleted", finance.is_deleted))
            .bind(("created", finance.created))
            .bind(("updated", finance.updated))
            .bind(("deleted", finance.deleted))
            .await
            .map_err(DbError::from)?;

        result
            .check()
            .map_err(|e| DbError::Decode(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            DbError::Inconsistent(format!("Failed to create finance {id_str}")).into()
        })
    }

    async fn find_by_id(&self, id: Uuid) -> CofreResult<Option<Finance>> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('finance', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<FinanceRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.into_finance(id)?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self, pagination: Pagination) -> CofreResult<Vec<Finance>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM finance \
                 WHERE is_deleted = false \
                 ORDER BY data_transacao DESC \
                 LIMIT $take START $skip",
            )
            .bind(("take", pagination.take))
            .bind(("skip", pagination.skip))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<FinanceRowWithId> = result.take(0).map_err(DbError::from)?;
        let finances = rows
            .into_iter()
            .map(|row| row.try_into_finance())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(finances)
    }

    async fn find_by_user_id(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> CofreResult<Vec<Finance>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM finance \
                 WHERE user_id = $user_id AND is_deleted = false \
                 ORDER BY data_transacao DESC \
                 LIMIT $take START $skip",
            )
            .bind(("user_id", user_id.to_string()))
            .bind(("take", pagination.take))
            .bind(("skip", pagination.skip))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<FinanceRowWithId> = result.take(0).map_err(DbError::from)?;
        let finances = rows
            .into_iter()
            .map(|row| row.try_into_finance())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(finances)
    }

    async fn update(&self, id: Uuid, changes: FinanceChanges) -> CofreResult<Finance> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if changes.descricao.is_some() {
            sets.push("descricao = $descricao");
        }
        if changes.valor.is_some() {
            sets.push("valor = $valor");
        }
        if changes.categoria.is_some() {
            sets.push("categoria = $categoria");
        }
        if changes.status.is_some() {
            sets.push("status = $status");
        }
        if changes.data_pagamento.is_some() {
            sets.push("data_pagamento = $data_pagamento");
        }
        sets.push("updated = time::now()");

        let query = format!(
            "UPDATE type::record('finance', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(descricao) = changes.descricao {
            builder = builder.bind(("descricao", descricao));
        }
        if let Some(valor) = changes.valor {
            builder = builder.bind(("valor", valor));
        }
        if let Some(categoria) = changes.categoria {
            builder = builder.bind(("categoria", categoria));
        }
        if let Some(status) = changes.status {
            builder = builder.bind(("status", status_to_string(status).to_string()));
        }
        if let Some(data_pagamento) = changes.data_pagamento {
            // Option<Option<..>>: Some(Some(v)) = set, Some(None) = clear.
            builder = builder.bind(("data_pagamento", data_pagamento));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<FinanceRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or(DbError::NotFound {
            entity: "Finance".into(),
            id: id_str,
        })?;

        Ok(row.into_finance(id)?)
    }

    async fn delete(&self, id: Uuid) -> CofreResult<()> {
        self.db
            .query(
                "UPDATE type::record('finance', $id) SET \
                 is_deleted = true, deleted = time::now(), \
                 updated = time::now()",
            )
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn restore(&self, id: Uuid) -> CofreResult<()> {
        self.db
            .query(
                "UPDATE type::record('finance', $id) SET \
                 is_deleted = false, deleted = NONE, \
                 updated = time::now()",
            )
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn count(&self) -> CofreResult<u64> {
        let mut result = self
            .db
            .query(
                "SELECT count() AS total FROM finance \
                 WHERE is_deleted = false GROUP ALL",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }

    async fn count_by_user_id(&self, user_id: Uuid) -> CofreResult<u64> {
        let mut result = self
            .db
            .query(
                "SELECT count() AS total FROM finance \
                 WHERE user_id = $user_id AND is_deleted = false \
                 GROUP ALL",
            )
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }

    async fn sum_by_user_id(&self, user_id: Uuid, tipo: FinanceType) -> CofreResult<f64> {
        let mut result = self
            .db
            .query(
                "SELECT math::sum(valor) AS total FROM finance \
                 WHERE user_id = $user_id AND tipo = $tipo \
                 AND status = 'confirmada' AND is_deleted = false \
                 GROUP ALL",
            )
            .bind(("user_id", user_id.to_string()))
            .bind(("tipo", tipo_to_string(tipo).to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SumRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0.0))
    }
}
