//! SurrealDB implementation of [`UserRepository`].
//!
//! Rows are addressed as `type::record('user', <uuid>)`. Soft-deleted
//! rows stay in the table; id lookups see them, list and aggregate
//! queries filter them out.

use chrono::{DateTime, Utc};
use cofre_core::error::CofreResult;
use cofre_core::models::user::{Address, User, UserStatus};
use cofre_core::repository::{Pagination, UserChanges, UserRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct AddressRow {
    rua: String,
    numero: String,
    bairro: String,
    complemento: Option<String>,
    cidade: String,
    estado: String,
    cep: String,
}

impl From<Address> for AddressRow {
    fn from(a: Address) -> Self {
        Self {
            rua: a.rua,
            numero: a.numero,
            bairro: a.bairro,
            complemento: a.complemento,
            cidade: a.cidade,
            estado: a.estado,
            cep: a.cep,
        }
    }
}

impl From<AddressRow> for Address {
    fn from(r: AddressRow) -> Self {
        Self {
            rua: r.rua,
            numero: r.numero,
            bairro: r.bairro,
            complemento: r.complemento,
            cidade: r.cidade,
            estado: r.estado,
            cep: r.cep,
        }
    }
}

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct UserRow {
    nome: String,
    email: String,
    password: String,
    endereco: AddressRow,
    status: String,
    is_deleted: bool,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
    deleted: Option<DateTime<Utc>>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct UserRowWithId {
    record_id: String,
    nome: String,
    email: String,
    password: String,
    endereco: AddressRow,
    status: String,
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

/// Row struct for existence checks.
#[derive(Debug, SurrealValue)]
struct IdRow {
    #[allow(dead_code)]
    record_id: String,
}

fn parse_status(s: &str) -> Result<UserStatus, DbError> {
    match s {
        "ativo" => Ok(UserStatus::Ativo),
        "inativo" => Ok(UserStatus::Inativo),
        other => Err(DbError::Decode(format!("unknown user status: {other}"))),
    }
}

fn status_to_string(s: UserStatus) -> &'static str {
    match s {
        UserStatus::Ativo => "ativo",
        UserStatus::Inativo => "inativo",
    }
}

impl UserRow {
    fn into_user(self, id: Uuid) -> Result<User, DbError> {
        Ok(User {
            id,
            nome: self.nome,
            email: self.email,
            password: self.password,
            endereco: self.endereco.into(),
            status: parse_status(&self.status)?,
            is_deleted: self.is_deleted,
            created: self.created,
            updated: self.updated,
            deleted: self.deleted,
        })
    }
}

impl UserRowWithId {
    fn try_into_user(self) -> Result<User, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(User {
            id,
            nome: self.nome,
            email: self.email,
            password: self.password,
            endereco: self.endereco.into(),
            status: parse_status(&self.status)?,
            is_deleted: self.is_deleted,
            created: self.created,
            updated: self.updated,
            deleted: self.deleted,
        })
    }
}

/// SurrealDB implementation of the User repository.
#[derive(Clone)]
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn create(&self, user: User) -> CofreResult<User> {
        let id = user.id;
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('user', $id) SET \
                 nome = $nome, email = $email, password = $password, \
                 endereco = $endereco, status = $status, \
                 is_deleted = $is_deleted, \
                 created = $created, updated = $updated, \
                 deleted = $deleted",
            )
            .bind(("id", id_str.clone()))
            .bind(("nome", user.nome))
            .bind(("email", user.email))
            .bind(("password", user.password))
            .bind(("endereco", AddressRow::from(user.endereco)))
            .bind(("status", status_to_string(user.status).to_string()))
            .bind(("is_deleted", user.is_deleted))
            .bind(("created", user.created))
            .bind(("updated", user.updated))
            .bind(("deleted", user.deleted))
            .await
            .map_err(DbError::from)?;

        result
            .check()
            .map_err(|e| DbError::Decode(e.to_string()))?;

        // Re-read so the returned object reflects server-computed
        // defaults.
        self.find_by_id(id).await?.ok_or_else(|| {
            DbError::Inconsistent(format!("Failed to create user {id_str}")).into()
        })
    }

    async fn find_by_id(&self, id: Uuid) -> CofreResult<Option<User>> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('user', $id)")
            .bind(("id", id_str))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.into_user(id)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> CofreResult<Option<User>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 WHERE email = $email AND is_deleted = false",
            )
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_user()?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self, pagination: Pagination) -> CofreResult<Vec<User>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 WHERE is_deleted = false \
                 ORDER BY created DESC \
                 LIMIT $take START $skip",
            )
            .bind(("take", pagination.take))
            .bind(("skip", pagination.skip))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        let users = rows
            .into_iter()
            .map(|row| row.try_into_user())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(users)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> CofreResult<User> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if changes.nome.is_some() {
            sets.push("nome = $nome");
        }
        if changes.endereco.is_some() {
            sets.push("endereco = $endereco");
        }
        if changes.status.is_some() {
            sets.push("status = $status");
        }
        if changes.password.is_some() {
            sets.push("password = $password");
        }
        sets.push("updated = time::now()");

        let query = format!("UPDATE type::record('user', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(nome) = changes.nome {
            builder = builder.bind(("nome", nome));
        }
        if let Some(endereco) = changes.endereco {
            builder = builder.bind(("endereco", AddressRow::from(endereco)));
        }
        if let Some(status) = changes.status {
            builder = builder.bind(("status", status_to_string(status).to_string()));
        }
        if let Some(password) = changes.password {
            builder = builder.bind(("password", password));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or(DbError::NotFound {
            entity: "User".into(),
            id: id_str,
        })?;

        Ok(row.into_user(id)?)
    }

    async fn delete(&self, id: Uuid) -> CofreResult<()> {
        self.db
            .query(
                "UPDATE type::record('user', $id) SET \
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
                "UPDATE type::record('user', $id) SET \
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
                "SELECT count() AS total FROM user \
                 WHERE is_deleted = false GROUP ALL",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }

    async fn email_exists(&self, email: &str, exclude_id: Option<Uuid>) -> CofreResult<bool> {
        let mut result = match exclude_id {
            Some(exclude) => self
                .db
                .query(
                    "SELECT meta::id(id) AS record_id FROM user \
                     WHERE email = $email AND is_deleted = false \
                     AND meta::id(id) != $exclude",
                )
                .bind(("email", email.to_string()))
                .bind(("exclude", exclude.to_string()))
                .await
                .map_err(DbError::from)?,
            None => self
                .db
                .query(
                    "SELECT meta::id(id) AS record_id FROM user \
                     WHERE email = $email AND is_deleted = false",
                )
                .bind(("email", email.to_string()))
                .await
                .map_err(DbError::from)?,
        };

        let rows: Vec<IdRow> = result.take(0).map_err(DbError::from)?;
        Ok(!rows.is_empty())
    }
}
