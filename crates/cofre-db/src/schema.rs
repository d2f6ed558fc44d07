//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation. Both tables carry soft-delete
//! columns (`is_deleted`, `deleted`) and audit timestamps (`created`,
//! `updated`).

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "create_users_and_finances",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — users and finances
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD nome ON TABLE user TYPE string;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD password ON TABLE user TYPE string DEFAULT '';
DEFINE FIELD endereco ON TABLE user TYPE object;
DEFINE FIELD endereco.rua ON TABLE user TYPE string;
DEFINE FIELD endereco.numero ON TABLE user TYPE string;
DEFINE FIELD endereco.bairro ON TABLE user TYPE string;
DEFINE FIELD endereco.complemento ON TABLE user TYPE option<string>;
DEFINE FIELD endereco.cidade ON TABLE user TYPE string;
DEFINE FIELD endereco.estado ON TABLE user TYPE string;
DEFINE FIELD endereco.cep ON TABLE user TYPE string;
DEFINE FIELD status ON TABLE user TYPE string \
    ASSERT $value IN ['ativo', 'inativo'] DEFAULT 'ativo';
DEFINE FIELD is_deleted ON TABLE user TYPE bool DEFAULT false;
DEFINE FIELD created ON TABLE user TYPE datetime DEFAULT time::now();
DEFINE FIELD updated ON TABLE user TYPE datetime DEFAULT time::now();
DEFINE FIELD deleted ON TABLE user TYPE option<datetime>;
-- Email uniqueness is scoped to non-deleted rows and enforced at the
-- service layer; the index here is a plain lookup index.
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email;
DEFINE INDEX idx_user_status ON TABLE user COLUMNS status;
DEFINE INDEX idx_user_is_deleted ON TABLE user COLUMNS is_deleted;
DEFINE INDEX idx_user_created ON TABLE user COLUMNS created;

-- =======================================================================
-- Finances
-- =======================================================================
DEFINE TABLE finance SCHEMAFULL;
DEFINE FIELD user_id ON TABLE finance TYPE string;
DEFINE FIELD tipo ON TABLE finance TYPE string \
    ASSERT $value IN ['receita', 'despesa'];
DEFINE FIELD descricao ON TABLE finance TYPE string;
DEFINE FIELD valor ON TABLE finance TYPE float;
DEFINE FIELD categoria ON TABLE finance TYPE string;
DEFINE FIELD status ON TABLE finance TYPE string \
    ASSERT $value IN ['pendente', 'confirmada', 'cancelada'] \
    DEFAULT 'pendente';
DEFINE FIELD data_transacao ON TABLE finance TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD data_pagamento ON TABLE finance TYPE option<datetime>;
DEFINE FIELD is_deleted ON TABLE finance TYPE bool DEFAULT false;
DEFINE FIELD created ON TABLE finance TYPE datetime DEFAULT time::now();
DEFINE FIELD updated ON TABLE finance TYPE datetime DEFAULT time::now();
DEFINE FIELD deleted ON TABLE finance TYPE option<datetime>;
DEFINE INDEX idx_finance_user_id ON TABLE finance COLUMNS user_id;
DEFINE INDEX idx_finance_is_deleted ON TABLE finance COLUMNS is_deleted;
DEFINE INDEX idx_finance_tipo ON TABLE finance COLUMNS tipo;
DEFINE INDEX idx_finance_status ON TABLE finance COLUMNS status;
DEFINE INDEX idx_finance_data_transacao ON TABLE finance \
    COLUMNS data_transacao;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
