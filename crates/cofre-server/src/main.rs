//! COFRE Server — application entry point.
//!
//! Wires configuration, database bootstrap and the message gateways.
//! Transport listeners are attached by the deployment in front of the
//! gateways; this binary stops after readiness.

use cofre_app::{FinanceService, UserService};
use cofre_auth::{AuthConfig, AuthService};
use cofre_db::repository::{SurrealFinanceRepository, SurrealUserRepository};
use cofre_db::{DbConfig, DbError, DbManager};
use cofre_gateway::{FinanceGateway, UserGateway};
use tracing_subscriber::EnvFilter;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn db_config_from_env() -> DbConfig {
    let defaults = DbConfig::default();
    DbConfig {
        url: env_or("COFRE_DB_URL", &defaults.url),
        namespace: env_or("COFRE_DB_NAMESPACE", &defaults.namespace),
        database: env_or("COFRE_DB_DATABASE", &defaults.database),
        username: env_or("COFRE_DB_USERNAME", &defaults.username),
        password: env_or("COFRE_DB_PASSWORD", &defaults.password),
    }
}

fn auth_config_from_env() -> AuthConfig {
    AuthConfig {
        access_token_secret: env_or("COFRE_ACCESS_TOKEN_SECRET", "dev-access-secret"),
        refresh_token_secret: env_or("COFRE_REFRESH_TOKEN_SECRET", "dev-refresh-secret"),
        ..Default::default()
    }
}

#[tokio::main]
async fn main() -> Result<(), DbError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("cofre=info".parse().unwrap()))
        .json()
        .init();

    tracing::info!("Starting COFRE server...");

    let manager = DbManager::connect(&db_config_from_env()).await?;
    cofre_db::run_migrations(manager.db()).await?;

    let auth_config = auth_config_from_env();
    let _users = UserGateway::new(
        UserService::new(SurrealUserRepository::new(manager.db().clone())),
        AuthService::new(SurrealUserRepository::new(manager.db().clone()), auth_config),
    );
    let _finances = FinanceGateway::new(FinanceService::new(SurrealFinanceRepository::new(
        manager.db().clone(),
    )));

    tracing::info!("COFRE server ready.");

    Ok(())
}
