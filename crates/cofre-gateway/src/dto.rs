//! Response DTOs.
//!
//! Entities never cross the wire directly; these mirror the original
//! response shapes (camelCase fields, no password, no soft-delete
//! bookkeeping).

use chrono::{DateTime, Utc};
use cofre_app::Balance;
use cofre_auth::AuthTokens;
use cofre_core::models::finance::{Finance, FinanceStatus, FinanceType};
use cofre_core::models::user::{Address, User, UserStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub endereco: Address,
    pub status: UserStatus,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nome: user.nome,
            email: user.email,
            endereco: user.endereco,
            status: user.status,
            created: user.created,
            updated: user.updated,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tipo: FinanceType,
    pub descricao: String,
    pub valor: f64,
    pub status: FinanceStatus,
    pub data_transacao: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_pagamento: Option<DateTime<Utc>>,
    pub categoria: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl From<Finance> for FinanceResponse {
    fn from(finance: Finance) -> Self {
        Self {
            id: finance.id,
            user_id: finance.user_id,
            tipo: finance.tipo,
            descricao: finance.descricao,
            valor: finance.valor,
            status: finance.status,
            data_transacao: finance.data_transacao,
            data_pagamento: finance.data_pagamento,
            categoria: finance.categoria,
            created: finance.created,
            updated: finance.updated,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub user_id: Uuid,
    pub receitas: f64,
    pub despesas: f64,
    pub saldo: f64,
}

impl From<Balance> for BalanceResponse {
    fn from(balance: Balance) -> Self {
        Self {
            user_id: balance.user_id,
            receitas: balance.receitas,
            despesas: balance.despesas,
            saldo: balance.saldo,
        }
    }
}

/// Slim user projection embedded in auth responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub status: UserStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: AuthUser,
    pub token: String,
    pub refresh_token: String,
}

impl From<AuthTokens> for AuthResponse {
    fn from(tokens: AuthTokens) -> Self {
        Self {
            user: AuthUser {
                id: tokens.user.id,
                nome: tokens.user.nome,
                email: tokens.user.email,
                status: tokens.user.status,
            },
            token: tokens.token,
            refresh_token: tokens.refresh_token,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endereco() -> Address {
        Address {
            rua: "Rua A".into(),
            numero: "1".into(),
            bairro: "Centro".into(),
            complemento: None,
            cidade: "Sao Paulo".into(),
            estado: "SP".into(),
            cep: "01000-000".into(),
        }
    }

    #[test]
    fn user_response_drops_password_and_soft_delete_fields() {
        let mut user = User::new("Alice", "alice@example.com", endereco());
        user.set_password("$argon2id$hash").unwrap();

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("isDeleted").is_none());
        assert!(json.get("is_deleted").is_none());
        assert_eq!(json["status"], "ativo");
    }

    #[test]
    fn finance_response_uses_camel_case() {
        let finance = Finance::new(
            Uuid::new_v4(),
            FinanceType::Despesa,
            "Aluguel",
            1500.0,
            "moradia",
            None,
        );

        let json = serde_json::to_value(FinanceResponse::from(finance)).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("dataTransacao").is_some());
        // Unpaid transactions omit the payment date entirely.
        assert!(json.get("dataPagamento").is_none());
        assert_eq!(json["tipo"], "despesa");
        assert_eq!(json["status"], "pendente");
    }
}
