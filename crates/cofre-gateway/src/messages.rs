//! Typed RPC messages.
//!
//! Each message is a tagged struct: the `pattern` tag carries the RPC
//! message name and `payload` the request body, validated by serde at
//! the transport boundary before anything reaches the service layer.
//! Payload field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use cofre_core::models::finance::FinanceType;
use cofre_core::models::user::Address;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "pattern", content = "payload", rename_all = "snake_case")]
pub enum UserMessage {
    CreateUser {
        nome: String,
        email: String,
        endereco: Address,
    },
    FindUserById {
        id: Uuid,
    },
    FindAllUsers {
        #[serde(default)]
        skip: Option<u64>,
        #[serde(default)]
        take: Option<u64>,
    },
    UpdateUser {
        id: Uuid,
        #[serde(default)]
        nome: Option<String>,
        #[serde(default)]
        endereco: Option<Address>,
    },
    DeleteUser {
        id: Uuid,
    },
    ActivateUser {
        id: Uuid,
    },
    DeactivateUser {
        id: Uuid,
    },
    RestoreUser {
        id: Uuid,
    },
    RegisterUser {
        nome: String,
        email: String,
        password: String,
        endereco: Address,
    },
    LoginUser {
        email: String,
        password: String,
    },
    RefreshToken {
        #[serde(rename = "refreshToken")]
        refresh_token: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "pattern", content = "payload", rename_all = "snake_case")]
pub enum FinanceMessage {
    #[serde(rename_all = "camelCase")]
    CreateFinance {
        user_id: Uuid,
        tipo: FinanceType,
        descricao: String,
        valor: f64,
        categoria: String,
        #[serde(default)]
        data_transacao: Option<DateTime<Utc>>,
    },
    FindFinanceById {
        id: Uuid,
    },
    #[serde(rename_all = "camelCase")]
    FindFinancesByUserId {
        user_id: Uuid,
        #[serde(default)]
        skip: Option<u64>,
        #[serde(default)]
        take: Option<u64>,
    },
    FindAllFinances {
        #[serde(default)]
        skip: Option<u64>,
        #[serde(default)]
        take: Option<u64>,
    },
    UpdateFinance {
        id: Uuid,
        #[serde(default)]
        descricao: Option<String>,
        #[serde(default)]
        valor: Option<f64>,
        #[serde(default)]
        categoria: Option<String>,
    },
    DeleteFinance {
        id: Uuid,
    },
    ConfirmFinance {
        id: Uuid,
    },
    CancelFinance {
        id: Uuid,
    },
    RestoreFinance {
        id: Uuid,
    },
    #[serde(rename_all = "camelCase")]
    GetUserBalance {
        user_id: Uuid,
    },
}
