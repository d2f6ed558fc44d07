//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CofreError, CofreResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Ativo,
    Inativo,
}

/// Postal address value object. Carried data only — no behavior
/// depends on its contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    pub rua: String,
    pub numero: String,
    pub bairro: String,
    pub complemento: Option<String>,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    /// Argon2id PHC-format hash. Empty for users created outside the
    /// auth registration path.
    pub password: String,
    pub endereco: Address,
    pub status: UserStatus,
    pub is_deleted: bool,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub deleted: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new active user with a fresh ID and no password.
    pub fn new(nome: impl Into<String>, email: impl Into<String>, endereco: Address) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            nome: nome.into(),
            email: email.into(),
            password: String::new(),
            endereco,
            status: UserStatus::Ativo,
            is_deleted: false,
            created: now,
            updated: now,
            deleted: None,
        }
    }

    pub fn activate(&mut self) -> CofreResult<()> {
        if self.is_deleted {
            return Err(CofreError::validation("Cannot activate a deleted user"));
        }
        self.status = UserStatus::Ativo;
        self.updated = Utc::now();
        Ok(())
    }

    pub fn deactivate(&mut self) -> CofreResult<()> {
        if self.is_deleted {
            return Err(CofreError::validation("Cannot deactivate a deleted user"));
        }
        self.status = UserStatus::Inativo;
        self.updated = Utc::now();
        Ok(())
    }

    /// Mark the user deleted. Always allowed; recoverable via
    /// [`User::restore`].
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

    pub fn update_name(&mut self, nome: impl Into<String>) -> CofreResult<()> {
        if self.is_deleted {
            return Err(CofreError::validation(
                "Cannot update name of a deleted user",
            ));
        }
        let nome = nome.into();
        if nome.trim().is_empty() {
            return Err(CofreError::validation("Name cannot be empty"));
        }
        self.nome = nome;
        self.updated = Utc::now();
        Ok(())
    }

    pub fn update_address(&mut self, endereco: Address) -> CofreResult<()> {
        if self.is_deleted {
            return Err(CofreError::validation(
                "Cannot update address of a deleted user",
            ));
        }
        self.endereco = endereco;
        self.updated = Utc::now();
        Ok(())
    }

    /// Store an already-hashed credential.
    pub fn set_password(&mut self, hashed_password: impl Into<String>) -> CofreResult<()> {
        let hashed_password = hashed_password.into();
        if hashed_password.trim().is_empty() {
            return Err(CofreError::validation("Password cannot be empty"));
        }
        self.password = hashed_password;
        self.updated = Utc::now();
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Ativo && !self.is_deleted
    }

    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endereco() -> Address {
        Address {
            rua: "Rua das Flores".into(),
            numero: "100".into(),
            bairro: "Centro".into(),
            complemento: None,
            cidade: "Sao Paulo".into(),
            estado: "SP".into(),
            cep: "01000-000".into(),
        }
    }

    #[test]
    fn new_user_is_active_without_password() {
        let user = User::new("Alice", "alice@example.com", endereco());
        assert_eq!(user.status, UserStatus::Ativo);
        assert!(!user.is_deleted);
        assert!(user.deleted.is_none());
        assert!(!user.has_password());
        assert!(user.is_active());
    }

    #[test]
    fn deactivate_then_activate() {
        let mut user = User::new("Alice", "alice@example.com", endereco());
        user.deactivate().unwrap();
        assert_eq!(user.status, UserStatus::Inativo);
        assert!(!user.is_active());
        user.activate().unwrap();
        assert!(user.is_active());
    }

    #[test]
    fn deleted_user_rejects_mutations() {
        let mut user = User::new("Alice", "alice@example.com", endereco());
        user.soft_delete();

        let err = user.activate().unwrap_err();
        assert_eq!(err.to_string(), "Cannot activate a deleted user");
        let err = user.deactivate().unwrap_err();
        assert_eq!(err.to_string(), "Cannot deactivate a deleted user");
        let err = user.update_name("Bob").unwrap_err();
        assert_eq!(err.to_string(), "Cannot update name of a deleted user");
        let err = user.update_address(endereco()).unwrap_err();
        assert_eq!(err.to_string(), "Cannot update address of a deleted user");
    }

    #[test]
    fn soft_delete_and_restore_round_trip() {
        let mut user = User::new("Alice", "alice@example.com", endereco());
        user.soft_delete();
        assert!(user.is_deleted);
        assert!(user.deleted.is_some());
        assert!(!user.is_active());

        user.restore();
        assert!(!user.is_deleted);
        assert!(user.deleted.is_none());
        assert!(user.is_active());
    }

    #[test]
    fn update_name_rejects_blank() {
        let mut user = User::new("Alice", "alice@example.com", endereco());
        let err = user.update_name("   ").unwrap_err();
        assert_eq!(err.to_string(), "Name cannot be empty");
        assert_eq!(user.nome, "Alice");
    }

    #[test]
    fn update_name_stamps_updated() {
        let mut user = User::new("Alice", "alice@example.com", endereco());
        let before = user.updated;
        user.update_name("Alicia").unwrap();
        assert_eq!(user.nome, "Alicia");
        assert!(user.updated >= before);
    }

    #[test]
    fn set_password_rejects_blank() {
        let mut user = User::new("Alice", "alice@example.com", endereco());
        assert!(user.set_password("").is_err());
        user.set_password("$argon2id$fake").unwrap();
        assert!(user.has_password());
    }
}
