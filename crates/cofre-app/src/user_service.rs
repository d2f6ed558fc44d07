//! User application service.

use cofre_core::error::{CofreError, CofreResult};
use cofre_core::models::user::{Address, User};
use cofre_core::repository::{Pagination, UserChanges, UserRepository};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub nome: String,
    pub email: String,
    pub endereco: Address,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    pub nome: Option<String>,
    pub endereco: Option<Address>,
}

pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a user without a credential (the auth registration path
    /// is the only one that sets a password).
    ///
    /// The email pre-check races with concurrent creates; the storage
    /// layer remains the final arbiter.
    pub async fn create(&self, input: CreateUserInput) -> CofreResult<User> {
        if self.repo.email_exists(&input.email, None).await? {
            return Err(CofreError::validation("Email already exists"));
        }

        let user = User::new(input.nome, input.email, input.endereco);
        self.repo.create(user).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> CofreResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| CofreError::not_found("User", id))
    }

    pub async fn find_all(&self, pagination: Pagination) -> CofreResult<Vec<User>> {
        self.repo.find_all(pagination).await
    }

    pub async fn update(&self, id: Uuid, input: UpdateUserInput) -> CofreResult<User> {
        let mut user = self.find_by_id(id).await?;

        if user.is_deleted {
            return Err(CofreError::validation("Cannot update a deleted user"));
        }

        let mut changes = UserChanges::default();
        if let Some(nome) = input.nome {
            user.update_name(nome)?;
            changes.nome = Some(user.nome.clone());
        }
        if let Some(endereco) = input.endereco {
            user.update_address(endereco)?;
            changes.endereco = Some(user.endereco.clone());
        }

        self.repo.update(id, changes).await
    }

    pub async fn delete(&self, id: Uuid) -> CofreResult<()> {
        self.find_by_id(id).await?;
        self.repo.delete(id).await
    }

    pub async fn restore(&self, id: Uuid) -> CofreResult<()> {
        let user = self.find_by_id(id).await?;

        if !user.is_deleted {
            return Err(CofreError::validation("User is not deleted"));
        }

        self.repo.restore(id).await
    }

    pub async fn activate(&self, id: Uuid) -> CofreResult<User> {
        let mut user = self.find_by_id(id).await?;
        user.activate()?;

        self.repo
            .update(
                id,
                UserChanges {
                    status: Some(user.status),
                    ..Default::default()
                },
            )
            .await
    }

    pub async fn deactivate(&self, id: Uuid) -> CofreResult<User> {
        let mut user = self.find_by_id(id).await?;
        user.deactivate()?;

        self.repo
            .update(
                id,
                UserChanges {
                    status: Some(user.status),
                    ..Default::default()
                },
            )
            .await
    }
}
