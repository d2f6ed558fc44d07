//! User message dispatcher.

use cofre_app::user_service::{CreateUserInput, UpdateUserInput, UserService};
use cofre_auth::{AuthService, RegisterInput};
use cofre_core::error::CofreResult;
use cofre_core::repository::{Pagination, UserRepository};
use serde_json::json;
use uuid::Uuid;

use crate::dto::{AuthResponse, RefreshResponse, UserResponse};
use crate::envelope::Envelope;
use crate::messages::UserMessage;

fn pagination(skip: Option<u64>, take: Option<u64>) -> Pagination {
    let default = Pagination::default();
    Pagination {
        skip: skip.unwrap_or(default.skip),
        take: take.unwrap_or(default.take),
    }
}

pub struct UserGateway<R: UserRepository> {
    users: UserService<R>,
    auth: AuthService<R>,
}

impl<R: UserRepository> UserGateway<R> {
    pub fn new(users: UserService<R>, auth: AuthService<R>) -> Self {
        Self { users, auth }
    }

    /// Dispatch one message to the matching service call and fold the
    /// outcome into an envelope.
    pub async fn handle(&self, msg: UserMessage) -> Envelope {
        match msg {
            UserMessage::CreateUser {
                nome,
                email,
                endereco,
            } => respond(
                self.users
                    .create(CreateUserInput {
                        nome,
                        email,
                        endereco,
                    })
                    .await
                    .map(UserResponse::from),
            ),
            UserMessage::FindUserById { id } => {
                respond(self.users.find_by_id(id).await.map(UserResponse::from))
            }
            UserMessage::FindAllUsers { skip, take } => respond(
                self.users
                    .find_all(pagination(skip, take))
                    .await
                    .map(|users| users.into_iter().map(UserResponse::from).collect::<Vec<_>>()),
            ),
            UserMessage::UpdateUser { id, nome, endereco } => respond(
                self.users
                    .update(id, UpdateUserInput { nome, endereco })
                    .await
                    .map(UserResponse::from),
            ),
            UserMessage::DeleteUser { id } => match self.users.delete(id).await {
                Ok(()) => Envelope::ok(json!({ "message": "User deleted successfully" })),
                Err(err) => Envelope::err(&err),
            },
            UserMessage::ActivateUser { id } => {
                respond(self.users.activate(id).await.map(UserResponse::from))
            }
            UserMessage::DeactivateUser { id } => {
                respond(self.users.deactivate(id).await.map(UserResponse::from))
            }
            UserMessage::RestoreUser { id } => respond(self.restore(id).await),
            UserMessage::RegisterUser {
                nome,
                email,
                password,
                endereco,
            } => respond(
                self.auth
                    .register(RegisterInput {
                        nome,
                        email,
                        password,
                        endereco,
                    })
                    .await
                    .map(AuthResponse::from),
            ),
            UserMessage::LoginUser { email, password } => respond(
                self.auth
                    .login(&email, &password)
                    .await
                    .map(AuthResponse::from),
            ),
            UserMessage::RefreshToken { refresh_token } => respond(
                self.auth
                    .refresh(&refresh_token)
                    .await
                    .map(|token| RefreshResponse { token }),
            ),
        }
    }

    async fn restore(&self, id: Uuid) -> CofreResult<UserResponse> {
        self.users.restore(id).await?;
        Ok(UserResponse::from(self.users.find_by_id(id).await?))
    }
}

fn respond<T: serde::Serialize>(result: CofreResult<T>) -> Envelope {
    match result {
        Ok(data) => Envelope::ok(data),
        Err(err) => Envelope::err(&err),
    }
}
