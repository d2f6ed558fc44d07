//! Finance message dispatcher.

use cofre_app::finance_service::{CreateFinanceInput, FinanceService, UpdateFinanceInput};
use cofre_core::error::CofreResult;
use cofre_core::repository::{FinanceRepository, Pagination};
use serde_json::json;
use uuid::Uuid;

use crate::dto::{BalanceResponse, FinanceResponse};
use crate::envelope::Envelope;
use crate::messages::FinanceMessage;

fn pagination(skip: Option<u64>, take: Option<u64>) -> Pagination {
    let default = Pagination::default();
    Pagination {
        skip: skip.unwrap_or(default.skip),
        take: take.unwrap_or(default.take),
    }
}

pub struct FinanceGateway<R: FinanceRepository> {
    finances: FinanceService<R>,
}

impl<R: FinanceRepository> FinanceGateway<R> {
    pub fn new(finances: FinanceService<R>) -> Self {
        Self { finances }
    }

    /// Dispatch one message to the matching service call and fold the
    /// outcome into an envelope.
    pub async fn handle(&self, msg: FinanceMessage) -> Envelope {
        match msg {
            FinanceMessage::CreateFinance {
                user_id,
                tipo,
                descricao,
                valor,
                categoria,
                data_transacao,
            } => respond(
                self.finances
                    .create(CreateFinanceInput {
                        user_id,
                        tipo,
                        descricao,
                        valor,
                        categoria,
                        data_transacao,
                    })
                    .await
                    .map(FinanceResponse::from),
            ),
            FinanceMessage::FindFinanceById { id } => respond(
                self.finances
                    .find_by_id(id)
                    .await
                    .map(FinanceResponse::from),
            ),
            FinanceMessage::FindFinancesByUserId {
                user_id,
                skip,
                take,
            } => respond(
                self.finances
                    .find_by_user_id(user_id, pagination(skip, take))
                    .await
                    .map(to_responses),
            ),
            FinanceMessage::FindAllFinances { skip, take } => respond(
                self.finances
                    .find_all(pagination(skip, take))
                    .await
                    .map(to_responses),
            ),
            FinanceMessage::UpdateFinance {
                id,
                descricao,
                valor,
                categoria,
            } => respond(
                self.finances
                    .update(
                        id,
                        UpdateFinanceInput {
                            descricao,
                            valor,
                            categoria,
                        },
                    )
                    .await
                    .map(FinanceResponse::from),
            ),
            FinanceMessage::DeleteFinance { id } => match self.finances.delete(id).await {
                Ok(()) => Envelope::ok(json!({ "message": "Finance deleted successfully" })),
                Err(err) => Envelope::err(&err),
            },
            FinanceMessage::ConfirmFinance { id } => {
                respond(self.finances.confirm(id).await.map(FinanceResponse::from))
            }
            FinanceMessage::CancelFinance { id } => {
                respond(self.finances.cancel(id).await.map(FinanceResponse::from))
            }
            FinanceMessage::RestoreFinance { id } => respond(self.restore(id).await),
            FinanceMessage::GetUserBalance { user_id } => respond(
                self.finances
                    .get_user_balance(user_id)
                    .await
                    .map(BalanceResponse::from),
            ),
        }
    }

    async fn restore(&self, id: Uuid) -> CofreResult<FinanceResponse> {
        self.finances.restore(id).await?;
        Ok(FinanceResponse::from(self.finances.find_by_id(id).await?))
    }
}

fn to_responses(finances: Vec<cofre_core::models::finance::Finance>) -> Vec<FinanceResponse> {
    finances.into_iter().map(FinanceResponse::from).collect()
}

fn respond<T: serde::Serialize>(result: CofreResult<T>) -> Envelope {
    match result {
        Ok(data) => Envelope::ok(data),
        Err(err) => Envelope::err(&err),
    }
}
