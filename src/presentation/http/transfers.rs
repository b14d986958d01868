use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::put,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::use_cases::accounts::deposit::Deposit;
use crate::application::use_cases::accounts::transfer::Transfer;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::accounts::Account;
use crate::presentation::http::error::{ApiError, ErrorBody};
use crate::presentation::http::gate::AccountOwner;

#[derive(Debug, Deserialize, ToSchema)]
pub struct DepositRequest {
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub to_account: i64,
    pub amount: i64,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/deposit/:id", put(deposit))
        .route("/transfer/:id", put(transfer))
        .with_state(ctx)
}

#[utoipa::path(put, path = "/deposit/{id}", tag = "Transfers", request_body = DepositRequest,
    params(
        ("id" = i64, Path, description = "Account id"),
        ("x-jwt-token" = String, Header, description = "Token issued by /login for this account")
    ),
    responses(
        (status = 200, body = Account),
        (status = 400, body = ErrorBody),
        (status = 403, body = ErrorBody),
        (status = 422, body = ErrorBody)
    ))]
pub async fn deposit(
    State(ctx): State<AppContext>,
    AccountOwner(owner): AccountOwner,
    payload: Result<Json<DepositRequest>, JsonRejection>,
) -> Result<Json<Account>, ApiError> {
    let Json(req) = payload?;
    let repo = ctx.account_repo();
    let uc = Deposit {
        repo: repo.as_ref(),
    };
    let updated = uc.execute(owner.id, req.amount).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(put, path = "/transfer/{id}", tag = "Transfers", request_body = TransferRequest,
    params(
        ("id" = i64, Path, description = "Id of the account being debited"),
        ("x-jwt-token" = String, Header, description = "Token issued by /login for this account")
    ),
    responses(
        (status = 200, body = TransferRequest),
        (status = 400, body = ErrorBody),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody),
        (status = 422, body = ErrorBody)
    ))]
pub async fn transfer(
    State(ctx): State<AppContext>,
    AccountOwner(owner): AccountOwner,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<Json<TransferRequest>, ApiError> {
    let Json(req) = payload?;
    let repo = ctx.account_repo();
    let uc = Transfer {
        repo: repo.as_ref(),
    };
    uc.execute(&owner, req.to_account, req.amount).await?;
    Ok(Json(req))
}
