use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::use_cases::accounts::create_account::{
    CreateAccount as CreateAccountUc, CreateAccountRequest as CreateAccountDto,
};
use crate::application::use_cases::accounts::delete_account::DeleteAccount as DeleteAccountUc;
use crate::application::use_cases::accounts::list_accounts::ListAccounts;
use crate::bootstrap::app_context::AppContext;
use crate::domain::accounts::account as domain;
use crate::presentation::http::error::{ApiError, ErrorBody};
use crate::presentation::http::gate::AccountOwner;

/// Public view of an account. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    pub balance: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<domain::Account> for Account {
    fn from(a: domain::Account) -> Self {
        Self {
            id: a.id,
            first_name: a.first_name,
            last_name: a.last_name,
            number: a.number,
            balance: a.balance,
            created_at: a.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteAccountResponse {
    pub deleted: Account,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/account", get(list_accounts).post(create_account))
        .route("/account/:id", get(get_account).delete(delete_account))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/account", tag = "Accounts", responses(
    (status = 200, body = [Account]),
    (status = 500, body = ErrorBody)
))]
pub async fn list_accounts(State(ctx): State<AppContext>) -> Result<Json<Vec<Account>>, ApiError> {
    let repo = ctx.account_repo();
    let uc = ListAccounts {
        repo: repo.as_ref(),
    };
    let accounts = uc.execute().await?;
    Ok(Json(accounts.into_iter().map(Account::from).collect()))
}

#[utoipa::path(post, path = "/account", tag = "Accounts", request_body = CreateAccountRequest, responses(
    (status = 200, body = Account),
    (status = 400, body = ErrorBody),
    (status = 409, body = ErrorBody),
    (status = 422, body = ErrorBody)
))]
pub async fn create_account(
    State(ctx): State<AppContext>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<Json<Account>, ApiError> {
    let Json(req) = payload?;
    let repo = ctx.account_repo();
    let numbers = ctx.account_numbers();
    let hasher = ctx.password_hasher();
    let uc = CreateAccountUc {
        repo: repo.as_ref(),
        numbers: numbers.as_ref(),
        hasher: hasher.as_ref(),
    };
    let dto = CreateAccountDto {
        first_name: req.first_name,
        last_name: req.last_name,
        password: req.password,
    };
    let account = uc.execute(&dto).await?;
    tracing::info!(id = account.id, number = account.number, "account_created");
    Ok(Json(account.into()))
}

#[utoipa::path(get, path = "/account/{id}", tag = "Accounts",
    params(
        ("id" = i64, Path, description = "Account id"),
        ("x-jwt-token" = String, Header, description = "Token issued by /login for this account")
    ),
    responses(
        (status = 200, body = Account),
        (status = 403, body = ErrorBody)
    ))]
pub async fn get_account(AccountOwner(account): AccountOwner) -> Json<Account> {
    Json(account.into())
}

#[utoipa::path(delete, path = "/account/{id}", tag = "Accounts",
    params(
        ("id" = i64, Path, description = "Account id"),
        ("x-jwt-token" = String, Header, description = "Token issued by /login for this account")
    ),
    responses(
        (status = 200, body = DeleteAccountResponse),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ))]
pub async fn delete_account(
    State(ctx): State<AppContext>,
    AccountOwner(owner): AccountOwner,
) -> Result<Json<DeleteAccountResponse>, ApiError> {
    let repo = ctx.account_repo();
    let uc = DeleteAccountUc {
        repo: repo.as_ref(),
    };
    let deleted = uc.execute(owner.id).await?;
    Ok(Json(DeleteAccountResponse {
        deleted: deleted.into(),
    }))
}
