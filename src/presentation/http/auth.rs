use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::{ApiError, ErrorBody};

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub number: i64,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub number: i64,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new().route("/login", post(login)).with_state(ctx)
}

#[utoipa::path(post, path = "/login", tag = "Auth", request_body = LoginRequest, responses(
    (status = 200, body = LoginResponse),
    (status = 400, body = ErrorBody)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(req) = payload?;
    let repo = ctx.account_repo();
    let hasher = ctx.password_hasher();
    let tokens = ctx.tokens();
    let uc = LoginUc {
        repo: repo.as_ref(),
        hasher: hasher.as_ref(),
        tokens: tokens.as_ref(),
    };
    let dto = LoginDto {
        number: req.number,
        password: req.password,
    };
    let out = uc.execute(&dto).await?;
    tracing::info!(number = out.number, "login_succeeded");
    Ok(Json(LoginResponse {
        token: out.token,
        number: out.number,
    }))
}
