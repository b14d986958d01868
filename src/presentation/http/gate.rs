use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::application::access::authorize_account;
use crate::bootstrap::app_context::AppContext;
use crate::domain::accounts::account::Account;
use crate::presentation::http::error::ApiError;

/// Header carrying the signed account token.
pub const TOKEN_HEADER: &str = "x-jwt-token";

/// The account addressed by the `{id}` path segment, present only when the
/// request's token was issued for that account.
pub struct AccountOwner(pub Account);

#[axum::async_trait]
impl FromRequestParts<AppContext> for AccountOwner {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let raw_id = Path::<String>::from_request_parts(parts, ctx)
            .await
            .map(|Path(id)| id)
            .unwrap_or_default();

        let repo = ctx.account_repo();
        let tokens = ctx.tokens();
        match authorize_account(repo.as_ref(), tokens.as_ref(), token.as_deref(), &raw_id).await {
            Ok(account) => Ok(AccountOwner(account)),
            Err(denial) => {
                tracing::debug!(?denial, path_id = %raw_id, "account_access_denied");
                Err(ApiError::PermissionDenied)
            }
        }
    }
}
