use axum::Router;
use axum::extract::MatchedPath;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::app_context::AppContext;

pub mod accounts;
pub mod auth;
pub mod error;
pub mod gate;
pub mod health;
pub mod transfers;

fn cors_layer(ctx: &AppContext) -> CorsLayer {
    let origin = match ctx.cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(v)) => AllowOrigin::exact(v),
        // In production without a usable FRONTEND_URL, deny cross-origin calls
        _ if ctx.cfg.is_production => {
            AllowOrigin::exact(HeaderValue::from_static("http://invalid"))
        }
        _ => AllowOrigin::mirror_request(),
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PUT,
            http::Method::DELETE,
            http::Method::OPTIONS,
        ])
        .allow_headers([
            http::header::CONTENT_TYPE,
            http::HeaderName::from_static(gate::TOKEN_HEADER),
        ])
}

/// Every HTTP route of the service, with CORS and request tracing applied.
pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .merge(health::routes(ctx.clone()))
        .merge(auth::routes(ctx.clone()))
        .merge(accounts::routes(ctx.clone()))
        .merge(transfers::routes(ctx.clone()))
        .layer(cors_layer(&ctx))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        )
}
