use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::http::server::AppState;
use crate::provision::OperatorContext;

/// Bearer-key gate in front of every operator action.
///
/// On success the request carries an [`OperatorContext`] extension; the
/// provisioning handlers pass that context on explicitly instead of
/// reading any ambient auth state.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let inner = state.inner.load_full();

    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    if let Some(auth_val) = auth_header {
        if auth_val == format!("Bearer {}", inner.config.admin.api_key) {
            request.extensions_mut().insert(OperatorContext {
                operator: inner.config.admin.operator.clone(),
            });
            return Ok(next.run(request).await);
        }
    }

    Err(StatusCode::UNAUTHORIZED)
}
