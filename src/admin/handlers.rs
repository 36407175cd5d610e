use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::http::server::AppState;
use crate::provision::{OperatorContext, ProvisioningResult, Stage};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Deserialize)]
pub struct ProvisionRequest {
    pub domain: String,
}

pub async fn get_status() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

/// Effective provisioning settings. Credentials are not echoed back.
pub async fn get_config(State(state): State<AppState>) -> Json<serde_json::Value> {
    let inner = state.inner.load();
    Json(serde_json::json!({
        "provisioning": &inner.config.provisioning,
        "reload": &inner.config.reload,
    }))
}

pub async fn post_provision(
    State(state): State<AppState>,
    Extension(ctx): Extension<OperatorContext>,
    Json(req): Json<ProvisionRequest>,
) -> (StatusCode, Json<ProvisioningResult>) {
    let provisioner = state.inner.load_full().provisioner.clone();

    // the stages do blocking filesystem work
    let result = tokio::task::spawn_blocking(move || provisioner.provision(&ctx, &req.domain))
        .await
        .unwrap_or_else(|e| ProvisioningResult {
            request_id: Uuid::new_v4(),
            success: false,
            domain: None,
            stage: None,
            message: format!("provisioning task failed: {}", e),
        });

    let code = if result.success {
        StatusCode::OK
    } else if result.stage == Some(Stage::Validate) {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (code, Json(result))
}
