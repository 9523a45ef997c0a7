use actix_web::{
    HttpResponse, Responder, ResponseError, get,
    http::StatusCode,
    web::{Data, Json},
};
use chrono::Utc;
use thiserror::Error;
use tracing::error;

use crate::k8s::{K8sClient, K8sError};
use crate::marketplace::{MarketplaceListing, project_models};
use crate::model::{FieldErrors, REQUEST_PATH};
use crate::routes::{error_map_response, list_valid_models};

#[derive(Debug, Error)]
pub enum MarketplaceError {
    #[error("Failed to fetch models")]
    ListModels(#[source] K8sError),
}

impl ResponseError for MarketplaceError {
    fn status_code(&self) -> StatusCode {
        match self {
            MarketplaceError::ListModels(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        error!(error = ?self, "marketplace request failed");

        let errors = FieldErrors::single(REQUEST_PATH, self.to_string());
        error_map_response(self.status_code(), &errors)
    }
}

/// Lists the models of every namespace in the OpenRouter provider format.
///
/// Served both under `/api` and under `/public/api`, which is the prefix the
/// marketplace crawls.
#[utoipa::path(
    summary = "List marketplace models",
    description = "Projects every valid model in the cluster into an OpenRouter-compatible listing.",
    context_path = "/api",
    responses(
        (status = 200, description = "Listing returned successfully", body = MarketplaceListing),
        (status = 500, description = "Internal server error", body = FieldErrors)
    ),
    tag = "Marketplace"
)]
#[get("/openrouter/models")]
pub async fn read_marketplace_models(
    k8s_client: Data<dyn K8sClient>,
) -> Result<impl Responder, MarketplaceError> {
    let models = list_valid_models(k8s_client.get_ref(), None, "openrouter")
        .await
        .map_err(MarketplaceError::ListModels)?;

    Ok(Json(MarketplaceListing {
        data: project_models(&models, Utc::now()),
    }))
}
