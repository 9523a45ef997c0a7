use actix_web::{
    HttpResponse, Responder, ResponseError, get,
    http::StatusCode,
    web::{Data, Json},
};
use thiserror::Error;
use tracing::error;

use crate::k8s::{K8sClient, K8sError};
use crate::model::{FieldErrors, REQUEST_PATH};
use crate::routes::error_map_response;

#[derive(Debug, Error)]
pub enum NamespaceError {
    #[error("Failed to fetch namespaces")]
    ListNamespaces(#[source] K8sError),
}

impl ResponseError for NamespaceError {
    fn status_code(&self) -> StatusCode {
        match self {
            NamespaceError::ListNamespaces(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        error!(error = ?self, "namespace request failed");

        let errors = FieldErrors::single(REQUEST_PATH, self.to_string());
        error_map_response(self.status_code(), &errors)
    }
}

#[utoipa::path(
    summary = "List namespaces",
    description = "Returns the names of all namespaces in the cluster.",
    context_path = "/api",
    responses(
        (status = 200, description = "Namespaces listed successfully", body = Vec<String>),
        (status = 500, description = "Internal server error", body = FieldErrors)
    ),
    tag = "Namespaces"
)]
#[get("/namespaces")]
pub async fn read_all_namespaces(
    k8s_client: Data<dyn K8sClient>,
) -> Result<impl Responder, NamespaceError> {
    let namespaces = k8s_client
        .list_namespaces()
        .await
        .map_err(NamespaceError::ListNamespaces)?;

    Ok(Json(namespaces))
}
