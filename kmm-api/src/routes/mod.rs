use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use ::metrics::counter;
use serde::Deserialize;
use tracing::warn;
use utoipa::IntoParams;

use crate::k8s::{K8sClient, K8sError};
use crate::metrics::{ENDPOINT, KMM_INVALID_MODELS_DROPPED_TOTAL};
use crate::model::{FieldErrors, Model, REQUEST_PATH};

pub mod health_check;
pub mod metrics;
pub mod models;
pub mod namespaces;
pub mod openrouter;

/// Namespace used when a request does not name one.
pub const DEFAULT_NAMESPACE: &str = "default";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NamespaceQuery {
    /// Namespace to scope the request to.
    #[param(example = "default")]
    pub namespace: Option<String>,
}

impl NamespaceQuery {
    /// Returns the requested namespace, treating an empty value as absent.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|namespace| !namespace.is_empty())
    }

    /// Returns the requested namespace or [`DEFAULT_NAMESPACE`].
    pub fn namespace_or_default(&self) -> &str {
        self.namespace().unwrap_or(DEFAULT_NAMESPACE)
    }
}

/// Renders `errors` as the JSON error map every failing endpoint returns.
pub fn error_map_response(status: StatusCode, errors: &FieldErrors) -> HttpResponse {
    HttpResponse::build(status).json(errors)
}

/// Answers requests no route matched.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    let errors = FieldErrors::single(REQUEST_PATH, format!("{} not found", req.uri()));
    error_map_response(StatusCode::NOT_FOUND, &errors)
}

/// Turns JSON body extraction failures into a 400 error map.
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let errors = FieldErrors::single(REQUEST_PATH, error.to_string());
    let response = error_map_response(StatusCode::BAD_REQUEST, &errors);
    InternalError::from_response(error, response).into()
}

/// Lists models and keeps only those that pass validation.
///
/// Objects the cluster returns but the validator rejects are logged and
/// counted, never returned.
pub async fn list_valid_models(
    k8s_client: &dyn K8sClient,
    namespace: Option<&str>,
    endpoint: &'static str,
) -> Result<Vec<Model>, K8sError> {
    let items = k8s_client.list_models(namespace).await?;

    let mut models = Vec::with_capacity(items.len());
    for item in items {
        match Model::parse(&item) {
            Ok(model) => models.push(model),
            Err(errors) => {
                let name = item.pointer("/metadata/name").and_then(|name| name.as_str());
                let namespace = item
                    .pointer("/metadata/namespace")
                    .and_then(|namespace| namespace.as_str());
                warn!(?name, ?namespace, %errors, "dropping invalid model returned by the cluster");
                counter!(KMM_INVALID_MODELS_DROPPED_TOTAL, ENDPOINT => endpoint).increment(1);
            }
        }
    }

    Ok(models)
}
