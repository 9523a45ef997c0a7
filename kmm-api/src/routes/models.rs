use actix_web::{
    HttpResponse, Responder, ResponseError, delete, get,
    http::StatusCode,
    post, put,
    web::{Data, Json, Path, Query},
};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

use crate::k8s::{K8sClient, K8sError};
use crate::model::{FieldErrors, Model, REQUEST_PATH, REQUIRED, validate_draft};
use crate::routes::{DEFAULT_NAMESPACE, NamespaceQuery, error_map_response, list_valid_models};

const NAME_PATH: &str = "metadata.name";

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("The model is invalid: {0}")]
    Invalid(FieldErrors),

    #[error("name in path and body do not match")]
    NameMismatch,

    #[error("namespace in query and body do not match")]
    NamespaceMismatch,

    #[error("Model '{name}' already exists in namespace '{namespace}'.")]
    AlreadyExists { name: String, namespace: String },

    #[error("Model '{name}' not found in namespace '{namespace}'.")]
    NotFound { name: String, namespace: String },

    #[error("Model '{name}' in namespace '{namespace}' was modified concurrently.")]
    Conflict { name: String, namespace: String },

    #[error("Failed to fetch models")]
    ListModels(#[source] K8sError),

    #[error("The cluster returned an invalid model: {0}")]
    InvalidClusterObject(FieldErrors),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    K8s(#[from] K8sError),
}

impl ModelError {
    pub fn to_message(&self) -> String {
        match self {
            // Do not expose cluster or serialization details in error messages
            ModelError::InvalidClusterObject(_) | ModelError::Serde(_) | ModelError::K8s(_) => {
                "internal server error".to_string()
            }
            // Every other message is ok, as they do not divulge sensitive information
            e => e.to_string(),
        }
    }

    /// Returns the error map sent to the client.
    pub fn to_field_errors(&self) -> FieldErrors {
        match self {
            ModelError::Invalid(errors) => errors.clone(),
            e => FieldErrors::single(REQUEST_PATH, e.to_message()),
        }
    }
}

impl From<FieldErrors> for ModelError {
    fn from(errors: FieldErrors) -> Self {
        ModelError::Invalid(errors)
    }
}

impl ResponseError for ModelError {
    fn status_code(&self) -> StatusCode {
        match self {
            ModelError::Invalid(_) | ModelError::NameMismatch | ModelError::NamespaceMismatch => {
                StatusCode::BAD_REQUEST
            }
            ModelError::NotFound { .. } => StatusCode::NOT_FOUND,
            ModelError::AlreadyExists { .. } | ModelError::Conflict { .. } => StatusCode::CONFLICT,
            ModelError::ListModels(_)
            | ModelError::InvalidClusterObject(_)
            | ModelError::Serde(_)
            | ModelError::K8s(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            error!(error = ?self, "model request failed");
        }

        error_map_response(self.status_code(), &self.to_field_errors())
    }
}

/// Validates a submitted model, additionally requiring `metadata.name`.
fn parse_submitted(body: &Value) -> Result<Model, ModelError> {
    let name_missing = body
        .pointer("/metadata/name")
        .is_none_or(|name| name.is_null() || name.as_str().is_some_and(str::is_empty));

    match Model::parse(body) {
        Ok(_) if name_missing => Err(FieldErrors::single(NAME_PATH, REQUIRED).into()),
        Ok(model) => Ok(model),
        Err(mut errors) => {
            if name_missing && !errors.contains(NAME_PATH) {
                errors.add(NAME_PATH, REQUIRED);
            }
            Err(errors.into())
        }
    }
}

/// Maps a failed read or write of a single model onto the client-facing error.
fn write_error(error: K8sError, name: &str, namespace: &str) -> ModelError {
    match error {
        K8sError::NotFound => ModelError::NotFound {
            name: name.to_string(),
            namespace: namespace.to_string(),
        },
        K8sError::Conflict(_) => ModelError::Conflict {
            name: name.to_string(),
            namespace: namespace.to_string(),
        },
        e => ModelError::K8s(e),
    }
}

/// Validates an object the cluster handed back before it reaches the client.
fn parse_stored(value: &Value) -> Result<Model, ModelError> {
    Model::parse(value).map_err(ModelError::InvalidClusterObject)
}

#[utoipa::path(
    summary = "List models",
    description = "Lists the models of a namespace, or of every namespace when none is given. Models that fail validation are left out.",
    context_path = "/api",
    params(NamespaceQuery),
    responses(
        (status = 200, description = "Models listed successfully", body = Vec<Model>),
        (status = 500, description = "Internal server error", body = FieldErrors)
    ),
    tag = "Models"
)]
#[get("/models")]
pub async fn read_all_models(
    k8s_client: Data<dyn K8sClient>,
    query: Query<NamespaceQuery>,
) -> Result<impl Responder, ModelError> {
    let models = list_valid_models(k8s_client.get_ref(), query.namespace(), "models")
        .await
        .map_err(ModelError::ListModels)?;

    Ok(Json(models))
}

#[utoipa::path(
    summary = "Create a model",
    description = "Validates the model and creates it in its namespace, `default` when unset.",
    context_path = "/api",
    request_body = Model,
    responses(
        (status = 201, description = "Model created successfully", body = Model),
        (status = 400, description = "The model is invalid", body = FieldErrors),
        (status = 409, description = "A model with this name already exists", body = FieldErrors),
        (status = 500, description = "Internal server error", body = FieldErrors)
    ),
    tag = "Models"
)]
#[post("/models")]
pub async fn create_model(
    k8s_client: Data<dyn K8sClient>,
    body: Json<Value>,
) -> Result<impl Responder, ModelError> {
    let mut model = parse_submitted(&body)?;
    if model.namespace().is_empty() {
        model.metadata.namespace = Some(DEFAULT_NAMESPACE.to_string());
    }
    let name = model.name().to_string();
    let namespace = model.namespace().to_string();

    let created = k8s_client
        .create_model(&namespace, &model.to_value()?)
        .await
        .map_err(|e| match e {
            K8sError::AlreadyExists => ModelError::AlreadyExists {
                name: name.clone(),
                namespace: namespace.clone(),
            },
            e => ModelError::K8s(e),
        })?;
    let created = parse_stored(&created)?;
    info!(%name, %namespace, "model created");

    Ok(HttpResponse::Created().json(created))
}

#[utoipa::path(
    summary = "Validate a model draft",
    description = "Runs the validator on a draft without touching the cluster. Blank required fields count as missing. An empty map means the draft can be submitted.",
    context_path = "/api",
    request_body = Object,
    responses(
        (status = 200, description = "Validation result", body = FieldErrors),
        (status = 400, description = "The body is not valid JSON", body = FieldErrors)
    ),
    tag = "Models"
)]
#[post("/models/validate")]
pub async fn validate_model_draft(body: Json<Value>) -> impl Responder {
    Json(validate_draft(&body))
}

#[utoipa::path(
    summary = "Replace a model",
    description = "Validates the model and replaces the stored one. The name and namespace in the body must match the request.",
    context_path = "/api",
    request_body = Model,
    params(
        ("name" = String, Path, description = "Name of the model"),
        NamespaceQuery,
    ),
    responses(
        (status = 200, description = "Model replaced successfully", body = Model),
        (status = 400, description = "The model is invalid or does not match the request", body = FieldErrors),
        (status = 404, description = "Model not found", body = FieldErrors),
        (status = 409, description = "The model was modified concurrently", body = FieldErrors),
        (status = 500, description = "Internal server error", body = FieldErrors)
    ),
    tag = "Models"
)]
#[put("/models/{name}")]
pub async fn update_model(
    k8s_client: Data<dyn K8sClient>,
    name: Path<String>,
    query: Query<NamespaceQuery>,
    body: Json<Value>,
) -> Result<impl Responder, ModelError> {
    let name = name.into_inner();
    let namespace = query.namespace_or_default().to_string();

    let mut model = Model::parse(&body)?;
    if model.name() != name {
        return Err(ModelError::NameMismatch);
    }
    let body_namespace = match model.namespace() {
        "" => DEFAULT_NAMESPACE,
        namespace => namespace,
    };
    if body_namespace != namespace {
        return Err(ModelError::NamespaceMismatch);
    }
    model.metadata.namespace = Some(namespace.clone());

    // Without a version the update applies to whatever is stored now.
    if model.metadata.resource_version.is_none() {
        let current = k8s_client
            .get_model(&namespace, &name)
            .await
            .map_err(|e| write_error(e, &name, &namespace))?;
        model.metadata.resource_version = current
            .pointer("/metadata/resourceVersion")
            .and_then(Value::as_str)
            .map(str::to_string);
    }

    let replaced = k8s_client
        .replace_model(&namespace, &name, &model.to_value()?)
        .await
        .map_err(|e| write_error(e, &name, &namespace))?;
    let replaced = parse_stored(&replaced)?;
    info!(%name, %namespace, "model replaced");

    Ok(Json(replaced))
}

#[utoipa::path(
    summary = "Delete a model",
    context_path = "/api",
    params(
        ("name" = String, Path, description = "Name of the model"),
        NamespaceQuery,
    ),
    responses(
        (status = 204, description = "Model deleted successfully"),
        (status = 404, description = "Model not found", body = FieldErrors),
        (status = 500, description = "Internal server error", body = FieldErrors)
    ),
    tag = "Models"
)]
#[delete("/models/{name}")]
pub async fn delete_model(
    k8s_client: Data<dyn K8sClient>,
    name: Path<String>,
    query: Query<NamespaceQuery>,
) -> Result<impl Responder, ModelError> {
    let name = name.into_inner();
    let namespace = query.namespace_or_default().to_string();

    k8s_client
        .delete_model(&namespace, &name)
        .await
        .map_err(|e| match e {
            K8sError::NotFound => ModelError::NotFound {
                name: name.clone(),
                namespace: namespace.clone(),
            },
            e => ModelError::K8s(e),
        })?;
    info!(%name, %namespace, "model deleted");

    Ok(HttpResponse::NoContent().finish())
}
