use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors emitted by the Kubernetes integration.
#[derive(Debug, Error)]
pub enum K8sError {
    /// The addressed object does not exist.
    #[error("The resource was not found")]
    NotFound,

    /// An object with the same name already exists in the namespace.
    #[error("The resource already exists")]
    AlreadyExists,

    /// The write was rejected because the object changed since it was read.
    #[error("The resource was modified concurrently: {0}")]
    Conflict(String),

    /// A serialization or deserialization error while building or parsing
    /// Kubernetes objects.
    #[error("An error occurred in serde when dealing with K8s: {0}")]
    Serde(#[from] serde_json::Error),

    /// An error returned by the [`kube`] client when talking to the API
    /// server.
    #[error("An error occurred with kube when dealing with K8s: {0}")]
    Kube(#[from] kube::Error),
}

/// Client interface describing the cluster operations used by the API.
///
/// `Model` objects are passed and returned as untyped JSON. Implementations
/// must surface missing objects as [`K8sError::NotFound`], name collisions on
/// create as [`K8sError::AlreadyExists`] and stale writes as
/// [`K8sError::Conflict`].
#[async_trait]
pub trait K8sClient: Send + Sync {
    /// Lists models in `namespace`, or in every namespace when `None`.
    async fn list_models(&self, namespace: Option<&str>) -> Result<Vec<Value>, K8sError>;

    /// Returns the model `name` from `namespace`.
    async fn get_model(&self, namespace: &str, name: &str) -> Result<Value, K8sError>;

    /// Creates `model` in `namespace` and returns the object stored by the
    /// cluster.
    async fn create_model(&self, namespace: &str, model: &Value) -> Result<Value, K8sError>;

    /// Replaces the model `name` in `namespace` with `model` and returns the
    /// stored object.
    ///
    /// `model` must carry `metadata.resourceVersion`; the API server refuses
    /// unconditional updates of custom resources.
    async fn replace_model(
        &self,
        namespace: &str,
        name: &str,
        model: &Value,
    ) -> Result<Value, K8sError>;

    /// Deletes the model `name` from `namespace`.
    async fn delete_model(&self, namespace: &str, name: &str) -> Result<(), K8sError>;

    /// Returns the names of all namespaces in the cluster.
    async fn list_namespaces(&self) -> Result<Vec<String>, K8sError>;
}
