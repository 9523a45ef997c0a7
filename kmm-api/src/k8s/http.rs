use async_trait::async_trait;
use k8s_openapi::api::core::v1::Namespace;
use kube::api::{Api, ApiResource, DeleteParams, DynamicObject, ListParams, PostParams};
use kube::core::TypeMeta;
use kube::{Client, Error as KubeError};
use serde_json::Value;
use tracing::debug;

use crate::k8s::{K8sClient, K8sError};
use crate::model::{API_VERSION, GROUP, KIND, PLURAL, VERSION};

/// Reason the API server reports when a create collides with an existing name.
const ALREADY_EXISTS_REASON: &str = "AlreadyExists";

/// HTTP-based implementation of [`K8sClient`].
///
/// The client wraps a [`kube::Client`] and addresses `Model` objects through
/// the dynamic API, so no generated types are needed for the custom resource.
#[derive(Clone)]
pub struct HttpK8sClient {
    client: Client,
    resource: ApiResource,
}

impl HttpK8sClient {
    /// Constructs a new client from the ambient configuration.
    ///
    /// A local kubeconfig takes precedence; inside a pod the service account
    /// credentials are used instead.
    pub async fn new() -> Result<HttpK8sClient, K8sError> {
        let client = Client::try_default().await?;

        Ok(Self::with_client(client))
    }

    /// Wraps an already configured [`kube::Client`].
    pub fn with_client(client: Client) -> HttpK8sClient {
        let resource = ApiResource {
            group: GROUP.to_string(),
            version: VERSION.to_string(),
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            plural: PLURAL.to_string(),
        };

        HttpK8sClient { client, resource }
    }

    fn models_api(&self, namespace: Option<&str>) -> Api<DynamicObject> {
        match namespace {
            Some(namespace) => Api::namespaced_with(self.client.clone(), namespace, &self.resource),
            None => Api::all_with(self.client.clone(), &self.resource),
        }
    }

    /// Converts a stored object back into JSON.
    ///
    /// List responses omit `apiVersion` and `kind` on their items, so they are
    /// filled in here to keep every returned object self-describing.
    fn to_value(&self, mut object: DynamicObject) -> Result<Value, K8sError> {
        if object.types.is_none() {
            object.types = Some(TypeMeta {
                api_version: self.resource.api_version.clone(),
                kind: self.resource.kind.clone(),
            });
        }

        Ok(serde_json::to_value(object)?)
    }
}

/// Maps API server failures onto the variants callers branch on.
fn classify(error: KubeError) -> K8sError {
    match error {
        KubeError::Api(response) if response.code == 404 => K8sError::NotFound,
        KubeError::Api(response)
            if response.code == 409 && response.reason == ALREADY_EXISTS_REASON =>
        {
            K8sError::AlreadyExists
        }
        KubeError::Api(response) if response.code == 409 => K8sError::Conflict(response.message),
        error => K8sError::Kube(error),
    }
}

#[async_trait]
impl K8sClient for HttpK8sClient {
    async fn list_models(&self, namespace: Option<&str>) -> Result<Vec<Value>, K8sError> {
        let models = self
            .models_api(namespace)
            .list(&ListParams::default())
            .await
            .map_err(classify)?;
        debug!(count = models.items.len(), ?namespace, "listed models");

        models
            .items
            .into_iter()
            .map(|object| self.to_value(object))
            .collect()
    }

    async fn get_model(&self, namespace: &str, name: &str) -> Result<Value, K8sError> {
        let model = self
            .models_api(Some(namespace))
            .get(name)
            .await
            .map_err(classify)?;

        self.to_value(model)
    }

    async fn create_model(&self, namespace: &str, model: &Value) -> Result<Value, K8sError> {
        let object: DynamicObject = serde_json::from_value(model.clone())?;
        let created = self
            .models_api(Some(namespace))
            .create(&PostParams::default(), &object)
            .await
            .map_err(classify)?;
        debug!(namespace, name = ?created.metadata.name, "created model");

        self.to_value(created)
    }

    async fn replace_model(
        &self,
        namespace: &str,
        name: &str,
        model: &Value,
    ) -> Result<Value, K8sError> {
        let object: DynamicObject = serde_json::from_value(model.clone())?;
        let replaced = self
            .models_api(Some(namespace))
            .replace(name, &PostParams::default(), &object)
            .await
            .map_err(classify)?;
        debug!(namespace, name, "replaced model");

        self.to_value(replaced)
    }

    async fn delete_model(&self, namespace: &str, name: &str) -> Result<(), K8sError> {
        self.models_api(Some(namespace))
            .delete(name, &DeleteParams::default())
            .await
            .map_err(classify)?;
        debug!(namespace, name, "deleted model");

        Ok(())
    }

    async fn list_namespaces(&self) -> Result<Vec<String>, K8sError> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        let namespaces = namespaces
            .list(&ListParams::default())
            .await
            .map_err(classify)?;

        Ok(namespaces
            .items
            .into_iter()
            .filter_map(|namespace| namespace.metadata.name)
            .collect())
    }
}
