#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use kmm_api::k8s::{K8sClient, K8sError};
use kube::core::ErrorResponse;
use serde_json::{Value, json};

/// Timestamp the mock stamps on every created object.
pub const CREATION_TIMESTAMP: &str = "2024-05-01T12:00:00Z";

/// In-memory stand-in for the cluster.
///
/// Mirrors the API server behaviors the routes rely on: name collisions on
/// create, missing objects on replace and delete, and optimistic concurrency
/// through `metadata.resourceVersion`, which every replace must carry.
pub struct MockK8sClient {
    models: Mutex<BTreeMap<(String, String), Value>>,
    namespaces: Vec<String>,
    next_version: AtomicU64,
    unavailable: AtomicBool,
}

impl Default for MockK8sClient {
    fn default() -> Self {
        Self {
            models: Mutex::new(BTreeMap::new()),
            namespaces: vec!["default".to_string(), "kube-system".to_string()],
            next_version: AtomicU64::new(1),
            unavailable: AtomicBool::new(false),
        }
    }
}

impl MockK8sClient {
    /// Stores `object` as is, bypassing every check.
    pub fn insert_raw(&self, namespace: &str, name: &str, object: Value) {
        self.models
            .lock()
            .unwrap()
            .insert((namespace.to_string(), name.to_string()), object);
    }

    /// Returns the stored object, if any.
    pub fn stored(&self, namespace: &str, name: &str) -> Option<Value> {
        self.models
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    /// Makes every following call fail as if the API server was down.
    pub fn make_unavailable(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), K8sError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(K8sError::Kube(kube::Error::Api(ErrorResponse {
                status: "Failure".to_string(),
                message: "etcdserver: request timed out".to_string(),
                reason: "InternalError".to_string(),
                code: 500,
            })));
        }

        Ok(())
    }

    fn next_resource_version(&self) -> String {
        self.next_version.fetch_add(1, Ordering::SeqCst).to_string()
    }
}

fn name_of(object: &Value) -> String {
    object
        .pointer("/metadata/name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl K8sClient for MockK8sClient {
    async fn list_models(&self, namespace: Option<&str>) -> Result<Vec<Value>, K8sError> {
        self.check_available()?;

        let models = self.models.lock().unwrap();
        Ok(models
            .iter()
            .filter(|((ns, _), _)| namespace.is_none_or(|namespace| namespace == ns))
            .map(|(_, object)| object.clone())
            .collect())
    }

    async fn get_model(&self, namespace: &str, name: &str) -> Result<Value, K8sError> {
        self.check_available()?;

        self.stored(namespace, name).ok_or(K8sError::NotFound)
    }

    async fn create_model(&self, namespace: &str, model: &Value) -> Result<Value, K8sError> {
        self.check_available()?;

        let key = (namespace.to_string(), name_of(model));
        let mut models = self.models.lock().unwrap();
        if models.contains_key(&key) {
            return Err(K8sError::AlreadyExists);
        }

        let mut created = model.clone();
        created["metadata"]["namespace"] = json!(namespace);
        created["metadata"]["uid"] = json!(format!("uid-{}", models.len() + 1));
        created["metadata"]["resourceVersion"] = json!(self.next_resource_version());
        created["metadata"]["creationTimestamp"] = json!(CREATION_TIMESTAMP);
        models.insert(key, created.clone());

        Ok(created)
    }

    async fn replace_model(
        &self,
        namespace: &str,
        name: &str,
        model: &Value,
    ) -> Result<Value, K8sError> {
        self.check_available()?;

        let key = (namespace.to_string(), name.to_string());
        let mut models = self.models.lock().unwrap();
        let Some(stored) = models.get(&key) else {
            return Err(K8sError::NotFound);
        };

        let Some(version) = model.pointer("/metadata/resourceVersion") else {
            return Err(K8sError::Kube(kube::Error::Api(ErrorResponse {
                status: "Failure".to_string(),
                message: format!(
                    "Model.kubeai.org \"{name}\" is invalid: metadata.resourceVersion: \
                     Invalid value: 0x0: must be specified for an update"
                ),
                reason: "Invalid".to_string(),
                code: 422,
            })));
        };
        if Some(version) != stored.pointer("/metadata/resourceVersion") {
            return Err(K8sError::Conflict(
                "the object has been modified; please apply your changes to the latest version"
                    .to_string(),
            ));
        }

        let mut replaced = model.clone();
        replaced["metadata"]["uid"] = stored["metadata"]["uid"].clone();
        replaced["metadata"]["creationTimestamp"] = stored["metadata"]["creationTimestamp"].clone();
        replaced["metadata"]["resourceVersion"] = json!(self.next_resource_version());
        models.insert(key, replaced.clone());

        Ok(replaced)
    }

    async fn delete_model(&self, namespace: &str, name: &str) -> Result<(), K8sError> {
        self.check_available()?;

        self.models
            .lock()
            .unwrap()
            .remove(&(namespace.to_string(), name.to_string()))
            .map(|_| ())
            .ok_or(K8sError::NotFound)
    }

    async fn list_namespaces(&self) -> Result<Vec<String>, K8sError> {
        self.check_available()?;

        Ok(self.namespaces.clone())
    }
}
