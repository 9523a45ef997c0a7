use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::errors::FieldErrors;
use crate::model::validation::validate_model;

/// API group of the `Model` custom resource.
pub const GROUP: &str = "kubeai.org";
/// API version of the `Model` custom resource within [`GROUP`].
pub const VERSION: &str = "v1";
/// Value every `Model` carries in its `apiVersion` field.
pub const API_VERSION: &str = "kubeai.org/v1";
/// Value every `Model` carries in its `kind` field.
pub const KIND: &str = "Model";
/// Plural resource name used in API server paths.
pub const PLURAL: &str = "models";

/// A `kubeai.org/v1` `Model` custom resource.
///
/// Values of this type have passed [`validate_model`]; build them from
/// untrusted JSON with [`Model::parse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[schema(example = "kubeai.org/v1")]
    pub api_version: String,
    #[schema(example = "Model")]
    pub kind: String,
    pub metadata: ModelMetadata,
    pub spec: ModelSpec,
    /// Populated by the cluster controller, never by clients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ModelStatus>,
}

impl Model {
    /// Creates a model with the given identity and spec and no status.
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, spec: ModelSpec) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ModelMetadata {
                name: Some(name.into()),
                namespace: Some(namespace.into()),
                ..ModelMetadata::default()
            },
            spec,
            status: None,
        }
    }

    /// Validates an arbitrary JSON value and converts it into a [`Model`].
    pub fn parse(value: &serde_json::Value) -> Result<Self, FieldErrors> {
        validate_model(value)
    }

    /// Returns the resource name, or an empty string when unset.
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }

    /// Returns the resource namespace, or an empty string when unset.
    pub fn namespace(&self) -> &str {
        self.metadata.namespace.as_deref().unwrap_or_default()
    }

    /// Returns a non-empty annotation value.
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.metadata
            .annotations
            .as_ref()
            .and_then(|annotations| annotations.get(key))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.spec
            .features
            .as_ref()
            .is_some_and(|features| features.contains(&feature))
    }

    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// The subset of Kubernetes object metadata a `Model` carries.
///
/// `name` and `namespace` form the external identity of the resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "llama3")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "default")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "2024-05-01T12:00:00Z")]
    pub creation_timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelSpec {
    /// Where the model weights are pulled from, e.g. `hf://org/model` or `ollama://llama3`.
    #[schema(example = "ollama://llama3")]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adapters: Option<Vec<Adapter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<Feature>>,
    pub engine: Engine,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_from: Option<Vec<EnvFromSource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_replicas: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_replicas: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscaling_disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_requests: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_down_delay_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_balancing: Option<LoadBalancing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<ModelFile>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_class_name: Option<String>,
}

impl ModelSpec {
    /// Creates a spec with only the required fields set.
    pub fn new(url: impl Into<String>, engine: Engine) -> Self {
        Self {
            url: url.into(),
            adapters: None,
            features: None,
            engine,
            resource_profile: None,
            cache_profile: None,
            image: None,
            args: None,
            env: None,
            env_from: None,
            replicas: None,
            min_replicas: None,
            max_replicas: None,
            autoscaling_disabled: None,
            target_requests: None,
            scale_down_delay_seconds: None,
            owner: None,
            load_balancing: None,
            files: None,
            priority_class_name: None,
        }
    }
}

/// Inference engine serving a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Engine {
    #[serde(rename = "OLlama")]
    Ollama,
    #[serde(rename = "VLLM")]
    Vllm,
    FasterWhisper,
    Infinity,
}

impl Engine {
    pub const ALL: [Engine; 4] = [
        Engine::Ollama,
        Engine::Vllm,
        Engine::FasterWhisper,
        Engine::Infinity,
    ];

    /// Returns the name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Ollama => "OLlama",
            Engine::Vllm => "VLLM",
            Engine::FasterWhisper => "FasterWhisper",
            Engine::Infinity => "Infinity",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability a model advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Feature {
    TextGeneration,
    TextEmbedding,
    Reranking,
    SpeechToText,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::TextGeneration,
        Feature::TextEmbedding,
        Feature::Reranking,
        Feature::SpeechToText,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::TextGeneration => "TextGeneration",
            Feature::TextEmbedding => "TextEmbedding",
            Feature::Reranking => "Reranking",
            Feature::SpeechToText => "SpeechToText",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Adapter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A config map or secret whose keys are exposed as environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnvFromSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map_ref: Option<EnvSourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<EnvSourceRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EnvSourceRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<LoadBalancingStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix_hash: Option<PrefixHash>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LoadBalancingStrategy {
    LeastLoad,
    PrefixHash,
}

impl LoadBalancingStrategy {
    pub const ALL: [LoadBalancingStrategy; 2] =
        [LoadBalancingStrategy::LeastLoad, LoadBalancingStrategy::PrefixHash];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadBalancingStrategy::LeastLoad => "LeastLoad",
            LoadBalancingStrategy::PrefixHash => "PrefixHash",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrefixHash {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_load_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix_char_length: Option<i64>,
}

/// A file mounted into the serving container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ModelFile {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ModelStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<ReplicaStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReplicaStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CacheStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loaded: Option<bool>,
}
