//! Projection of `Model` resources into OpenRouter-compatible marketplace
//! listings.
//!
//! The projection is pure: the same models and reference time always yield
//! the same listing. Display metadata comes from `openrouter.ai/*`
//! annotations; everything else is derived from `spec` or fixed defaults.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{Feature, Model};

pub const NAME_ANNOTATION: &str = "openrouter.ai/name";
pub const DESCRIPTION_ANNOTATION: &str = "openrouter.ai/description";
pub const DEVELOPER_URL_ANNOTATION: &str = "openrouter.ai/developer_url";
pub const HOMEPAGE_URL_ANNOTATION: &str = "openrouter.ai/homepage_url";
pub const MODEL_CARD_URL_ANNOTATION: &str = "openrouter.ai/model_card_url";

const PRICING_UNIT: &str = "USD";
const PROMPT_PRICE: &str = "0.000001";
const COMPLETION_PRICE: &str = "0.000002";
const FREE: &str = "0";

const CONTEXT_WINDOW: u32 = 8192;
const MAX_TOKENS: u32 = 4096;

const TEXT_MODALITY: &str = "text";
const AUDIO_MODALITY: &str = "audio";

/// Envelope of the marketplace listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MarketplaceListing {
    pub data: Vec<MarketplaceModel>,
}

/// A single model as advertised to the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MarketplaceModel {
    /// `{namespace}/{name}` of the backing resource.
    #[schema(example = "default/llama3")]
    pub id: String,
    #[schema(example = "Llama 3")]
    pub name: String,
    pub description: String,
    /// Unix seconds.
    pub created: i64,
    /// Unix seconds; always equal to `created`.
    pub updated: i64,
    pub pricing: Pricing,
    pub context_window: u32,
    pub max_tokens: u32,
    pub top_provider: TopProvider,
    pub architecture: Architecture,
    pub per_request_limits: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_card_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pricing {
    pub model: Price,
    pub image: Price,
    pub request: Price,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            model: Price::new(PROMPT_PRICE, COMPLETION_PRICE),
            image: Price::new(FREE, FREE),
            request: Price::new(FREE, FREE),
        }
    }
}

/// Prices are decimal strings so no precision is lost on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Price {
    #[schema(example = "USD")]
    pub unit: String,
    pub input: String,
    pub output: String,
}

impl Price {
    fn new(input: &str, output: &str) -> Self {
        Self {
            unit: PRICING_UNIT.to_string(),
            input: input.to_string(),
            output: output.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TopProvider {
    #[schema(example = "vllm")]
    pub id: String,
    #[schema(example = "VLLM")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Architecture {
    pub modality: Modality,
    pub tokenizer: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Modality {
    pub input: Vec<String>,
    pub output: Vec<String>,
}

/// Projects every model into a marketplace entry, preserving order.
///
/// `now` stands in for the creation time of models without a parseable
/// `metadata.creationTimestamp`.
pub fn project_models(models: &[Model], now: DateTime<Utc>) -> Vec<MarketplaceModel> {
    models.iter().map(|model| project_model(model, now)).collect()
}

pub fn project_model(model: &Model, now: DateTime<Utc>) -> MarketplaceModel {
    let name = model.name();
    let engine = model.spec.engine;

    let created = model
        .metadata
        .creation_timestamp
        .as_deref()
        .and_then(|timestamp| DateTime::parse_from_rfc3339(timestamp).ok())
        .map(|timestamp| timestamp.timestamp())
        .unwrap_or_else(|| now.timestamp());

    let mut input = vec![TEXT_MODALITY.to_string()];
    if model.has_feature(Feature::SpeechToText) {
        input.push(AUDIO_MODALITY.to_string());
    }

    MarketplaceModel {
        id: format!("{}/{}", model.namespace(), name),
        name: model.annotation(NAME_ANNOTATION).unwrap_or(name).to_string(),
        description: model
            .annotation(DESCRIPTION_ANNOTATION)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Model {name} powered by {engine}")),
        created,
        updated: created,
        pricing: Pricing::default(),
        context_window: CONTEXT_WINDOW,
        max_tokens: MAX_TOKENS,
        top_provider: TopProvider {
            id: engine.as_str().to_lowercase(),
            name: engine.to_string(),
        },
        architecture: Architecture {
            modality: Modality {
                input,
                output: vec![TEXT_MODALITY.to_string()],
            },
            tokenizer: BTreeMap::new(),
        },
        per_request_limits: None,
        developer_url: model.annotation(DEVELOPER_URL_ANNOTATION).map(str::to_string),
        homepage_url: model.annotation(HOMEPAGE_URL_ANNOTATION).map(str::to_string),
        model_card_url: model
            .annotation(MODEL_CARD_URL_ANNOTATION)
            .map(str::to_string),
    }
}
