//! Admin API for `kubeai.org/v1` `Model` resources.
//!
//! Exposes REST endpoints to list, create, replace and delete models in a
//! Kubernetes cluster, validates every model against the resource schema, and
//! publishes the deployed models as an OpenRouter-compatible marketplace
//! listing.

pub mod config;
pub mod k8s;
pub mod marketplace;
pub mod metrics;
pub mod model;
pub mod routes;
pub mod startup;
