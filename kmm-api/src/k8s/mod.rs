//! Kubernetes integration for the model admin API.
//!
//! Route handlers depend on the [`K8sClient`] trait only. Objects cross the
//! trait boundary as raw [`serde_json::Value`]s so that callers validate
//! whatever the cluster hands back instead of trusting it.
//!
//! The default client, [`http::HttpK8sClient`], is backed by the [`kube`]
//! crate and talks to the cluster using the ambient configuration (local
//! `~/.kube/config` or the in-cluster service account). Tests provide an
//! in-memory implementation of the same trait.

mod base;
pub mod http;

pub use base::*;
