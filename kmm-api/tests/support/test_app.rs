#![allow(dead_code)]

use std::io;
use std::net::TcpListener;
use std::sync::Arc;

use kmm_api::{config::ApiConfig, k8s::K8sClient, startup::run};
use kmm_config::{Environment, load_config};
use reqwest::{IntoUrl, RequestBuilder};
use serde_json::Value;

use crate::support::k8s_client::MockK8sClient;

pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub k8s_client: Arc<MockK8sClient>,
    server_handle: tokio::task::JoinHandle<io::Result<()>>,
}

impl TestApp {
    fn get<U: IntoUrl>(&self, url: U) -> RequestBuilder {
        self.api_client.get(url)
    }

    fn namespace_query(namespace: Option<&str>) -> Vec<(&str, &str)> {
        namespace
            .map(|namespace| vec![("namespace", namespace)])
            .unwrap_or_default()
    }

    pub async fn health_check(&self) -> reqwest::Response {
        self.get(format!("{}/api/health", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn read_all_namespaces(&self) -> reqwest::Response {
        self.get(format!("{}/api/namespaces", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn read_all_models(&self, namespace: Option<&str>) -> reqwest::Response {
        self.get(format!("{}/api/models", &self.address))
            .query(&Self::namespace_query(namespace))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn create_model(&self, model: &Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/models", &self.address))
            .json(model)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn validate_model_draft(&self, draft: &Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/models/validate", &self.address))
            .json(draft)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn update_model(
        &self,
        name: &str,
        namespace: Option<&str>,
        model: &Value,
    ) -> reqwest::Response {
        self.api_client
            .put(format!("{}/api/models/{name}", &self.address))
            .query(&Self::namespace_query(namespace))
            .json(model)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete_model(&self, name: &str, namespace: Option<&str>) -> reqwest::Response {
        self.api_client
            .delete(format!("{}/api/models/{name}", &self.address))
            .query(&Self::namespace_query(namespace))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn read_marketplace_models(&self) -> reqwest::Response {
        self.get(format!("{}/api/openrouter/models", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn read_public_marketplace_models(&self) -> reqwest::Response {
        self.get(format!("{}/public/api/openrouter/models", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

pub async fn spawn_test_app() -> TestApp {
    // We set the environment to dev.
    Environment::Dev.set();

    let base_address = "127.0.0.1";
    let listener =
        TcpListener::bind(format!("{base_address}:0")).expect("failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let config = load_config::<ApiConfig>().expect("Failed to read configuration");

    let k8s_client = Arc::new(MockK8sClient::default());

    let server = run(
        config,
        listener,
        k8s_client.clone() as Arc<dyn K8sClient>,
    )
    .await
    .expect("failed to bind address");

    let server_handle = tokio::spawn(server);

    TestApp {
        address: format!("http://{base_address}:{port}"),
        api_client: reqwest::Client::new(),
        k8s_client,
        server_handle,
    }
}
