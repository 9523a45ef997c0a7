use std::{net::TcpListener, sync::Arc};

use actix_web::{App, HttpResponse, HttpServer, dev::Server, web};
use kmm_telemetry::metrics::init_metrics_handle;
use tracing::info;
use tracing_actix_web::TracingLogger;
use utoipa::OpenApi;

use crate::{
    config::ApiConfig,
    k8s::{K8sClient, http::HttpK8sClient},
    marketplace::{
        Architecture, MarketplaceListing, MarketplaceModel, Modality, Price, Pricing, TopProvider,
    },
    metrics::register_metrics,
    model::{
        Adapter, CacheStatus, Engine, EnvFromSource, EnvSourceRef, Feature, FieldErrors,
        LoadBalancing, LoadBalancingStrategy, Model, ModelFile, ModelMetadata, ModelSpec,
        ModelStatus, PrefixHash, ReplicaStatus,
    },
    routes::{
        health_check::{HealthCheckResponse, health_check},
        json_error_handler,
        metrics::metrics,
        models::{create_model, delete_model, read_all_models, update_model, validate_model_draft},
        namespaces::read_all_namespaces,
        not_found,
        openrouter::read_marketplace_models,
    },
};

/// Path the OpenAPI document is served from.
const OPENAPI_PATH: &str = "/api-docs/openapi.json";

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: ApiConfig) -> Result<Self, anyhow::Error> {
        let address = format!("{}:{}", config.application.host, config.application.port);
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let k8s_client = Arc::new(HttpK8sClient::new().await?);

        let server = run(config, listener, k8s_client).await?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health_check::health_check,
        crate::routes::models::read_all_models,
        crate::routes::models::create_model,
        crate::routes::models::validate_model_draft,
        crate::routes::models::update_model,
        crate::routes::models::delete_model,
        crate::routes::namespaces::read_all_namespaces,
        crate::routes::openrouter::read_marketplace_models,
        crate::routes::metrics::metrics,
    ),
    components(schemas(
        HealthCheckResponse,
        FieldErrors,
        Model,
        ModelMetadata,
        ModelSpec,
        ModelStatus,
        Adapter,
        Engine,
        Feature,
        EnvFromSource,
        EnvSourceRef,
        LoadBalancing,
        LoadBalancingStrategy,
        PrefixHash,
        ModelFile,
        ReplicaStatus,
        CacheStatus,
        MarketplaceListing,
        MarketplaceModel,
        Pricing,
        Price,
        TopProvider,
        Architecture,
        Modality,
    ))
)]
struct ApiDoc;

/// Builds the HTTP server on `listener`.
///
/// The cluster client is injected so tests can run the real routes against an
/// in-memory implementation.
pub async fn run(
    config: ApiConfig,
    listener: TcpListener,
    k8s_client: Arc<dyn K8sClient>,
) -> Result<Server, anyhow::Error> {
    let metrics_handle = init_metrics_handle()?;
    register_metrics();

    info!(address = %listener.local_addr()?, "starting model admin api\n{}", config.application);

    let k8s_client: web::Data<dyn K8sClient> = web::Data::from(k8s_client);
    let openapi = ApiDoc::openapi();

    let server = HttpServer::new(move || {
        let openapi = openapi.clone();

        App::new()
            .wrap(
                sentry::integrations::actix::Sentry::builder()
                    .capture_server_errors(true)
                    .start_transaction(true)
                    .finish(),
            )
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(k8s_client.clone())
            .app_data(web::ThinData(metrics_handle.clone()))
            .service(metrics)
            .route(
                OPENAPI_PATH,
                web::get().to(move || {
                    let openapi = openapi.clone();
                    async move { HttpResponse::Ok().json(openapi) }
                }),
            )
            .service(
                web::scope("/api")
                    .service(health_check)
                    //namespaces
                    .service(read_all_namespaces)
                    //models
                    .service(validate_model_draft)
                    .service(read_all_models)
                    .service(create_model)
                    .service(update_model)
                    .service(delete_model)
                    //marketplace
                    .service(read_marketplace_models),
            )
            .service(web::scope("/public/api").service(read_marketplace_models))
            .default_service(web::to(not_found))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
