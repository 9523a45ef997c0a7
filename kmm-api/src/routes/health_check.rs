use actix_web::{Responder, get, web::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthCheckResponse {
    #[schema(example = true)]
    pub healthy: bool,
}

#[utoipa::path(
    summary = "API health status",
    description = "Reports that the API is available and responding.",
    context_path = "/api",
    responses(
        (status = 200, description = "Health check passed.", body = HealthCheckResponse),
    ),
    tag = "Health",
)]
#[get("/health")]
pub async fn health_check() -> impl Responder {
    Json(HealthCheckResponse { healthy: true })
}
