//! Telemetry for the model manager services.
//!
//! [`tracing`] sets up structured logging (pretty terminal output in development,
//! rotating JSON files in production) and [`metrics`] installs the Prometheus
//! recorder rendered by the `/metrics` endpoint.

pub mod metrics;
pub mod tracing;
