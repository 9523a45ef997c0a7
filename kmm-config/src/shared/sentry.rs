use serde::{Deserialize, Serialize};

/// Sentry error tracking configuration.
///
/// When present in a service configuration, Sentry is initialized before the
/// async runtime starts and captures panics and 5xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentryConfig {
    /// Sentry DSN (Data Source Name) events are reported to.
    pub dsn: String,
}
