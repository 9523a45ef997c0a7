use std::path::Path;

use serde::de::DeserializeOwned;

use crate::environment::Environment;

/// Directory containing configuration files relative to the working directory.
const CONFIGURATION_DIR: &str = "configuration";

/// Base configuration file loaded for all environments.
const BASE_CONFIG_FILE: &str = "base.yaml";

/// Prefix for environment variable configuration overrides.
const ENV_PREFIX: &str = "APP";

/// Separator between environment variable prefix and key segments.
const ENV_PREFIX_SEPARATOR: &str = "_";

/// Separator for nested configuration keys in environment variables.
///
/// Example: `APP_APPLICATION__PORT` sets the `application.port` field.
const ENV_SEPARATOR: &str = "__";

/// Loads hierarchical configuration from `./configuration`.
///
/// See [`load_config_from_dir`] for the layering rules.
pub fn load_config<T>() -> Result<T, config::ConfigError>
where
    T: DeserializeOwned,
{
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("failed to determine the current directory: {e}"))
    })?;

    load_config_from_dir(&base_path.join(CONFIGURATION_DIR))
}

/// Loads hierarchical configuration from YAML files in `directory` and environment variables.
///
/// Sources are layered in this order, later ones overriding earlier ones:
/// 1. `base.yaml`
/// 2. `{environment}.yaml`, where the environment comes from `APP_ENVIRONMENT` (optional file)
/// 3. Environment variables prefixed with `APP`
///
/// Nested keys use double underscores: `APP_APPLICATION__HOST` → `application.host`.
pub fn load_config_from_dir<T>(directory: &Path) -> Result<T, config::ConfigError>
where
    T: DeserializeOwned,
{
    let environment = Environment::load()
        .map_err(|e| config::ConfigError::Message(format!("failed to parse APP_ENVIRONMENT: {e}")))?;

    let environment_filename = format!("{environment}.yaml");

    let environment_source = config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_PREFIX_SEPARATOR)
        .separator(ENV_SEPARATOR);

    let settings = config::Config::builder()
        .add_source(config::File::from(directory.join(BASE_CONFIG_FILE)))
        .add_source(config::File::from(directory.join(environment_filename)).required(false))
        .add_source(environment_source)
        .build()?;

    settings.try_deserialize::<T>()
}
