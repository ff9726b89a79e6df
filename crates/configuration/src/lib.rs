use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{Config, DatabaseSettings, LoggingSettings, ServerSettings};

/// Prefix for environment overrides, e.g. `SDM_SERVER__PORT=8080`.
const ENV_PREFIX: &str = "SDM";

/// Loads the application configuration.
///
/// Sources, later ones winning: built-in defaults, `config.toml` in the
/// working directory (or `path` when given, which must then exist),
/// `SDM_*` environment variables, and finally `DATABASE_URL`.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config.toml").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
