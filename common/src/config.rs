use config::{Config, Environment, File};
use serde::de::DeserializeOwned;

/// Environment variable prefix for all configuration overrides.
/// `LOTTO_JWT__SECRET` maps onto `jwt.secret`.
pub const ENV_PREFIX: &str = "LOTTO";

/// Loads configuration by layering an optional config file under
/// environment variables. The file is looked up by stem, so `config`
/// matches `config.toml`, `config.yaml` or `config.json`.
pub fn parse<C: DeserializeOwned>(config_file: &str) -> Result<C, config::ConfigError> {
    let config = Config::builder()
        .add_source(File::with_name(config_file).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
