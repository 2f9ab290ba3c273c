//! Configuration: defaults, then `bookshelf.toml`, then `BOOKSHELF__*`
//! environment variables.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_URL: &str = "http://localhost:3000/graphql/";
pub const DEFAULT_PAGE_SIZE: u32 = 5;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiSettings {
    pub url: String,
    pub page_size: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingSettings {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub api: ApiSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("bookshelf").required(false))
            .add_source(
                Environment::with_prefix("BOOKSHELF")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("api.url", DEFAULT_URL)?
            .set_default("api.page_size", i64::from(DEFAULT_PAGE_SIZE))?
            .set_default("logging.level", "info")
    }
}
