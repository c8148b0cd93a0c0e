use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_search::SearchConfig;
use domain_vector::{OpenAIConfig, VectorIndexConfig};
use domain_yc::YcConfig;

pub use core_config::Environment;

/// Application configuration, composed from each library's `FromEnv` config
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    pub openai: OpenAIConfig,
    pub vector: VectorIndexConfig,
    pub search: SearchConfig,
    pub yc: YcConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            database: PostgresConfig::from_env()?,
            openai: OpenAIConfig::from_env()?,
            vector: VectorIndexConfig::from_env()?,
            search: SearchConfig::from_env()?,
            yc: YcConfig::from_env()?,
        })
    }
}
