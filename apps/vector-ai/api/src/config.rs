use core_config::{AppInfo, ConfigError, FromEnv, app_info, server::ServerConfig};
use database::mysql::MySqlConfig;
use domain_embeddings::{EmbeddingSettings, OpenAIConfig};

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: MySqlConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub embeddings: EmbeddingSettings,
    /// `None` when `OPENAI_API_KEY` is unset; embedding endpoints then fail
    pub openai: Option<OpenAIConfig>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = MySqlConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let embeddings =
            EmbeddingSettings::from_env()?.with_database_name(database.database_name());

        let openai = match OpenAIConfig::from_env() {
            Ok(config) => Some(config),
            Err(ConfigError::MissingEnvVar(_)) => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            embeddings,
            openai,
        })
    }
}
