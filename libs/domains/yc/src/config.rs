use core_config::{ConfigError, FromEnv, env_or_default, env_parse};

pub const DEFAULT_YC_API_URL: &str = "https://yc-oss.github.io/api/companies/all.json";
pub const DEFAULT_IMPORT_CHUNK_SIZE: usize = 50;

#[derive(Debug, Clone)]
pub struct YcConfig {
    pub api_url: String,
    pub import_chunk_size: usize,
}

impl Default for YcConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_YC_API_URL.to_string(),
            import_chunk_size: DEFAULT_IMPORT_CHUNK_SIZE,
        }
    }
}

impl FromEnv for YcConfig {
    /// - YC_API_URL: defaults to the yc-oss all-companies dump
    /// - YC_IMPORT_CHUNK_SIZE: defaults to 50, must be positive
    fn from_env() -> Result<Self, ConfigError> {
        let api_url = env_or_default("YC_API_URL", DEFAULT_YC_API_URL);
        let import_chunk_size: usize =
            env_parse("YC_IMPORT_CHUNK_SIZE", &DEFAULT_IMPORT_CHUNK_SIZE.to_string())?;

        if import_chunk_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "YC_IMPORT_CHUNK_SIZE".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            api_url,
            import_chunk_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        temp_env::with_vars_unset(["YC_API_URL", "YC_IMPORT_CHUNK_SIZE"], || {
            let config = YcConfig::from_env().unwrap();
            assert_eq!(config.api_url, DEFAULT_YC_API_URL);
            assert_eq!(config.import_chunk_size, 50);
        });
    }

    #[test]
    fn test_custom_values() {
        temp_env::with_vars(
            [
                ("YC_API_URL", Some("http://localhost:9000/all.json")),
                ("YC_IMPORT_CHUNK_SIZE", Some("10")),
            ],
            || {
                let config = YcConfig::from_env().unwrap();
                assert_eq!(config.api_url, "http://localhost:9000/all.json");
                assert_eq!(config.import_chunk_size, 10);
            },
        );
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        temp_env::with_var("YC_IMPORT_CHUNK_SIZE", Some("0"), || {
            let err = YcConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("YC_IMPORT_CHUNK_SIZE"));
        });
    }
}
