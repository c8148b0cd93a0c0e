pub mod server;
pub mod tracing;

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },

    #[error("Invalid value for '{key}': {details}")]
    InvalidValue { key: String, details: String },
}

/// Application environment
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Static application identity reported by the health endpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Builds an [`AppInfo`] from the calling crate's Cargo metadata.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load and parse environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load and parse environment variable or return error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Reads an optional variable, treating empty strings as unset
pub fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parses a variable into `T`, falling back to `default` when unset
pub fn env_parse<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_or_default(key, default)
        .parse()
        .map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        })
}

/// Boolean flag: accepts true/false/1/0/yes/no (case-insensitive)
pub fn env_flag(key: &str, default: bool) -> Result<bool, ConfigError> {
    match env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" | "" => Ok(false),
            other => Err(ConfigError::ParseError {
                key: key.to_string(),
                details: format!("expected a boolean, got '{}'", other),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        for value in ["production", "PRODUCTION", "Production"] {
            temp_env::with_var("APP_ENV", Some(value), || {
                assert_eq!(Environment::from_env(), Environment::Production);
            });
        }
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("YC_TEST_VAR", Some("value"), || {
            assert_eq!(env_or_default("YC_TEST_VAR", "default"), "value");
        });
        temp_env::with_var_unset("YC_TEST_VAR", || {
            assert_eq!(env_or_default("YC_TEST_VAR", "default"), "default");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("YC_MISSING_REQUIRED", || {
            let err = env_required("YC_MISSING_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("YC_MISSING_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_optional_treats_blank_as_unset() {
        temp_env::with_var("YC_OPTIONAL", Some("  "), || {
            assert_eq!(env_optional("YC_OPTIONAL"), None);
        });
        temp_env::with_var("YC_OPTIONAL", Some("ns"), || {
            assert_eq!(env_optional("YC_OPTIONAL"), Some("ns".to_string()));
        });
    }

    #[test]
    fn test_env_parse() {
        temp_env::with_var("YC_CHUNK", Some("25"), || {
            assert_eq!(env_parse::<usize>("YC_CHUNK", "50").unwrap(), 25);
        });
        temp_env::with_var_unset("YC_CHUNK", || {
            assert_eq!(env_parse::<usize>("YC_CHUNK", "50").unwrap(), 50);
        });
        temp_env::with_var("YC_CHUNK", Some("many"), || {
            let err = env_parse::<usize>("YC_CHUNK", "50").unwrap_err();
            assert!(err.to_string().contains("YC_CHUNK"));
        });
    }

    #[test]
    fn test_env_flag() {
        temp_env::with_var("DB_SSL_TEST", Some("TRUE"), || {
            assert!(env_flag("DB_SSL_TEST", false).unwrap());
        });
        temp_env::with_var("DB_SSL_TEST", Some("0"), || {
            assert!(!env_flag("DB_SSL_TEST", true).unwrap());
        });
        temp_env::with_var_unset("DB_SSL_TEST", || {
            assert!(env_flag("DB_SSL_TEST", true).unwrap());
        });
        temp_env::with_var("DB_SSL_TEST", Some("maybe"), || {
            assert!(env_flag("DB_SSL_TEST", false).is_err());
        });
    }

    #[test]
    fn test_app_info_macro_uses_crate_metadata() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
    }
}
