use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub doorprize: DoorprizeConfig,
    #[serde(default)]
    pub draw: DrawConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Persistence boundary that owns events, prizes, employees and winners
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorprizeConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawConfig {
    /// Delay between winner confirmation and the stock popups
    #[serde(default = "default_popup_delay_ms")]
    pub popup_delay_ms: u64,
    /// Upper bound for every call to the persistence boundary
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_max_notifications")]
    pub max_notifications: usize,
}

fn default_popup_delay_ms() -> u64 {
    2000
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_max_notifications() -> usize {
    20
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            popup_delay_ms: default_popup_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            max_notifications: default_max_notifications(),
        }
    }
}

impl DrawConfig {
    pub fn popup_delay(&self) -> Duration {
        Duration::from_millis(self.popup_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Config {
    pub fn from_toml() -> AppResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // Without a config file everything comes from the environment
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                let base_url = get_env("DOORPRIZE_BASE_URL")
                    .ok_or_else(|| {
                    AppError::ConfigError(
                        "DOORPRIZE_BASE_URL is not set and config.toml was not found".to_string(),
                    )
                })?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    doorprize: DoorprizeConfig {
                        base_url,
                        api_token: get_env("DOORPRIZE_API_TOKEN"),
                    },
                    draw: DrawConfig {
                        popup_delay_ms: get_env_parse(
                            "DRAW_POPUP_DELAY_MS",
                            default_popup_delay_ms(),
                        ),
                        request_timeout_secs: get_env_parse(
                            "DRAW_REQUEST_TIMEOUT_SECS",
                            default_request_timeout_secs(),
                        ),
                        max_notifications: default_max_notifications(),
                    },
                }
            }
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "Failed to read config file {config_path}: {e}"
                )));
            }
        };

        // Environment variables win even when the file exists
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DOORPRIZE_BASE_URL") {
            config.doorprize.base_url = v;
        }
        if let Ok(v) = env::var("DOORPRIZE_API_TOKEN") {
            config.doorprize.api_token = Some(v);
        }
        if let Ok(v) = env::var("DRAW_POPUP_DELAY_MS")
            && let Ok(n) = v.parse()
        {
            config.draw.popup_delay_ms = n;
        }
        if let Ok(v) = env::var("DRAW_REQUEST_TIMEOUT_SECS")
            && let Ok(n) = v.parse()
        {
            config.draw.request_timeout_secs = n;
        }

        Ok(config)
    }

    pub fn parse(config_str: &str) -> AppResult<Self> {
        toml::from_str(config_str)
            .map_err(|e| AppError::ConfigError(format!("Failed to parse config file: {e}")))
    }
}
