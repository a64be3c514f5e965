use std::env;
use std::fs;
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::logging::setup_logging;

const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

#[derive(Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub web_server: WebServerConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Deserialize)]
pub struct WebServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,
}

#[derive(Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,
    #[serde(skip)]
    pub api_key: String,
}

#[derive(Deserialize, Default)]
pub struct LoggingConfig {
    pub log_file: Option<String>,
}

fn default_bind_address() -> String { String::from("0.0.0.0") }
fn default_bind_port() -> u16 { 8080 }
fn default_base_url() -> String { String::from("https://api.openweathermap.org/data/2.5") }
fn default_timeout() -> u64 { 10 }
fn default_cache_ttl() -> u64 { 300 }

impl Default for WebServerConfig {
    fn default() -> Self {
        WebServerConfig {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        WeatherConfig {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            cache_ttl_seconds: default_cache_ttl(),
            api_key: String::new(),
        }
    }
}

/// Loads configuration and sets up logging
///
/// The configuration file path is taken from the first command line argument,
/// falling back to `config.toml`. A missing file yields built-in defaults.
/// The OpenWeatherMap API key is never read from file, only from the
/// environment, and a missing key halts startup.
pub fn config() -> Result<Config, ConfigError> {
    let path = env::args().nth(1).unwrap_or_else(|| String::from("config.toml"));

    let mut config: Config = match fs::read_to_string(&path) {
        Ok(contents) => toml::from_str(&contents)?,
        Err(_) => Config::default(),
    };

    setup_logging(config.logging.log_file.as_deref())?;

    config.weather.api_key = env::var(API_KEY_ENV)
        .map_err(|_| ConfigError(format!("missing {} environment variable", API_KEY_ENV)))?;
    if config.weather.api_key.trim().is_empty() {
        return Err(ConfigError(format!("{} is set but empty", API_KEY_ENV)));
    }

    Ok(config)
}
