use crate::domain::RegionCode;
use crate::youtube_api::{ApiError, YouTubeClient};
use secrecy::SecretString;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The API returns at most this many videos per page.
pub const MAX_RESULTS_LIMIT: u8 = 50;

/// Environment variable holding the YouTube Data API key.
pub const API_KEY_VAR: &str = "API_KEY_JDU";

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub youtube: YouTubeSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub regions: Vec<RegionCode>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_results: u8,
    pub output_dir: PathBuf,
    #[serde(default)]
    pub save_raw_json: bool,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct YouTubeSettings {
    pub base_url: String,
    pub api_key: SecretString,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl YouTubeSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn client(&self) -> Result<YouTubeClient, ApiError> {
        YouTubeClient::new(self.base_url.clone(), self.api_key.clone(), self.timeout())
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.application.regions.is_empty() {
            return Err(config::ConfigError::Message(
                "At least one region must be configured.".into(),
            ));
        }
        let max_results = self.application.max_results;
        if !(1..=MAX_RESULTS_LIMIT).contains(&max_results) {
            return Err(config::ConfigError::Message(format!(
                "Requested {} videos per region. Please request between 1 and {}.",
                max_results, MAX_RESULTS_LIMIT
            )));
        }
        Ok(())
    }
}

/// The possible runtime environment for our application.
#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

/// Loads settings from `./configuration` and the process environment (a `.env` file is
/// honoured). The result is not validated, so command-line overrides can still fix it.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    dotenv::dotenv().ok();

    let base_path = std::env::current_dir().map_err(|e| config::ConfigError::Foreign(e.into()))?;
    load_configuration(base_path.join("configuration"), std::env::vars().collect())
}

/// Reads `base.yaml`, then the file for `APP_ENVIRONMENT`, then `APP_*` variables,
/// and finally the API key from `API_KEY_JDU`, all taken from `vars`.
pub fn load_configuration(
    configuration_directory: impl AsRef<Path>,
    vars: config::Map<String, String>,
) -> Result<Settings, config::ConfigError> {
    let configuration_directory = configuration_directory.as_ref();

    // Detect the running environment, defaulting to `local`
    let environment: Environment = vars
        .get("APP_ENVIRONMENT")
        .cloned()
        .unwrap_or_else(|| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());
    let api_key = vars.get(API_KEY_VAR).cloned();

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename)).required(false),
        )
        // E.g. `APP_APPLICATION__MAX_RESULTS=10` sets `Settings.application.max_results`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("application.regions")
                .try_parsing(true)
                .source(Some(vars)),
        )
        .set_override_option("youtube.api_key", api_key)?
        .build()?;

    if settings.get_string("youtube.api_key").is_err() {
        return Err(config::ConfigError::Message(format!(
            "No YouTube API key configured. Set {} or APP_YOUTUBE__API_KEY.",
            API_KEY_VAR
        )));
    }
    settings.try_deserialize()
}
