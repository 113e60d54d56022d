use crate::constants::{API_KEY_ENV_VAR, TCREI_CLI};
use confy::ConfyError;
use serde::{Deserialize, Serialize};
use std::env::home_dir;
use std::path::PathBuf;
use tcrei_core::file_store::FileStore;
use tcrei_core::i18n::{CatalogDir, Locale};

#[derive(Serialize, Deserialize)]
pub struct TcreiCliConfig {
    pub data_path: String,
    pub translations_path: String,
    pub locale: Locale,
    pub(crate) model_config: ModelConfig,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct ModelConfig {
    pub model_name: String,
    pub api_key: String,
    pub base_url: String,
}

impl Default for TcreiCliConfig {
    fn default() -> Self {
        let base = home_dir()
            .map(|p| p.join("tcrei"))
            .unwrap_or_else(|| PathBuf::from("tcrei"));

        Self {
            data_path: base.join("data").display().to_string(),
            translations_path: base.join("translations").display().to_string(),
            locale: Locale::En,
            model_config: ModelConfig::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_name: String::from("gemini-2.5-flash"),
            api_key: String::from(""),
            base_url: String::from("https://generativelanguage.googleapis.com/v1beta/openai"),
        }
    }
}

/// Loads the CLI config, exiting with a config error code when it cannot be
/// read. An empty configured API key is filled from the environment.
pub fn load_config() -> TcreiCliConfig {
    let config: Result<TcreiCliConfig, ConfyError> = confy::load(TCREI_CLI, None);
    match config {
        Ok(mut config) => {
            if config.model_config.api_key.is_empty()
                && let Ok(key) = std::env::var(API_KEY_ENV_VAR)
            {
                config.model_config.api_key = key;
            }
            config
        }
        _ => {
            eprintln!("Error: Problem loading config. Exiting...");
            std::process::exit(exitcode::CONFIG);
        }
    }
}

pub fn get_store(config: &TcreiCliConfig, override_path: Option<&str>) -> FileStore {
    let path = override_path.unwrap_or(&config.data_path);
    FileStore::new(PathBuf::from(path))
}

pub fn get_catalog_dir(config: &TcreiCliConfig) -> CatalogDir {
    CatalogDir::new(PathBuf::from(&config.translations_path))
}
