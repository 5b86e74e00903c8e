// Labelmarks Settings Engine
// Loads, saves, updates and resets the loader configuration.
// Settings are stored as a JSON file at the platform-specific config path.

use std::fs;
use std::path::Path;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::LoaderSettings;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<LoaderSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &LoaderSettings;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: LoaderSettings,
}

impl SettingsEngine {
    /// Uses `path_override` if given, otherwise `settings.json` in the
    /// platform config directory.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string()
        });

        Self {
            config_path,
            settings: LoaderSettings::default(),
        }
    }

    fn validate(settings: &LoaderSettings) -> Result<(), SettingsError> {
        if settings.ttl_millis <= 0 {
            return Err(SettingsError::InvalidValue(format!(
                "ttl_millis must be positive, got {}",
                settings.ttl_millis
            )));
        }
        if !settings.source_url.starts_with("http://") && !settings.source_url.starts_with("https://") {
            return Err(SettingsError::InvalidValue(format!(
                "source_url must be http(s): {}",
                settings.source_url
            )));
        }
        if settings.request_timeout_secs == 0 {
            return Err(SettingsError::InvalidValue(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the config file.
    ///
    /// A missing file yields defaults; a malformed or invalid one is an error.
    fn load(&mut self) -> Result<LoaderSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            self.settings = LoaderSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let settings: LoaderSettings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        Self::validate(&settings)?;

        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Writes the current settings, creating parent directories as needed.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;
        tracing::debug!(path = %self.config_path, "saved settings");
        Ok(())
    }

    fn get_settings(&self) -> &LoaderSettings {
        &self.settings
    }

    /// Replaces one top-level setting, validates the result and saves it.
    ///
    /// The in-memory settings are left untouched when the key is unknown or
    /// the value does not fit.
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }

        let mut json_value = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        match json_value.as_object_mut() {
            Some(map) if map.contains_key(key) => {
                map.insert(key.to_string(), value);
            }
            _ => {
                return Err(SettingsError::InvalidKey(format!(
                    "Key '{}' not found in settings",
                    key
                )));
            }
        }

        let new_settings: LoaderSettings = serde_json::from_value(json_value).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;
        Self::validate(&new_settings)?;

        self.settings = new_settings;
        self.save()
    }

    /// Restores defaults and saves them.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = LoaderSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
