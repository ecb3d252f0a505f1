use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_COUNTRY_CODE, DEFAULT_GEOCODER_ENDPOINT, DEFAULT_NAME_FORMAT,
    LOCATION_CONFIDENCE_THRESHOLD,
};
use crate::error::{CleanerError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cleaning: CleaningConfig,
    pub geocoder: GeocoderConfig,
}

/// Immutable settings shared by the field cleaners
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Phone region used when a record has no country code from the address stage
    pub default_region: String,
    pub number_format: NumberFormat,
    /// Minimum geocoder score (0-100) for an address to be accepted
    pub confidence_threshold: u8,
    /// Display template for cleaned names, e.g. "{first} {last}"
    pub name_format: String,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            default_region: DEFAULT_COUNTRY_CODE.to_string(),
            number_format: NumberFormat::International,
            confidence_threshold: LOCATION_CONFIDENCE_THRESHOLD,
            name_format: DEFAULT_NAME_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    International,
    National,
    E164,
    Rfc3966,
}

impl NumberFormat {
    pub fn mode(self) -> phonenumber::Mode {
        match self {
            NumberFormat::International => phonenumber::Mode::International,
            NumberFormat::National => phonenumber::Mode::National,
            NumberFormat::E164 => phonenumber::Mode::E164,
            NumberFormat::Rfc3966 => phonenumber::Mode::Rfc3966,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
    /// Pause between geocoding requests
    pub delay_ms: u64,
    pub api_key: Option<String>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GEOCODER_ENDPOINT.to_string(),
            timeout_seconds: 30,
            delay_ms: 0,
            api_key: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults when the file
    /// does not exist, then apply environment overrides and validate.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let config_content = fs::read_to_string(path).map_err(|e| {
                CleanerError::Config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            Self::from_toml(&config_content)?
        } else {
            tracing::debug!("Config file '{}' not found, using defaults", path.display());
            Config::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML content. Region codes are matched upper-case, so "au" reads as "AU".
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.cleaning.default_region = config.cleaning.default_region.trim().to_uppercase();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(key) = std::env::var("ARCGIS_API_KEY") {
            if !key.trim().is_empty() {
                self.geocoder.api_key = Some(key);
            }
        }
        if let Ok(region) = std::env::var("CLEANER_DEFAULT_REGION") {
            self.cleaning.default_region = region.trim().to_uppercase();
        }
        if let Ok(threshold) = std::env::var("CLEANER_CONFIDENCE_THRESHOLD") {
            self.cleaning.confidence_threshold = threshold.trim().parse().map_err(|_| {
                CleanerError::Config(format!(
                    "CLEANER_CONFIDENCE_THRESHOLD must be an integer 0-100, got '{}'",
                    threshold
                ))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.cleaning.validate()
    }
}

impl CleaningConfig {
    pub fn validate(&self) -> Result<()> {
        if phonenumber::country::Id::from_str(&self.default_region).is_err() {
            return Err(CleanerError::Config(format!(
                "default_region '{}' is not a known phone region",
                self.default_region
            )));
        }
        if self.confidence_threshold > 100 {
            return Err(CleanerError::Config(format!(
                "confidence_threshold must be within 0-100, got {}",
                self.confidence_threshold
            )));
        }
        if !self.name_format.contains("{first}") && !self.name_format.contains("{last}") {
            return Err(CleanerError::Config(format!(
                "name_format '{}' must contain {{first}} or {{last}}",
                self.name_format
            )));
        }
        Ok(())
    }
}
