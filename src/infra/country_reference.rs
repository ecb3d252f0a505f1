use isocountry::CountryCode;
use std::collections::HashMap;

use crate::error::{CleanerError, Result};

/// ISO 3166-1 lookup from alpha-3 codes to the country's name and alpha-2 code.
///
/// Built once and shared read-only by the address cleaner.
#[derive(Debug, Clone)]
pub struct CountryReference {
    iso_to_name: HashMap<String, String>,
    iso_to_code: HashMap<String, String>,
}

impl CountryReference {
    /// Build both lookups from the full ISO 3166-1 country list
    pub fn load() -> Self {
        let mut iso_to_name = HashMap::new();
        let mut iso_to_code = HashMap::new();

        for country in CountryCode::iter() {
            iso_to_name.insert(country.alpha3().to_string(), country.name().to_string());
            iso_to_code.insert(country.alpha3().to_string(), country.alpha2().to_string());
        }

        tracing::debug!("Loaded {} countries into reference table", iso_to_code.len());

        Self {
            iso_to_name,
            iso_to_code,
        }
    }

    pub fn name(&self, alpha3: &str) -> Result<&str> {
        self.iso_to_name
            .get(alpha3)
            .map(String::as_str)
            .ok_or_else(|| CleanerError::UnknownCountry(alpha3.to_string()))
    }

    pub fn alpha2(&self, alpha3: &str) -> Result<&str> {
        self.iso_to_code
            .get(alpha3)
            .map(String::as_str)
            .ok_or_else(|| CleanerError::UnknownCountry(alpha3.to_string()))
    }

    pub fn len(&self) -> usize {
        self.iso_to_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iso_to_code.is_empty()
    }
}

impl Default for CountryReference {
    fn default() -> Self {
        Self::load()
    }
}
