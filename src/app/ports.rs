use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;

/// Geocoding capability used by the address cleaner
#[async_trait]
pub trait GeocoderPort: Send + Sync {
    /// Resolve a free-text address to the best matching candidate's attributes
    async fn geocode(&self, address: &str) -> Result<GeocodeAttributes>;
}

/// Output attributes of a geocoding match, named after the ArcGIS `outFields=*` keys.
///
/// Every attribute is optional on the wire; the address cleaner decides which
/// ones are required.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GeocodeAttributes {
    #[serde(rename = "StAddr")]
    pub street: Option<String>,
    #[serde(rename = "Nbrhd")]
    pub neighborhood: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "Region")]
    pub region: Option<String>,
    #[serde(rename = "Postal")]
    pub postal: Option<String>,
    /// ISO 3166-1 alpha-3 country code
    #[serde(rename = "Country")]
    pub country: Option<String>,
    /// Match score, 0-100
    #[serde(rename = "Score")]
    pub score: Option<f64>,
}
