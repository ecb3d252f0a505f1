use async_trait::async_trait;

use crate::app::ports::{GeocodeAttributes, GeocoderPort};
use crate::error::{CleanerError, Result};

/// Geocoder used with `--skip-geocoding`: every lookup fails, so addresses come
/// out invalid and phone numbers fall back to the default region.
pub struct OfflineGeocoder;

#[async_trait]
impl GeocoderPort for OfflineGeocoder {
    async fn geocode(&self, _address: &str) -> Result<GeocodeAttributes> {
        Err(CleanerError::Geocoder {
            message: "geocoding disabled".to_string(),
        })
    }
}
