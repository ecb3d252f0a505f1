use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

use super::base::{CleanerUtils, FieldCleaner};
use crate::app::ports::{GeocodeAttributes, GeocoderPort};
use crate::constants::ADDRESS_STAGE;
use crate::domain::{ContactRecord, Location};
use crate::error::{CleanerError, Result};
use crate::infra::CountryReference;
use crate::metrics::CleaningMetrics;
use crate::pipeline::outcome::CleanResult;

/// Geocodes free-text addresses into structured location components.
///
/// Holds the only long-lived state in the pipeline: the geocoder handle and the
/// ISO 3166 lookups. Both are read-only after construction.
pub struct AddressCleaner {
    geocoder: Arc<dyn GeocoderPort>,
    countries: Arc<CountryReference>,
    confidence_threshold: u8,
}

impl AddressCleaner {
    pub fn new(
        geocoder: Arc<dyn GeocoderPort>,
        countries: Arc<CountryReference>,
        confidence_threshold: u8,
    ) -> Self {
        Self {
            geocoder,
            countries,
            confidence_threshold,
        }
    }

    /// Geocode an address. Failure carries an empty `Location` rather than `None`.
    pub async fn clean(&self, raw: &str) -> CleanResult<Location> {
        CleanerUtils::settle(ADDRESS_STAGE, self.try_clean(raw).await, Some(Location::default()))
    }

    async fn try_clean(&self, raw: &str) -> Result<Location> {
        let address = CleanerUtils::require_input(raw, "address")?;

        let started = Instant::now();
        let outcome = self.geocoder.geocode(address).await;
        CleaningMetrics::record_geocode_duration(started.elapsed().as_secs_f64(), outcome.is_ok());

        self.locate(outcome?)
    }

    /// Map geocoder attributes to a location, enforcing the confidence threshold
    fn locate(&self, attributes: GeocodeAttributes) -> Result<Location> {
        let alpha3 = required(attributes.country, "Country")?;
        let location = Location {
            street: Some(required(attributes.street, "StAddr")?),
            suburb: Some(required(attributes.neighborhood, "Nbrhd")?),
            city: Some(required(attributes.city, "City")?),
            state: Some(required(attributes.region, "Region")?),
            post_code: Some(required(attributes.postal, "Postal")?),
            country: Some(self.countries.name(&alpha3)?.to_string()),
            country_code: Some(self.countries.alpha2(&alpha3)?.to_string()),
        };

        let score = attributes
            .score
            .ok_or_else(|| CleanerError::MissingField("Score".to_string()))?;
        if score.trunc() >= f64::from(self.confidence_threshold) {
            Ok(location)
        } else {
            Err(CleanerError::Uncleanable(format!(
                "match score {} below threshold {}",
                score, self.confidence_threshold
            )))
        }
    }
}

fn required(value: Option<String>, attribute: &str) -> Result<String> {
    value.ok_or_else(|| CleanerError::MissingField(attribute.to_string()))
}

#[async_trait]
impl FieldCleaner for AddressCleaner {
    async fn apply(&self, record: &mut ContactRecord) -> bool {
        let result = self.clean(&record.address).await;
        let location = result.value.unwrap_or_default();

        record.street = location.street;
        record.suburb = location.suburb;
        record.city = location.city;
        record.state = location.state;
        record.post_code = location.post_code;
        record.country = location.country;
        record.country_code = location.country_code;
        record.address_valid = Some(result.valid);
        result.valid
    }

    fn stage_name(&self) -> &'static str {
        ADDRESS_STAGE
    }
}
