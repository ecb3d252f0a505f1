use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::app::ports::{GeocodeAttributes, GeocoderPort};
use crate::config::GeocoderConfig;
use crate::error::{CleanerError, Result};

/// Geocoder backed by the ArcGIS World GeocodeServer `findAddressCandidates` endpoint
pub struct ArcGisGeocoder {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    delay: Duration,
}

#[derive(Debug, Deserialize)]
struct FindCandidatesResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ServiceError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    attributes: GeocodeAttributes,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    code: Option<i64>,
    #[serde(default)]
    message: String,
}

impl ArcGisGeocoder {
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("contact_cleaner/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            delay: Duration::from_millis(config.delay_ms),
        })
    }

    fn candidates_url(&self) -> String {
        format!("{}/findAddressCandidates", self.endpoint)
    }
}

#[async_trait]
impl GeocoderPort for ArcGisGeocoder {
    async fn geocode(&self, address: &str) -> Result<GeocodeAttributes> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut query: Vec<(&str, &str)> = vec![
            ("SingleLine", address),
            ("outFields", "*"),
            ("maxLocations", "1"),
            ("f", "json"),
        ];
        if let Some(key) = self.api_key.as_deref() {
            query.push(("token", key));
        }

        tracing::debug!("HTTP GET request to: {}", self.candidates_url());
        let resp = self
            .client
            .get(self.candidates_url())
            .query(&query)
            .send()
            .await?
            .error_for_status()?;

        let body: FindCandidatesResponse = resp.json().await?;
        parse_candidates(body)
    }
}

fn parse_candidates(body: FindCandidatesResponse) -> Result<GeocodeAttributes> {
    if let Some(err) = body.error {
        return Err(CleanerError::Geocoder {
            message: format!("service error {}: {}", err.code.unwrap_or_default(), err.message),
        });
    }

    body.candidates
        .into_iter()
        .next()
        .map(|c| c.attributes)
        .ok_or_else(|| CleanerError::Geocoder {
            message: "no candidates returned".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_candidate() {
        let body: FindCandidatesResponse = serde_json::from_str(
            r#"{
                "spatialReference": {"wkid": 4326},
                "candidates": [{
                    "address": "1 Martin Place, Sydney, New South Wales, 2000",
                    "location": {"x": 151.21, "y": -33.86},
                    "score": 100,
                    "attributes": {
                        "StAddr": "1 Martin Pl",
                        "Nbrhd": "",
                        "City": "Sydney",
                        "Region": "New South Wales",
                        "Postal": "2000",
                        "Country": "AUS",
                        "Score": 100,
                        "Addr_type": "PointAddress"
                    }
                }]
            }"#,
        )
        .unwrap();

        let attributes = parse_candidates(body).unwrap();
        assert_eq!(attributes.street.as_deref(), Some("1 Martin Pl"));
        assert_eq!(attributes.neighborhood.as_deref(), Some(""));
        assert_eq!(attributes.country.as_deref(), Some("AUS"));
        assert_eq!(attributes.score, Some(100.0));
    }

    #[test]
    fn test_empty_candidates_is_an_error() {
        let body: FindCandidatesResponse =
            serde_json::from_str(r#"{"spatialReference": {"wkid": 4326}, "candidates": []}"#).unwrap();
        assert!(matches!(parse_candidates(body), Err(CleanerError::Geocoder { .. })));
    }

    #[test]
    fn test_service_error_is_an_error() {
        let body: FindCandidatesResponse = serde_json::from_str(
            r#"{"error": {"code": 498, "message": "Invalid Token", "details": []}}"#,
        )
        .unwrap();

        match parse_candidates(body) {
            Err(CleanerError::Geocoder { message }) => assert!(message.contains("498")),
            other => panic!("expected geocoder error, got {:?}", other),
        }
    }

    #[test]
    fn test_endpoint_trailing_slash_is_trimmed() {
        let config = GeocoderConfig {
            endpoint: "https://example.test/GeocodeServer/".to_string(),
            ..Default::default()
        };
        let geocoder = ArcGisGeocoder::new(&config).unwrap();
        assert_eq!(
            geocoder.candidates_url(),
            "https://example.test/GeocodeServer/findAddressCandidates"
        );
    }
}
