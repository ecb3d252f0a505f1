use serde::{Deserialize, Serialize};

/// One input row as read from the source CSV. Columns other than these five are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawContact {
    pub name: String,
    pub email: String,
    pub url: String,
    pub address: String,
    pub number: String,
}

/// A contact record moving through the cleaning pipeline.
///
/// Every output column exists from the start and is filled in by the stage that
/// owns it. Field order matches the output CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactRecord {
    pub name: String,
    pub name_clean: Option<String>,
    pub email: String,
    pub email_clean: Option<String>,
    pub number: String,
    pub number_clean: Option<String>,
    pub url: String,
    pub url_clean: Option<String>,
    pub address: String,
    pub street: Option<String>,
    pub suburb: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub post_code: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub name_valid: Option<bool>,
    pub email_valid: Option<bool>,
    pub url_valid: Option<bool>,
    pub number_valid: Option<bool>,
    pub address_valid: Option<bool>,
}

impl From<RawContact> for ContactRecord {
    fn from(raw: RawContact) -> Self {
        Self {
            name: raw.name,
            email: raw.email,
            number: raw.number,
            url: raw.url,
            address: raw.address,
            ..Default::default()
        }
    }
}

impl ContactRecord {
    /// Build a record from raw field values, mostly useful in tests and the `check` command
    pub fn new(name: &str, email: &str, url: &str, address: &str, number: &str) -> Self {
        RawContact {
            name: name.to_string(),
            email: email.to_string(),
            url: url.to_string(),
            address: address.to_string(),
            number: number.to_string(),
        }
        .into()
    }
}

/// Geocoded address components
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub street: Option<String>,
    pub suburb: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub post_code: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
}

impl Location {
    /// True when no component is present
    pub fn is_empty(&self) -> bool {
        *self == Location::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_raw_has_no_output_fields() {
        let record = ContactRecord::new("jane doe", "jane@example.com", "example.com", "1 Main St", "0412 345 678");

        assert_eq!(record.name, "jane doe");
        assert_eq!(record.number, "0412 345 678");
        assert!(record.name_clean.is_none());
        assert!(record.country_code.is_none());
        assert!(record.address_valid.is_none());
    }

    #[test]
    fn test_empty_location() {
        assert!(Location::default().is_empty());

        let location = Location {
            city: Some("Sydney".to_string()),
            ..Default::default()
        };
        assert!(!location.is_empty());
    }
}
