use async_trait::async_trait;
use phonenumber::country;

use super::base::{CleanerUtils, FieldCleaner};
use crate::config::NumberFormat;
use crate::constants::{ADDRESS_STAGE, NUMBER_STAGE};
use crate::domain::ContactRecord;
use crate::error::{CleanerError, Result};
use crate::pipeline::outcome::CleanResult;

/// Parses phone numbers against a region and formats them for display.
///
/// The region comes from the record's `country_code` (set by the address
/// stage) and falls back to the configured default.
pub struct NumberCleaner {
    default_region: String,
    format: NumberFormat,
}

impl NumberCleaner {
    pub fn new(default_region: &str, format: NumberFormat) -> Self {
        Self {
            default_region: default_region.to_uppercase(),
            format,
        }
    }

    pub fn clean(&self, raw: &str, country_code: Option<&str>) -> CleanResult<String> {
        CleanerUtils::settle(NUMBER_STAGE, self.try_clean(raw, country_code), None)
    }

    fn try_clean(&self, raw: &str, country_code: Option<&str>) -> Result<String> {
        let region = country_code
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .unwrap_or(self.default_region.as_str());
        let region_id: country::Id = region
            .to_uppercase()
            .parse()
            .map_err(|_| CleanerError::Phone(format!("unknown region '{}'", region)))?;

        let input = CleanerUtils::require_input(raw, "number")?;
        let parsed = phonenumber::parse(Some(region_id), input)
            .map_err(|e| CleanerError::Phone(format!("cannot parse '{}': {}", input, e)))?;
        let formatted = parsed.format().mode(self.format.mode()).to_string();

        if phonenumber::is_valid(&parsed) {
            Ok(formatted)
        } else {
            Err(CleanerError::Uncleanable(format!(
                "'{}' is not a valid number for region {}",
                input, region
            )))
        }
    }
}

#[async_trait]
impl FieldCleaner for NumberCleaner {
    async fn apply(&self, record: &mut ContactRecord) -> bool {
        let result = self.clean(&record.number, record.country_code.as_deref());
        record.number_clean = result.value;
        record.number_valid = Some(result.valid);
        result.valid
    }

    fn stage_name(&self) -> &'static str {
        NUMBER_STAGE
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![ADDRESS_STAGE]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaner() -> NumberCleaner {
        NumberCleaner::new("AU", NumberFormat::International)
    }

    #[test]
    fn test_formats_with_default_region() {
        let result = cleaner().clean("0412 345 678", None);
        assert_eq!(result, CleanResult::success("+61 412 345 678".to_string()));
    }

    #[test]
    fn test_rejects_short_number() {
        let result = cleaner().clean("123", Some("AU"));
        assert_eq!(result, CleanResult::failure(None));
    }

    #[test]
    fn test_rejects_garbage_and_unknown_region() {
        assert!(!cleaner().clean("call me maybe", None).valid);
        assert!(!cleaner().clean("", None).valid);
        assert!(!cleaner().clean("0412 345 678", Some("ZZ")).valid);
    }

    #[test]
    fn test_country_code_hint_changes_region() {
        // Valid as a US number, too long for an Australian one
        assert!(!cleaner().clean("201 555 0123", None).valid);

        let result = cleaner().clean("201 555 0123", Some("US"));
        assert!(result.valid);
        assert_eq!(result.value.as_deref(), Some("+1 201-555-0123"));
    }

    #[test]
    fn test_empty_hint_uses_default() {
        let result = cleaner().clean("0412 345 678", Some(""));
        assert_eq!(result.value.as_deref(), Some("+61 412 345 678"));
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let first = cleaner().clean("0412 345 678", None);
        let again = cleaner().clean(first.value.as_deref().unwrap(), None);
        assert_eq!(first, again);
    }

    #[test]
    fn test_e164_format() {
        let cleaner = NumberCleaner::new("AU", NumberFormat::E164);
        let result = cleaner.clean("0412 345 678", None);
        assert_eq!(result.value.as_deref(), Some("+61412345678"));
    }

    #[tokio::test]
    async fn test_apply_reads_country_code() {
        let mut record = ContactRecord::new("", "", "", "", "201 555 0123");
        record.country_code = Some("US".to_string());

        let valid = cleaner().apply(&mut record).await;
        assert!(valid);
        assert_eq!(record.number_clean.as_deref(), Some("+1 201-555-0123"));
        assert_eq!(record.number_valid, Some(true));
    }

    #[test]
    fn test_depends_on_address_stage() {
        assert_eq!(cleaner().dependencies(), vec![ADDRESS_STAGE]);
    }
}
