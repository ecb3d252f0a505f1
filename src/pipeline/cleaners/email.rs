use async_trait::async_trait;
use validator::ValidateEmail;

use super::base::{CleanerUtils, FieldCleaner};
use crate::constants::EMAIL_STAGE;
use crate::domain::ContactRecord;
use crate::error::{CleanerError, Result};
use crate::pipeline::outcome::CleanResult;

/// Lower-cases email addresses and checks their syntax
pub struct EmailCleaner;

impl EmailCleaner {
    pub fn new() -> Self {
        Self
    }

    pub fn clean(&self, raw: &str) -> CleanResult<String> {
        CleanerUtils::settle(EMAIL_STAGE, self.try_clean(raw), None)
    }

    fn try_clean(&self, raw: &str) -> Result<String> {
        let email = CleanerUtils::require_input(raw, "email")?.to_lowercase();
        if Self::validate(&email) {
            Ok(email)
        } else {
            Err(CleanerError::Uncleanable(format!("'{}' is not a valid email address", email)))
        }
    }

    /// Syntax check plus a dotted domain, so "john@localhost" is rejected
    pub fn validate(email: &str) -> bool {
        email.validate_email()
            && email
                .rsplit_once('@')
                .map_or(false, |(_, domain)| CleanerUtils::is_dotted_domain(domain))
    }
}

impl Default for EmailCleaner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FieldCleaner for EmailCleaner {
    async fn apply(&self, record: &mut ContactRecord) -> bool {
        let result = self.clean(&record.email);
        record.email_clean = result.value;
        record.email_valid = Some(result.valid);
        result.valid
    }

    fn stage_name(&self) -> &'static str {
        EMAIL_STAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_cases_valid_email() {
        let result = EmailCleaner::new().clean("John@EXAMPLE.com");
        assert_eq!(result, CleanResult::success("john@example.com".to_string()));
    }

    #[test]
    fn test_rejects_malformed_email() {
        let cleaner = EmailCleaner::new();
        for raw in ["not-an-email", "", "two@@example.com", "spaces in@example.com"] {
            let result = cleaner.clean(raw);
            assert!(!result.valid, "{} should be invalid", raw);
            assert!(result.value.is_none());
        }
    }

    #[test]
    fn test_rejects_single_label_domain() {
        let cleaner = EmailCleaner::new();
        assert_eq!(cleaner.clean("john@localhost"), CleanResult::failure(None));
        assert!(!cleaner.clean("john@example.c").valid);
        assert!(cleaner.clean("john@mail.example.co.uk").valid);
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let cleaner = EmailCleaner::new();
        let first = cleaner.clean("Mixed.Case@Example.ORG");
        let again = cleaner.clean(first.value.as_deref().unwrap());
        assert_eq!(first, again);
    }

    #[tokio::test]
    async fn test_apply_marks_invalid() {
        let mut record = ContactRecord::new("", "nope", "", "", "");
        let valid = EmailCleaner::new().apply(&mut record).await;

        assert!(!valid);
        assert_eq!(record.email_clean, None);
        assert_eq!(record.email_valid, Some(false));
    }
}
