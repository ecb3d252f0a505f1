use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use url::{Host, Url};
use validator::ValidateUrl;

use super::base::{CleanerUtils, FieldCleaner};
use crate::constants::URL_STAGE;
use crate::domain::ContactRecord;
use crate::error::{CleanerError, Result};
use crate::pipeline::outcome::CleanResult;

static SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").expect("valid regex"));

/// Normalizes website URLs and checks they are well formed
pub struct UrlCleaner;

impl UrlCleaner {
    pub fn new() -> Self {
        Self
    }

    pub fn clean(&self, raw: &str) -> CleanResult<String> {
        CleanerUtils::settle(URL_STAGE, self.try_clean(raw), None)
    }

    fn try_clean(&self, raw: &str) -> Result<String> {
        // Every "www." is removed, not only a leading host label
        let url = normalize(raw)?.replace("www.", "");
        if Self::validate(&url) {
            Ok(url)
        } else {
            Err(CleanerError::Uncleanable(format!("'{}' is not a valid URL", url)))
        }
    }

    /// Well-formed URL whose host is an IP address or a dotted domain name
    pub fn validate(url: &str) -> bool {
        if !url.validate_url() {
            return false;
        }
        match Url::parse(url).ok().and_then(|u| u.host().map(|h| h.to_owned())) {
            Some(Host::Domain(domain)) => CleanerUtils::is_dotted_domain(&domain),
            Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
            None => false,
        }
    }
}

/// Canonicalize a URL: default the scheme to https, lower-case scheme and host,
/// drop default ports and give an empty path a trailing slash.
fn normalize(raw: &str) -> Result<String> {
    let trimmed = CleanerUtils::require_input(raw, "url")?;

    let with_scheme = if SCHEME.is_match(trimmed) {
        trimmed.to_string()
    } else if let Some(rest) = trimmed.strip_prefix("//") {
        format!("https://{}", rest)
    } else {
        format!("https://{}", trimmed)
    };

    let parsed = Url::parse(&with_scheme)
        .map_err(|e| CleanerError::Uncleanable(format!("cannot parse URL '{}': {}", raw, e)))?;
    Ok(parsed.to_string())
}

impl Default for UrlCleaner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FieldCleaner for UrlCleaner {
    async fn apply(&self, record: &mut ContactRecord) -> bool {
        let result = self.clean(&record.url);
        record.url_clean = result.value;
        record.url_valid = Some(result.valid);
        result.valid
    }

    fn stage_name(&self) -> &'static str {
        URL_STAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_www() {
        let result = UrlCleaner::new().clean("http://www.example.com/");
        assert_eq!(result, CleanResult::success("http://example.com/".to_string()));
    }

    #[test]
    fn test_defaults_scheme_and_path() {
        let result = UrlCleaner::new().clean("Example.COM");
        assert_eq!(result.value.as_deref(), Some("https://example.com/"));

        let result = UrlCleaner::new().clean("www.example.com");
        assert_eq!(result, CleanResult::success("https://example.com/".to_string()));

        let result = UrlCleaner::new().clean("//www.example.com/contact");
        assert_eq!(result.value.as_deref(), Some("https://example.com/contact"));

        // An explicit scheme is kept
        let result = UrlCleaner::new().clean("http://example.com");
        assert_eq!(result.value.as_deref(), Some("http://example.com/"));

        let result = UrlCleaner::new().clean("https://example.com:443/About?q=1");
        assert_eq!(result.value.as_deref(), Some("https://example.com/About?q=1"));
    }

    #[test]
    fn test_strips_www_anywhere() {
        let result = UrlCleaner::new().clean("https://example.com/www.page");
        assert_eq!(result.value.as_deref(), Some("https://example.com/page"));
    }

    #[test]
    fn test_rejects_malformed_url() {
        let cleaner = UrlCleaner::new();
        for raw in ["not a url", "", "http://", "localhost"] {
            let result = cleaner.clean(raw);
            assert!(!result.valid, "{} should be invalid", raw);
            assert!(result.value.is_none());
        }
    }

    #[tokio::test]
    async fn test_apply_annotates_record() {
        let mut record = ContactRecord::new("", "", "www.example.org", "", "");
        let valid = UrlCleaner::new().apply(&mut record).await;

        assert!(valid);
        assert_eq!(record.url_clean.as_deref(), Some("https://example.org/"));
        assert_eq!(record.url_valid, Some(true));
    }
}
