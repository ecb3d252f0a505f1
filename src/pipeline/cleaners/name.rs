use async_trait::async_trait;
use human_name::Name;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::base::{CleanerUtils, FieldCleaner};
use crate::constants::NAME_STAGE;
use crate::domain::ContactRecord;
use crate::error::{CleanerError, Result};
use crate::pipeline::outcome::CleanResult;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static MC_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Mc(\p{Ll})").expect("valid regex"));

/// Surname particles kept lower-case unless they open the whole name
const PARTICLES: &[&str] = &[
    "da", "de", "del", "della", "den", "der", "di", "du", "la", "le", "van", "von",
];

/// Parses free-text names and renders them through a display template
pub struct NameCleaner {
    name_format: String,
}

impl NameCleaner {
    pub fn new(name_format: &str) -> Self {
        Self {
            name_format: name_format.to_string(),
        }
    }

    pub fn clean(&self, raw: &str) -> CleanResult<String> {
        CleanerUtils::settle(NAME_STAGE, self.try_clean(raw), None)
    }

    fn try_clean(&self, raw: &str) -> Result<String> {
        let lowered = CleanerUtils::require_input(raw, "name")?.to_lowercase();

        let (first, last) = match Name::parse(&lowered) {
            Some(parsed) => {
                let first = parsed.given_name().map(capitalize).unwrap_or_default();
                let last = capitalize_surname(parsed.surname(), !first.is_empty());
                (first, last)
            }
            None => single_word(&lowered)
                .map(|word| (capitalize(word), String::new()))
                .ok_or_else(|| CleanerError::Uncleanable(format!("unparseable name '{}'", raw)))?,
        };

        let formatted = self
            .name_format
            .replace("{first}", &first)
            .replace("{last}", &last);
        let formatted = WHITESPACE.replace_all(formatted.trim(), " ").into_owned();

        if formatted.is_empty() {
            Err(CleanerError::Uncleanable(format!("name '{}' has no first or last component", raw)))
        } else {
            Ok(formatted)
        }
    }
}

/// A lone alphabetic word such as "cher" is still a usable name
fn single_word(input: &str) -> Option<&str> {
    let mut words = input.split_whitespace();
    let word = words.next()?;
    let is_name = word
        .chars()
        .all(|c| c.is_alphabetic() || is_combining_mark(c) || c == '-' || c == '\'');
    (words.next().is_none() && is_name).then_some(word)
}

/// Capitalize every word of a name component
fn capitalize(component: &str) -> String {
    component
        .split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Like `capitalize`, but particles ("van", "de la") stay lower-case. A leading
/// particle is capitalized when there is no given name in front of it.
fn capitalize_surname(surname: &str, after_given: bool) -> String {
    surname
        .split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            if (after_given || i > 0) && PARTICLES.contains(&lower.as_str()) {
                lower
            } else {
                capitalize_word(&lower)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-case the first letter and every letter following a non-letter ("o'neil", "smith-jones").
///
/// Output is NFC; combining marks belong to the letter before them.
fn capitalize_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut upper_next = true;
    for c in word.to_lowercase().nfc() {
        if is_combining_mark(c) {
            out.push(c);
        } else if c.is_alphabetic() {
            if upper_next {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            upper_next = false;
        } else {
            out.push(c);
            upper_next = true;
        }
    }

    MC_PREFIX
        .replace(&out, |caps: &regex::Captures| format!("Mc{}", caps[1].to_uppercase()))
        .into_owned()
}

#[async_trait]
impl FieldCleaner for NameCleaner {
    async fn apply(&self, record: &mut ContactRecord) -> bool {
        let result = self.clean(&record.name);
        record.name_clean = result.value;
        record.name_valid = Some(result.valid);
        result.valid
    }

    fn stage_name(&self) -> &'static str {
        NAME_STAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_NAME_FORMAT;

    fn cleaner() -> NameCleaner {
        NameCleaner::new(DEFAULT_NAME_FORMAT)
    }

    #[test]
    fn test_recapitalizes_upper_case_name() {
        let result = cleaner().clean("JOHN SMITH");
        assert_eq!(result, CleanResult::success("John Smith".to_string()));
    }

    #[test]
    fn test_recapitalizes_lower_case_name() {
        let result = cleaner().clean("  jane   doe ");
        assert_eq!(result.value.as_deref(), Some("Jane Doe"));
        assert!(result.valid);
    }

    #[test]
    fn test_empty_name_fails() {
        let result = cleaner().clean("");
        assert!(!result.valid);
        assert!(result.value.is_none());

        let result = cleaner().clean("   ");
        assert!(!result.valid);
        assert!(result.value.is_none());
    }

    #[test]
    fn test_punctuation_only_fails() {
        let result = cleaner().clean("!!! ???");
        assert!(!result.valid);
        assert!(result.value.is_none());
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let first = cleaner().clean("mary o'neil");
        let again = cleaner().clean(first.value.as_deref().unwrap());
        assert_eq!(first, again);
    }

    #[test]
    fn test_custom_template() {
        let cleaner = NameCleaner::new("{last}, {first}");
        let result = cleaner.clean("john smith");
        assert_eq!(result.value.as_deref(), Some("Smith, John"));
    }

    #[test]
    fn test_capitalize_word_rules() {
        assert_eq!(capitalize_word("o'neil"), "O'Neil");
        assert_eq!(capitalize_word("smith-jones"), "Smith-Jones");
        assert_eq!(capitalize_word("mcdonald"), "McDonald");
        assert_eq!(capitalize_surname("van der berg", false), "Van der Berg");
        assert_eq!(capitalize_surname("van der berg", true), "van der Berg");
    }

    #[test]
    fn test_accented_name_keeps_letters_composed() {
        let result = cleaner().clean("jos\u{e9} garc\u{ed}a");
        assert_eq!(result, CleanResult::success("Jos\u{e9} Garc\u{ed}a".to_string()));

        // Decomposed input comes out composed as well
        let result = cleaner().clean("JOSE\u{301} GARCI\u{301}A");
        assert_eq!(result.value.as_deref(), Some("Jos\u{e9} Garc\u{ed}a"));
    }

    #[test]
    fn test_combining_mark_does_not_start_a_word() {
        assert_eq!(capitalize_word("garci\u{301}a"), "Garc\u{ed}a");
        assert_eq!(capitalize_word("\u{f8}ster\u{e5}s"), "\u{d8}ster\u{e5}s");
    }

    #[test]
    fn test_surname_particles_stay_lower_case() {
        let result = cleaner().clean("LUDWIG VAN BEETHOVEN");
        assert_eq!(result.value.as_deref(), Some("Ludwig van Beethoven"));

        let result = cleaner().clean("van der berg");
        assert!(result.valid);
        assert_eq!(result.value.as_deref(), Some("Van der Berg"));
    }

    #[tokio::test]
    async fn test_apply_annotates_record() {
        let mut record = ContactRecord::new("JOHN SMITH", "", "", "", "");
        let valid = cleaner().apply(&mut record).await;

        assert!(valid);
        assert_eq!(record.name, "JOHN SMITH");
        assert_eq!(record.name_clean.as_deref(), Some("John Smith"));
        assert_eq!(record.name_valid, Some(true));
    }
}
