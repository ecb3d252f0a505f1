use serde::Serialize;

/// Outcome of cleaning a single field value.
///
/// `valid` is true only when `value` is present and passed the cleaner's
/// validation. A failure normally carries no value, but the constructor does not
/// enforce that: the address cleaner reports failure with an empty location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanResult<T> {
    pub valid: bool,
    pub value: Option<T>,
}

impl<T> CleanResult<T> {
    pub fn success(value: T) -> Self {
        Self {
            valid: true,
            value: Some(value),
        }
    }

    pub fn failure(value: Option<T>) -> Self {
        Self {
            valid: false,
            value,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}
