// Base trait and utilities for field cleaners
pub mod base;

// Individual cleaner implementations
pub mod address;
pub mod email;
pub mod name;
pub mod number;
pub mod url;

// Re-export the main components
pub use address::AddressCleaner;
pub use base::{CleanerUtils, FieldCleaner, MetricsCleaner};
pub use email::EmailCleaner;
pub use name::NameCleaner;
pub use number::NumberCleaner;
pub use url::UrlCleaner;
