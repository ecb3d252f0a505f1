/// Stage name constants shared by the cleaners, the pipeline dependency check and metrics.
pub const NAME_STAGE: &str = "name";
pub const EMAIL_STAGE: &str = "email";
pub const URL_STAGE: &str = "url";
pub const ADDRESS_STAGE: &str = "address";
pub const NUMBER_STAGE: &str = "number";

/// Region used for phone parsing when the address stage produced no country code
pub const DEFAULT_COUNTRY_CODE: &str = "AU";

/// Minimum geocoder match score (0-100) for an address to be accepted
pub const LOCATION_CONFIDENCE_THRESHOLD: u8 = 99;

pub const DEFAULT_NAME_FORMAT: &str = "{first} {last}";

pub const DEFAULT_GEOCODER_ENDPOINT: &str =
    "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer";

pub const DEFAULT_CONFIG_PATH: &str = "cleaner.toml";

/// Output columns, in the order they are written
pub const OUTPUT_COLUMNS: [&str; 21] = [
    "name",
    "name_clean",
    "email",
    "email_clean",
    "number",
    "number_clean",
    "url",
    "url_clean",
    "address",
    "street",
    "suburb",
    "city",
    "state",
    "post_code",
    "country",
    "country_code",
    "name_valid",
    "email_valid",
    "url_valid",
    "number_valid",
    "address_valid",
];

/// Stage order used by the standard pipeline. Address runs before number so the
/// number stage can read the resolved country code.
pub fn standard_stage_order() -> Vec<&'static str> {
    vec![NAME_STAGE, EMAIL_STAGE, URL_STAGE, ADDRESS_STAGE, NUMBER_STAGE]
}
