// Adapters for external collaborators: geocoding service, country reference data, CSV files
pub mod arcgis_geocoder;
pub mod country_reference;
pub mod csv_io;
pub mod offline_geocoder;

pub use arcgis_geocoder::ArcGisGeocoder;
pub use country_reference::CountryReference;
pub use offline_geocoder::OfflineGeocoder;
