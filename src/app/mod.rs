// Ports the cleaning pipeline depends on; adapters live in `infra`
pub mod ports;

pub use ports::{GeocodeAttributes, GeocoderPort};
