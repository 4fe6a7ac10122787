//! Reverse geocoding: turning a location's coordinates into a display name.

pub mod nominatim;

use std::future::Future;

/// Name used when a location's city cannot be resolved.
pub const UNKNOWN_CITY: &str = "Unknown";

/// Resolves coordinates into a city name.
///
/// Resolution never fails: implementations return [`UNKNOWN_CITY`] when no
/// name can be found.
pub trait CityResolver {
    fn resolve(&self, latitude: f64, longitude: f64) -> impl Future<Output = String>;
}
