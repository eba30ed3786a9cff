use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Address of a reverse-geocoded point, split into the components the provider reports.
///
/// `label` is the provider's fully formatted address and is always present;
/// every other field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredAddress {
    pub label: String,
    pub house_number: Option<String>,
    pub street: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub state_name: Option<String>,
    pub postcode: Option<String>,
    /// ISO 3166-1 alpha-3 code, e.g. "AUS".
    pub country_code: Option<String>,
    pub country: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display_is_lat_comma_lng() {
        let location = Location::new(-37.81375, 144.97176);
        assert_eq!(location.to_string(), "-37.81375,144.97176");
    }

    #[test]
    fn location_equality_is_by_value() {
        assert_eq!(Location::new(1.5, 2.5), Location { lat: 1.5, lng: 2.5 });
        assert_ne!(Location::new(1.5, 2.5), Location::new(2.5, 1.5));
    }
}
