//! Geographic coordinates carried as "lat, lng" text on records.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude, -90 to 90.
    pub lat: f64,
    /// Longitude, -180 to 180.
    pub lng: f64,
}

impl Coordinates {
    /// Create coordinates, returning `None` if either value is out of range.
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        valid.then_some(Self { lat, lng })
    }

    /// Parse a `"lat, lng"` string as entered on the registration form.
    ///
    /// Returns `None` for anything that is not exactly two numbers in range.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.split(',');
        let lat = parts.next()?.trim().parse::<f64>().ok()?;
        let lng = parts.next()?.trim().parse::<f64>().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Self::new(lat, lng)
    }

    /// Text written into the coordinates field when the map is clicked.
    #[must_use]
    pub fn to_field_text(self) -> String {
        format!("{:.6}, {:.6}", self.lat, self.lng)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let c = Coordinates::parse("40.7589, -73.9851").unwrap();
        assert!((c.lat - 40.7589).abs() < 1e-9);
        assert!((c.lng + 73.9851).abs() < 1e-9);

        let c = Coordinates::parse("25.7617,-80.1918").unwrap();
        assert!((c.lng + 80.1918).abs() < 1e-9);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Coordinates::parse("").is_none());
        assert!(Coordinates::parse("40.7").is_none());
        assert!(Coordinates::parse("north, west").is_none());
        assert!(Coordinates::parse("1, 2, 3").is_none());
        assert!(Coordinates::parse("NaN, 4").is_none());
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(Coordinates::parse("91, 0").is_none());
        assert!(Coordinates::parse("0, 181").is_none());
    }

    #[test]
    fn test_field_text_six_decimals() {
        let c = Coordinates::new(40.7128, -74.006).unwrap();
        assert_eq!(c.to_field_text(), "40.712800, -74.006000");
    }

    #[test]
    fn test_field_text_parses_back() {
        let c = Coordinates::new(34.0522, -118.2437).unwrap();
        let parsed = Coordinates::parse(&c.to_field_text()).unwrap();
        assert!((parsed.lat - c.lat).abs() < 1e-6);
    }
}
