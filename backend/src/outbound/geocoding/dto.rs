//! Wire types for the geocoding provider.

use serde::Deserialize;

use crate::domain::GeoCoordinate;

/// One place entry in a geocoding search response.
///
/// The provider serialises coordinates as strings; conversion to floats
/// happens here so the adapter surface deals in domain coordinates only.
#[derive(Debug, Deserialize)]
pub struct PlaceDto {
    pub lat: String,
    pub lon: String,
}

impl PlaceDto {
    /// Convert the wire place into a domain coordinate.
    pub fn into_coordinate(self) -> Result<GeoCoordinate, String> {
        let lat = parse_axis("latitude", &self.lat)?;
        let lng = parse_axis("longitude", &self.lon)?;
        Ok(GeoCoordinate { lat, lng })
    }
}

fn parse_axis(axis: &str, raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|error| format!("invalid {axis} {raw:?}: {error}"))
}

#[cfg(test)]
mod tests {
    //! Coordinate string conversion coverage.
    use super::PlaceDto;

    #[test]
    fn converts_string_coordinates_to_floats() {
        let place = PlaceDto {
            lat: "21.1458004".to_owned(),
            lon: " 79.0882 ".to_owned(),
        };
        let coordinate = place.into_coordinate().expect("valid coordinate");
        assert!((coordinate.lat - 21.1458004).abs() < f64::EPSILON);
        assert!((coordinate.lng - 79.0882).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_unparsable_coordinates() {
        let place = PlaceDto {
            lat: "21.14".to_owned(),
            lon: "east-ish".to_owned(),
        };
        let error = place.into_coordinate().expect_err("must fail");
        assert!(error.contains("longitude"));
    }
}
