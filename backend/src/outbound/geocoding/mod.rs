//! Reqwest-backed geocoding source adapter.
//!
//! This adapter owns transport details only: query construction, the request
//! timeout, HTTP status handling, and JSON decoding into domain coordinates.
//! A zero-result search and a non-success status are both the determinate
//! "no match" outcome; only transport, timeout, and decode faults error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::warn;

mod dto;

use dto::PlaceDto;

use crate::domain::ports::{GeocodingSource, GeocodingSourceError};
use crate::domain::{GeoCoordinate, Pincode};

const DEFAULT_USER_AGENT: &str = "sabziwala-backend/0.1 (ops@sabziwala.invalid)";
const SEARCH_COUNTRY: &str = "India";
const SEARCH_COUNTRY_CODES: &str = "in";

/// Errors raised while constructing the adapter.
#[derive(Debug, thiserror::Error)]
pub enum GeocoderBuildError {
    /// The HTTP client could not be constructed.
    #[error("geocoding client construction failed: {0}")]
    Client(#[from] reqwest::Error),
    /// The endpoint cannot host the search path.
    #[error("geocoding endpoint invalid: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// Geocoding adapter performing `GET /search` requests against one endpoint.
pub struct NominatimGeocoder {
    client: Client,
    search_url: Url,
    user_agent: String,
}

impl NominatimGeocoder {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    /// Returns an error when the HTTP client cannot be constructed or the
    /// endpoint cannot be extended with the search path.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, GeocoderBuildError> {
        let client = Client::builder().timeout(timeout).build()?;
        let search_url = endpoint.join("search")?;
        Ok(Self {
            client,
            search_url,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        })
    }

    /// Override the outbound user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[async_trait]
impl GeocodingSource for NominatimGeocoder {
    async fn geocode(
        &self,
        pincode: &Pincode,
    ) -> Result<Option<GeoCoordinate>, GeocodingSourceError> {
        let query = format!("{}, {SEARCH_COUNTRY}", pincode.as_str());
        let response = self
            .client
            .get(self.search_url.clone())
            .query(&[
                ("q", query.as_str()),
                ("format", "json"),
                ("limit", "1"),
                ("countrycodes", SEARCH_COUNTRY_CODES),
            ])
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), %pincode, "geocoding returned non-success status");
            return Ok(None);
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        parse_best_match(body.as_ref())
    }
}

fn parse_best_match(body: &[u8]) -> Result<Option<GeoCoordinate>, GeocodingSourceError> {
    let places: Vec<PlaceDto> = serde_json::from_slice(body).map_err(|error| {
        GeocodingSourceError::decode(format!("invalid geocoding JSON payload: {error}"))
    })?;
    let Some(place) = places.into_iter().next() else {
        return Ok(None);
    };
    place
        .into_coordinate()
        .map(Some)
        .map_err(GeocodingSourceError::decode)
}

fn map_transport_error(error: reqwest::Error) -> GeocodingSourceError {
    if error.is_timeout() {
        GeocodingSourceError::timeout(error.to_string())
    } else {
        GeocodingSourceError::transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network geocoding helpers.
    use super::parse_best_match;
    use crate::domain::ports::GeocodingSourceError;

    #[test]
    fn parses_the_first_place_into_a_coordinate() {
        let body = r#"[
            { "lat": "21.1458004", "lon": "79.0881546", "display_name": "Nagpur" },
            { "lat": "28.61", "lon": "77.20", "display_name": "elsewhere" }
        ]"#;

        let coordinate = parse_best_match(body.as_bytes())
            .expect("decode succeeds")
            .expect("match present");
        assert!((coordinate.lat - 21.1458004).abs() < f64::EPSILON);
        assert!((coordinate.lng - 79.0881546).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_result_sets_are_a_miss_not_an_error() {
        let outcome = parse_best_match(b"[]").expect("decode succeeds");
        assert!(outcome.is_none());
    }

    #[test]
    fn malformed_payloads_map_to_decode_errors() {
        let error = parse_best_match(b"<html>rate limited</html>").expect_err("must fail");
        assert!(matches!(error, GeocodingSourceError::Decode { .. }));
    }

    #[test]
    fn unparsable_coordinate_strings_map_to_decode_errors() {
        let body = r#"[{ "lat": "not-a-number", "lon": "79.0" }]"#;
        let error = parse_best_match(body.as_bytes()).expect_err("must fail");
        assert!(matches!(error, GeocodingSourceError::Decode { .. }));
    }
}
