//! Reqwest-backed routing source adapter.
//!
//! Builds `driving/<lng>,<lat>;<lng>,<lat>` route requests against one
//! endpoint and decodes the response envelope into a domain route. Geometry
//! is never requested; the pricing pipeline only needs distance and duration.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::warn;

mod dto;

use dto::RouteResponseDto;

use crate::domain::GeoCoordinate;
use crate::domain::ports::{DriveRoute, RoutingSource, RoutingSourceError};

/// Errors raised while constructing the adapter.
#[derive(Debug, thiserror::Error)]
pub enum RouterBuildError {
    /// The HTTP client could not be constructed.
    #[error("routing client construction failed: {0}")]
    Client(#[from] reqwest::Error),
}

/// Routing adapter performing `GET route/v1/driving/...` requests.
pub struct OsrmRouter {
    client: Client,
    endpoint: Url,
}

impl OsrmRouter {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, RouterBuildError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    fn route_url(
        &self,
        origin: GeoCoordinate,
        destination: GeoCoordinate,
    ) -> Result<Url, RoutingSourceError> {
        validate_coordinate(origin)?;
        validate_coordinate(destination)?;
        let path = format!(
            "route/v1/driving/{},{};{},{}",
            origin.lng, origin.lat, destination.lng, destination.lat
        );
        self.endpoint
            .join(&path)
            .map_err(|error| RoutingSourceError::invalid_request(error.to_string()))
    }
}

fn validate_coordinate(coordinate: GeoCoordinate) -> Result<(), RoutingSourceError> {
    if !coordinate.lat.is_finite() || !coordinate.lng.is_finite() {
        return Err(RoutingSourceError::invalid_request(
            "coordinates must be finite",
        ));
    }
    if !(-90.0..=90.0).contains(&coordinate.lat) || !(-180.0..=180.0).contains(&coordinate.lng) {
        return Err(RoutingSourceError::invalid_request(
            "coordinates must lie within WGS84 bounds",
        ));
    }
    Ok(())
}

#[async_trait]
impl RoutingSource for OsrmRouter {
    async fn drive_route(
        &self,
        origin: GeoCoordinate,
        destination: GeoCoordinate,
    ) -> Result<Option<DriveRoute>, RoutingSourceError> {
        let url = self.route_url(origin, destination)?;
        let response = self
            .client
            .get(url)
            .query(&[("overview", "false")])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "routing returned non-success status");
            return Ok(None);
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        parse_route(body.as_ref())
    }
}

fn parse_route(body: &[u8]) -> Result<Option<DriveRoute>, RoutingSourceError> {
    let decoded: RouteResponseDto = serde_json::from_slice(body).map_err(|error| {
        RoutingSourceError::decode(format!("invalid routing JSON payload: {error}"))
    })?;
    Ok(decoded.into_drive_route())
}

fn map_transport_error(error: reqwest::Error) -> RoutingSourceError {
    if error.is_timeout() {
        RoutingSourceError::timeout(error.to_string())
    } else {
        RoutingSourceError::transport(error.to_string())
    }
}
