//! Wire types for the routing provider.

use serde::Deserialize;

use crate::domain::ports::DriveRoute;

const ROUTE_OK: &str = "Ok";

/// Top-level routing response envelope.
#[derive(Debug, Deserialize)]
pub struct RouteResponseDto {
    pub code: String,
    #[serde(default)]
    pub routes: Vec<RouteLegDto>,
}

/// One computed route alternative.
#[derive(Debug, Deserialize)]
pub struct RouteLegDto {
    /// Distance in metres.
    pub distance: f64,
    /// Duration in seconds.
    pub duration: f64,
}

impl RouteResponseDto {
    /// Convert the envelope into a domain route.
    ///
    /// A non-`Ok` code or an empty route list is the determinate "no route"
    /// outcome, so this returns `None` rather than an error.
    pub fn into_drive_route(self) -> Option<DriveRoute> {
        if self.code != ROUTE_OK {
            return None;
        }
        self.routes.into_iter().next().map(|leg| DriveRoute {
            distance_km: leg.distance / 1000.0,
            duration_minutes: leg.duration / 60.0,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Envelope-to-domain conversion coverage.
    use super::{RouteLegDto, RouteResponseDto};

    fn envelope(code: &str, legs: Vec<RouteLegDto>) -> RouteResponseDto {
        RouteResponseDto {
            code: code.to_owned(),
            routes: legs,
        }
    }

    #[test]
    fn converts_metres_and_seconds_to_km_and_minutes() {
        let route = envelope(
            "Ok",
            vec![RouteLegDto {
                distance: 12_340.0,
                duration: 1_476.0,
            }],
        )
        .into_drive_route()
        .expect("route present");
        assert!((route.distance_km - 12.34).abs() < 1e-9);
        assert!((route.duration_minutes - 24.6).abs() < 1e-9);
    }

    #[test]
    fn non_ok_codes_yield_no_route() {
        let outcome = envelope(
            "NoRoute",
            vec![RouteLegDto {
                distance: 1.0,
                duration: 1.0,
            }],
        )
        .into_drive_route();
        assert!(outcome.is_none());
    }

    #[test]
    fn empty_route_lists_yield_no_route() {
        assert!(envelope("Ok", Vec::new()).into_drive_route().is_none());
    }
}
