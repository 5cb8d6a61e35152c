//! MapQuest Directions API response types.
//!
//! Only the fields needed to build a [`Route`] are decoded. A request made
//! with `shapeFormat=raw` and `fullShape=true` returns the whole geometry as a
//! flat `[lat, lng, lat, lng, ...]` array.
//!
//! See: <https://developer.mapquest.com/documentation/directions-api/route/get>

use fuelwise_core::{Route, RouteProviderError};
use geo::Coord;
use serde::Deserialize;

/// Status code MapQuest reports for a successful request.
const STATUS_OK: i64 = 0;

/// Top-level Directions API response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Request status block.
    pub info: Info,
    /// Route body; empty or partial when the request failed.
    #[serde(default)]
    pub route: Option<RouteBody>,
}

/// Request status block.
#[derive(Debug, Deserialize)]
pub struct Info {
    /// `0` on success, otherwise a MapQuest error code.
    pub statuscode: i64,
    /// Human-readable error messages.
    #[serde(default)]
    pub messages: Vec<String>,
}

/// The computed route.
#[derive(Debug, Default, Deserialize)]
pub struct RouteBody {
    /// Driving distance in the requested unit (miles for `unit=m`).
    pub distance: Option<f64>,
    /// Route geometry.
    pub shape: Option<Shape>,
    /// Geocoded waypoints in request order.
    #[serde(default)]
    pub locations: Vec<Location>,
}

/// Route geometry in raw format.
#[derive(Debug, Default, Deserialize)]
pub struct Shape {
    /// Interleaved latitude and longitude values.
    #[serde(rename = "shapePoints", default)]
    pub shape_points: Vec<f64>,
}

/// A geocoded waypoint.
#[derive(Debug, Deserialize)]
pub struct Location {
    /// Resolved position.
    #[serde(rename = "latLng")]
    pub lat_lng: LatLng,
}

/// Latitude and longitude pair.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl From<LatLng> for Coord<f64> {
    fn from(value: LatLng) -> Self {
        Self {
            x: value.lng,
            y: value.lat,
        }
    }
}

impl DirectionsResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.info.statuscode == STATUS_OK
    }

    /// Convert the response for the `start` to `end` request into a [`Route`].
    ///
    /// # Errors
    /// Maps MapQuest status codes onto [`RouteProviderError`] categories and
    /// reports malformed bodies as [`RouteProviderError::Parse`].
    pub fn into_route(self, start: &str, end: &str) -> Result<Route, RouteProviderError> {
        if !self.is_ok() {
            return Err(status_error(&self.info, start, end));
        }
        let body = self.route.ok_or_else(|| parse_error("response has no route"))?;
        let distance = body
            .distance
            .ok_or_else(|| parse_error("route has no distance"))?;
        let polyline = decode_shape(body.shape.unwrap_or_default().shape_points)?;

        let first = body.locations.first().map(|l| Coord::from(l.lat_lng));
        let last = body.locations.last().map(|l| Coord::from(l.lat_lng));
        let origin = first
            .or_else(|| polyline.first().copied())
            .ok_or_else(|| parse_error("route has no start location"))?;
        let destination = last
            .or_else(|| polyline.last().copied())
            .ok_or_else(|| parse_error("route has no end location"))?;

        Route::new(polyline, distance, origin, destination).map_err(|err| {
            RouteProviderError::Parse {
                message: err.to_string(),
            }
        })
    }
}

fn parse_error(message: &str) -> RouteProviderError {
    RouteProviderError::Parse {
        message: message.to_owned(),
    }
}

fn decode_shape(points: Vec<f64>) -> Result<Vec<Coord<f64>>, RouteProviderError> {
    let pairs = points.chunks_exact(2);
    if !pairs.remainder().is_empty() {
        return Err(parse_error("shape has an odd number of values"));
    }
    Ok(pairs
        .filter_map(|pair| match pair {
            [lat, lng] => Some(Coord { x: *lng, y: *lat }),
            _ => None,
        })
        .collect())
}

fn status_error(info: &Info, start: &str, end: &str) -> RouteProviderError {
    let message = if info.messages.is_empty() {
        format!("MapQuest status {}", info.statuscode)
    } else {
        info.messages.join(", ")
    };
    match info.statuscode {
        // 400 bad input, 402 unroutable location, 610 ambiguous, 611/612 missing or invalid.
        400 | 402 | 610..=612 => RouteProviderError::InvalidLocation { message },
        602 => RouteProviderError::NoRouteFound {
            start: start.to_owned(),
            end: end.to_owned(),
        },
        _ => RouteProviderError::ProviderUnavailable { message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuelwise_core::RouteFailureKind;
    use rstest::rstest;

    fn decode(json: &str) -> DirectionsResponse {
        serde_json::from_str(json).expect("should deserialise")
    }

    #[rstest]
    fn converts_successful_response() {
        let response = decode(
            r#"{
                "info": {"statuscode": 0, "messages": []},
                "route": {
                    "distance": 195.3,
                    "shape": {"shapePoints": [30.27, -97.74, 31.55, -97.15, 32.78, -96.80]},
                    "locations": [
                        {"latLng": {"lat": 30.2672, "lng": -97.7431}},
                        {"latLng": {"lat": 32.7767, "lng": -96.797}}
                    ]
                }
            }"#,
        );

        let route = response.into_route("Austin, TX", "Dallas, TX").expect("route");

        assert_eq!(route.total_distance_miles(), 195.3);
        assert_eq!(
            route.polyline().first(),
            Some(&Coord { x: -97.74, y: 30.27 })
        );
        assert_eq!(route.polyline().len(), 3);
        assert_eq!(route.start(), Coord { x: -97.7431, y: 30.2672 });
        assert_eq!(route.end(), Coord { x: -96.797, y: 32.7767 });
    }

    #[rstest]
    fn falls_back_to_shape_ends_without_locations() {
        let response = decode(
            r#"{
                "info": {"statuscode": 0},
                "route": {"distance": 10.0, "shape": {"shapePoints": [30.0, -97.0, 30.1, -97.1]}}
            }"#,
        );

        let route = response.into_route("a", "b").expect("route");

        assert_eq!(route.start(), Coord { x: -97.0, y: 30.0 });
        assert_eq!(route.end(), Coord { x: -97.1, y: 30.1 });
    }

    #[rstest]
    #[case(402, RouteFailureKind::InvalidLocation)]
    #[case(612, RouteFailureKind::InvalidLocation)]
    #[case(602, RouteFailureKind::NoRouteFound)]
    #[case(500, RouteFailureKind::ProviderUnavailable)]
    fn maps_status_codes(#[case] status: i64, #[case] kind: RouteFailureKind) {
        let response = decode(&format!(
            r#"{{"info": {{"statuscode": {status}, "messages": ["rejected"]}}, "route": {{}}}}"#
        ));

        let err = response
            .into_route("Nowhere", "Dallas, TX")
            .expect_err("should fail");

        assert_eq!(err.kind(), kind);
    }

    #[rstest]
    fn joins_status_messages() {
        let response = decode(
            r#"{"info": {"statuscode": 400, "messages": ["Illegal argument", "bad from"]}}"#,
        );

        let err = response.into_route("", "x").expect_err("should fail");

        assert_eq!(err.to_string(), "invalid location: Illegal argument, bad from");
    }

    #[rstest]
    #[case(r#"{"info": {"statuscode": 0}}"#)]
    #[case(r#"{"info": {"statuscode": 0}, "route": {"shape": {"shapePoints": []}}}"#)]
    #[case(r#"{"info": {"statuscode": 0}, "route": {"distance": 5.0, "shape": {"shapePoints": [30.0]}}}"#)]
    #[case(r#"{"info": {"statuscode": 0}, "route": {"distance": 5.0}}"#)]
    fn rejects_malformed_routes(#[case] json: &str) {
        let err = decode(json).into_route("a", "b").expect_err("should fail");

        assert!(matches!(err, RouteProviderError::Parse { .. }), "{err:?}");
    }
}
