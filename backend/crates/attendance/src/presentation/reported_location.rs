//! Client-reported location
//!
//! Browser geolocation runs on the device, so over HTTP the "provider" is
//! whatever fix (or failure code) the client put in the scan request.

use crate::domain::geolocation::{LocationError, LocationProvider, LocationRequest};
use crate::domain::value_objects::GeoPoint;
use crate::presentation::dto::ScanRequest;

/// Location provider backed by the scan request body
///
/// The fix was taken before the request arrived, so the [`LocationRequest`]
/// cannot be applied here. The client is responsible for asking for a fresh,
/// high-accuracy fix within the configured timeout; a location rejection
/// carries those parameters back (see
/// [`AttendanceError::into_scan_response`](crate::error::AttendanceError::into_scan_response)).
#[derive(Debug, Clone, Copy)]
pub struct ReportedLocation {
    reported: Result<GeoPoint, LocationError>,
}

impl ReportedLocation {
    pub fn from_request(req: &ScanRequest) -> Self {
        let reported = match (req.location, req.location_error) {
            (_, Some(err)) => Err(err.into()),
            (Some(loc), None) => GeoPoint::new(loc.latitude, loc.longitude)
                .ok_or(LocationError::PositionUnavailable),
            (None, None) => Err(LocationError::PositionUnavailable),
        };
        Self { reported }
    }
}

impl LocationProvider for ReportedLocation {
    async fn current_position(&self, _request: &LocationRequest) -> Result<GeoPoint, LocationError> {
        self.reported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: &str) -> ScanRequest {
        serde_json::from_str(body).unwrap()
    }

    #[tokio::test]
    async fn test_reported_fix_is_returned() {
        let provider = ReportedLocation::from_request(&request(
            r#"{"payload":"x","location":{"latitude":10.0,"longitude":20.0}}"#,
        ));
        let point = provider
            .current_position(&LocationRequest::default())
            .await
            .unwrap();
        assert_eq!(point.latitude(), 10.0);
        assert_eq!(point.longitude(), 20.0);
    }

    #[tokio::test]
    async fn test_error_code_wins_over_fix() {
        let provider = ReportedLocation::from_request(&request(
            r#"{"payload":"x","location":{"latitude":10.0,"longitude":20.0},"locationError":"TIMEOUT"}"#,
        ));
        assert_eq!(
            provider.current_position(&LocationRequest::default()).await,
            Err(LocationError::Timeout)
        );
    }

    #[tokio::test]
    async fn test_missing_or_invalid_fix_is_unavailable() {
        let missing = ReportedLocation::from_request(&request(r#"{"payload":"x"}"#));
        assert_eq!(
            missing.current_position(&LocationRequest::default()).await,
            Err(LocationError::PositionUnavailable)
        );

        let invalid = ReportedLocation::from_request(&request(
            r#"{"payload":"x","location":{"latitude":95.0,"longitude":0.0}}"#,
        ));
        assert_eq!(
            invalid.current_position(&LocationRequest::default()).await,
            Err(LocationError::PositionUnavailable)
        );
    }
}
