//! Client identification utilities
//!
//! Helpers for describing the calling device from HTTP headers.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Custom header a native client may use to describe itself more precisely
/// than its User-Agent (e.g. "Pixel 8; Android 15; app 2.3.1").
pub const DEVICE_INFO_HEADER: &str = "x-device-info";

/// Extract a free-form device descriptor from request headers
///
/// Prefers `X-Device-Info`, falls back to `User-Agent`. The value is
/// opaque and returned as sent; a blank header counts as absent.
pub fn extract_device_info(headers: &HeaderMap) -> Option<String> {
    [
        headers.get(DEVICE_INFO_HEADER),
        headers.get(header::USER_AGENT),
    ]
    .into_iter()
    .flatten()
    .filter_map(|v| v.to_str().ok())
    .find(|v| !v.trim().is_empty())
    .map(str::to_string)
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok())
        .or(direct_ip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_device_info_from_user_agent() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 (Linux; Android 14)"),
        );
        assert_eq!(
            extract_device_info(&headers),
            Some("Mozilla/5.0 (Linux; Android 14)".to_string())
        );
    }

    #[test]
    fn test_device_info_header_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static("okhttp/4.12"));
        headers.insert(DEVICE_INFO_HEADER, HeaderValue::from_static("Pixel 8; Android 15"));
        assert_eq!(
            extract_device_info(&headers),
            Some("Pixel 8; Android 15".to_string())
        );
    }

    #[test]
    fn test_device_info_missing() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_device_info(&headers), None);

        headers.insert(DEVICE_INFO_HEADER, HeaderValue::from_static("   "));
        assert_eq!(extract_device_info(&headers), None);
    }

    #[test]
    fn test_blank_device_header_falls_back_to_user_agent() {
        let mut headers = HeaderMap::new();
        headers.insert(DEVICE_INFO_HEADER, HeaderValue::from_static(" "));
        headers.insert(header::USER_AGENT, HeaderValue::from_static("okhttp/4.12"));
        assert_eq!(extract_device_info(&headers), Some("okhttp/4.12".to_string()));
    }

    #[test]
    fn test_extract_client_ip_xff() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("192.168.1.1, 10.0.0.1"),
        );

        let ip = extract_client_ip(&headers, None);
        assert_eq!(ip, Some("192.168.1.1".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_direct() {
        let headers = HeaderMap::new();
        let direct: IpAddr = "127.0.0.1".parse().unwrap();
        assert_eq!(extract_client_ip(&headers, Some(direct)), Some(direct));
    }
}
