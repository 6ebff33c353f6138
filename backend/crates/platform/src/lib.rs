//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no business meaning:
//! - Cryptographic helpers (HMAC-SHA256, base64url, constant-time compare)
//! - Signed identity tokens issued by the authentication service
//! - Cookie and bearer token extraction
//! - Client identification from HTTP headers (IP, device descriptor)

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod identity;
