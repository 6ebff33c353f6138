//! Presentation Layer
//!
//! HTTP handlers, DTOs and the identity middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod reported_location;
pub mod router;
