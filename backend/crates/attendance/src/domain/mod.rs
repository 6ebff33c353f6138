//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (AttendanceSession, Enrollment, AttendanceRecord)
//! - Domain value objects (SessionToken, GeoPoint, Geofence, DeviceInfo)
//! - Domain services (great-circle distance, geofence decision)
//! - Repository traits and the geolocation provider trait (interfaces)

pub mod entities;
pub mod geolocation;
pub mod repository;
pub mod services;
pub mod value_objects;
