//! Common ID Types
//!
//! Type-safe UUID wrappers so a student id can never be passed where a
//! class id is expected.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

/// Generic typed ID wrapper
///
/// ```
/// use kernel::id::{Id, markers};
/// type StudentId = Id<markers::Student>;
/// let id = StudentId::new();
/// assert_eq!(id.as_uuid().get_version_num(), 4);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: Uuid,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Create a new random ID (UUID v4)
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            value: uuid,
            _marker: PhantomData,
        }
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.value
    }

    pub fn into_uuid(self) -> Uuid {
        self.value
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> FromStr for Id<T> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self::from_uuid)
    }
}

impl<T> From<Uuid> for Id<T> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<T> From<Id<T>> for Uuid {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Marker types for different entity IDs
pub mod markers {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AttendanceSession;

    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Class;

    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Student;

    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Enrollment;

    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AttendanceRecord;
}

pub type AttendanceSessionId = Id<markers::AttendanceSession>;
pub type ClassId = Id<markers::Class>;
pub type StudentId = Id<markers::Student>;
pub type EnrollmentId = Id<markers::Enrollment>;
pub type AttendanceRecordId = Id<markers::AttendanceRecord>;
