//! Type-safe identifiers for transit entities.
//!
//! Two families live here:
//!
//! - **Agency ids** (`RouteId`, `PathId`, `ServiceId`, `StationId`) are the
//!   integers printed on timetables and carried in interchange files. They are
//!   only unique within their scope (a path id within its route, a station id
//!   within its path) and the model never enforces that uniqueness.
//! - **Keys** (`RouteKey`, `PathKey`, `PointKey`, `ServiceKey`) are handles into
//!   the [`SystemObjects`](crate::system::SystemObjects) arena. They identify one
//!   entity instance and are never reused, so they stand in for object identity.

use std::fmt;

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(i32);

        impl $name {
            pub const fn new(value: i32) -> Self {
                Self(value)
            }

            pub const fn value(&self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

macro_rules! impl_key {
    ($name:ident, $prefix:literal) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            pub(crate) const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            pub const fn raw(&self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

impl_identifier!(RouteId);
impl_identifier!(PathId);
impl_identifier!(ServiceId);
impl_identifier!(StationId);

impl_key!(RouteKey, "route");
impl_key!(PathKey, "path");
impl_key!(PointKey, "point");
impl_key!(ServiceKey, "service");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_equality() {
        let id1 = RouteId::new(10);
        let id2 = RouteId::new(10);
        let id3 = id1;

        assert_eq!(id1, id2);
        assert_eq!(id1, id3);
        assert!(RouteId::new(4) < RouteId::new(10));
    }

    #[test]
    fn test_identifier_hash() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(StationId::new(100), 42);

        assert_eq!(map.get(&StationId::new(100)), Some(&42));
    }

    #[test]
    fn test_identifier_display() {
        assert_eq!(format!("{}", PathId::new(3)), "3");
        assert_eq!(format!("{}", PointKey::from_raw(7)), "point#7");
    }

    #[test]
    fn test_identifier_conversions() {
        let id: ServiceId = 5.into();
        let raw: i32 = id.into();
        assert_eq!(raw, 5);
    }
}
