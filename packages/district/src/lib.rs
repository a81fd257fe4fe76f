#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! District coordinate registry.
//!
//! The set of districts is closed and fixed at compile time. Names are
//! matched exactly (case-sensitive) and listed in the registry's own
//! south-to-north order, which is also the order exposed to clients.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// A geographic point in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

/// One of the fourteen districts of Kerala.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum District {
    Thiruvananthapuram,
    Kollam,
    Pathanamthitta,
    Alappuzha,
    Kottayam,
    Idukki,
    Ernakulam,
    Thrissur,
    Palakkad,
    Malappuram,
    Kozhikode,
    Wayanad,
    Kannur,
    Kasaragod,
}

/// Returned when a name does not match any registered district.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown district: {name}")]
pub struct UnknownDistrictError {
    /// The name that failed to resolve.
    pub name: String,
}

impl District {
    /// Every district, in registry order.
    pub const ALL: &'static [Self] = &[
        Self::Thiruvananthapuram,
        Self::Kollam,
        Self::Pathanamthitta,
        Self::Alappuzha,
        Self::Kottayam,
        Self::Idukki,
        Self::Ernakulam,
        Self::Thrissur,
        Self::Palakkad,
        Self::Malappuram,
        Self::Kozhikode,
        Self::Wayanad,
        Self::Kannur,
        Self::Kasaragod,
    ];

    /// Returns the district's reference coordinates.
    #[must_use]
    pub const fn coordinates(self) -> Coordinates {
        let (latitude, longitude) = match self {
            Self::Thiruvananthapuram => (8.5241, 76.9366),
            Self::Kollam => (8.8932, 76.6141),
            Self::Pathanamthitta => (9.2648, 76.7870),
            Self::Alappuzha => (9.4981, 76.3388),
            Self::Kottayam => (9.5916, 76.5222),
            Self::Idukki => (9.8497, 76.9744),
            Self::Ernakulam => (9.9816, 76.2999),
            Self::Thrissur => (10.5276, 76.2144),
            Self::Palakkad => (10.7867, 76.6548),
            Self::Malappuram => (11.0510, 76.0711),
            Self::Kozhikode => (11.2588, 75.7804),
            Self::Wayanad => (11.6854, 76.1320),
            Self::Kannur => (11.8745, 75.3704),
            Self::Kasaragod => (12.5102, 74.9852),
        };

        Coordinates {
            latitude,
            longitude,
        }
    }

    /// Resolves a district by its exact name.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownDistrictError`] if `name` is not a registered
    /// district. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Result<Self, UnknownDistrictError> {
        name.parse().map_err(|_| UnknownDistrictError {
            name: name.to_string(),
        })
    }
}

/// Looks up the coordinates of the district called `name`.
///
/// # Errors
///
/// Returns [`UnknownDistrictError`] if `name` is not a registered district.
pub fn lookup(name: &str) -> Result<Coordinates, UnknownDistrictError> {
    District::from_name(name).map(District::coordinates)
}

/// Returns all district names in registry order.
#[must_use]
pub fn names() -> Vec<&'static str> {
    District::ALL.iter().map(AsRef::as_ref).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_fourteen_districts() {
        assert_eq!(District::ALL.len(), 14);
        assert_eq!(names().len(), 14);
    }

    #[test]
    fn names_keep_registry_order() {
        let names = names();
        assert_eq!(names.first(), Some(&"Thiruvananthapuram"));
        assert_eq!(names.get(1), Some(&"Kollam"));
        assert_eq!(names.last(), Some(&"Kasaragod"));

        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_ne!(names, sorted, "names should not be alphabetical");
    }

    #[test]
    fn name_roundtrip() {
        for district in District::ALL {
            let name = district.to_string();
            assert_eq!(District::from_name(&name), Ok(*district));
        }
    }

    #[test]
    fn lookup_known_district() {
        let coords = lookup("Ernakulam").unwrap();
        assert!((coords.latitude - 9.9816).abs() < f64::EPSILON);
        assert!((coords.longitude - 76.2999).abs() < f64::EPSILON);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(lookup("ernakulam").is_err());
        assert!(lookup("ERNAKULAM").is_err());
        assert!(lookup(" Ernakulam").is_err());
    }

    #[test]
    fn lookup_unknown_district() {
        let err = lookup("UnknownPlace").unwrap_err();
        assert_eq!(err.name, "UnknownPlace");
        assert!(lookup("").is_err());
    }

    #[test]
    fn coordinates_inside_kerala() {
        for district in District::ALL {
            let c = district.coordinates();
            assert!((8.0..=13.0).contains(&c.latitude), "{district} latitude");
            assert!((74.5..=77.5).contains(&c.longitude), "{district} longitude");
        }
    }

    #[test]
    fn serializes_as_plain_name() {
        let json = serde_json::to_string(&District::Wayanad).unwrap();
        assert_eq!(json, "\"Wayanad\"");
    }
}
