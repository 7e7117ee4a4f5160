// crates/denm-units/src/quantity.rs
// ============================================================================
// Module: Domain Quantities
// Description: SI-unit newtypes for the physical values carried by DENMs.
// Purpose: Give position, speed, and heading values distinct types.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Quantities are plain floating-point values wrapped in unit-bearing
//! newtypes. All constructors and accessors name their unit explicitly so a
//! reading in the wrong unit cannot flow into the wire codec unnoticed.
//! A missing reading is `Option<T>` at this level; sentinel integers exist
//! only inside [`crate::wire`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Quantity Types
// ============================================================================

/// Ground speed in meters per second.
///
/// The sign carries the direction of travel along the vehicle axis; the wire
/// format encodes magnitude only, with direction carried by the heading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Speed(f64);

impl Speed {
    /// Creates a speed from meters per second.
    #[must_use]
    pub const fn from_mps(mps: f64) -> Self {
        Self(mps)
    }

    /// Returns the speed in meters per second.
    #[must_use]
    pub const fn as_mps(&self) -> f64 {
        self.0
    }
}

/// Heading in degrees, clockwise from north.
///
/// Values outside [0°, 360°) are accepted and normalized by the wire codec.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Heading(f64);

impl Heading {
    /// Creates a heading from degrees clockwise from north.
    #[must_use]
    pub const fn from_degrees(degrees: f64) -> Self {
        Self(degrees)
    }

    /// Returns the heading in degrees.
    #[must_use]
    pub const fn as_degrees(&self) -> f64 {
        self.0
    }
}

/// Geographic angle in degrees (latitude or longitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeoAngle(f64);

impl GeoAngle {
    /// Creates a geographic angle from degrees.
    #[must_use]
    pub const fn from_degrees(degrees: f64) -> Self {
        Self(degrees)
    }

    /// Returns the angle in degrees.
    #[must_use]
    pub const fn as_degrees(&self) -> f64 {
        self.0
    }
}

/// Altitude above the WGS84 ellipsoid in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AltitudeMeters(f64);

impl AltitudeMeters {
    /// Creates an altitude from meters.
    #[must_use]
    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    /// Returns the altitude in meters.
    #[must_use]
    pub const fn as_meters(&self) -> f64 {
        self.0
    }
}
