// crates/denm-units/src/lib.rs
// ============================================================================
// Module: DENM Units Library
// Description: Physical quantities and fixed-point wire encoding for DENMs.
// Purpose: Keep SI-unit domain values and integer protocol fields apart.
// Dependencies: crate::{quantity, wire}
// ============================================================================

//! ## Overview
//! DENM protocol fields carry fixed-precision integers with explicit unit
//! scaling and "unavailable" sentinel values. This crate holds the domain
//! quantities as SI floating-point newtypes and converts them to wire
//! integers only at the encoding boundary, so internal logic never confuses
//! "unavailable" with a real zero.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod quantity;
pub mod wire;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use quantity::AltitudeMeters;
pub use quantity::GeoAngle;
pub use quantity::Heading;
pub use quantity::Speed;
pub use wire::ALTITUDE_CONFIDENCE_UNAVAILABLE;
pub use wire::ALTITUDE_UNAVAILABLE;
pub use wire::HEADING_CONFIDENCE_UNAVAILABLE;
pub use wire::HEADING_UNAVAILABLE;
pub use wire::LATITUDE_UNAVAILABLE;
pub use wire::LONGITUDE_UNAVAILABLE;
pub use wire::SEMI_AXIS_LENGTH_UNAVAILABLE;
pub use wire::SPEED_CONFIDENCE_UNAVAILABLE;
pub use wire::SPEED_UNAVAILABLE;
pub use wire::EncodeError;
pub use wire::encode_altitude;
pub use wire::encode_heading;
pub use wire::encode_latitude;
pub use wire::encode_longitude;
pub use wire::encode_speed;
