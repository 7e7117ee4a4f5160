// crates/denm-units/src/wire.rs
// ============================================================================
// Module: Fixed-Point Wire Codec
// Description: Deterministic conversion of SI quantities to protocol fields.
// Purpose: Scale, round, and range-check values; map absence to sentinels.
// Dependencies: crate::quantity, serde, thiserror
// ============================================================================

//! ## Overview
//! Every DENM wire field is a fixed-precision integer with a defined unit
//! scale and an "unavailable" sentinel. Encoding is deterministic: one
//! rounding rule (round half away from zero) for every field, `None` maps to
//! the field sentinel, and an out-of-range input is rejected rather than
//! truncated — it indicates a vehicle-state reading outside the physically
//! expected range, which is a contract violation, not a runtime condition.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::quantity::AltitudeMeters;
use crate::quantity::GeoAngle;
use crate::quantity::Heading;
use crate::quantity::Speed;

// ============================================================================
// SECTION: Sentinels
// ============================================================================

/// Longitude sentinel in tenth-of-microdegree units.
pub const LONGITUDE_UNAVAILABLE: i32 = 1_800_000_001;

/// Latitude sentinel in tenth-of-microdegree units.
pub const LATITUDE_UNAVAILABLE: i32 = 900_000_001;

/// Speed sentinel in centimeters per second.
pub const SPEED_UNAVAILABLE: u16 = 16383;

/// Heading sentinel in decidegrees.
pub const HEADING_UNAVAILABLE: u16 = 3601;

/// Altitude sentinel in centimeters.
pub const ALTITUDE_UNAVAILABLE: i32 = 800_001;

/// Altitude confidence sentinel (enumerated discriminant).
pub const ALTITUDE_CONFIDENCE_UNAVAILABLE: u8 = 15;

/// Position confidence ellipse semi-axis sentinel in centimeters.
pub const SEMI_AXIS_LENGTH_UNAVAILABLE: u16 = 4095;

/// Speed confidence sentinel in centimeters per second.
pub const SPEED_CONFIDENCE_UNAVAILABLE: u8 = 127;

/// Heading confidence sentinel in decidegrees.
pub const HEADING_CONFIDENCE_UNAVAILABLE: u8 = 127;

// ============================================================================
// SECTION: Field Ranges
// ============================================================================

/// Valid longitude range in microdegrees (±180°).
const LONGITUDE_MICRODEGREE_RANGE: (i64, i64) = (-180_000_000, 180_000_000);

/// Valid latitude range in microdegrees (±90°).
const LATITUDE_MICRODEGREE_RANGE: (i64, i64) = (-90_000_000, 90_000_000);

/// Valid speed magnitude range in centimeters per second.
const SPEED_CM_PER_SEC_RANGE: (i64, i64) = (0, 16382);

/// Valid heading range in decidegrees after normalization.
const HEADING_DECIDEGREE_RANGE: (i64, i64) = (0, 3600);

/// Valid altitude range in centimeters.
const ALTITUDE_CM_RANGE: (i64, i64) = (-100_000, 800_000);

// ============================================================================
// SECTION: Encode Error
// ============================================================================

/// Fixed-point encoding errors.
///
/// An out-of-range value is a contract violation between the vehicle-state
/// provider and the message builder; callers must treat it as fatal rather
/// than truncate or clamp.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// Quantity cannot be represented in its fixed-point field.
    #[error("value {value} out of range for wire field {field}")]
    OutOfRange {
        /// Wire field name.
        field: &'static str,
        /// Offending value in the field's source unit.
        value: f64,
    },
}

// ============================================================================
// SECTION: Rounding
// ============================================================================

/// Scales a value and rounds to the nearest integer, half away from zero.
///
/// Half-away-from-zero is the single rounding rule for every wire field,
/// matching `f64::round`.
fn scale_rounded(
    value: f64,
    scale: f64,
    field: &'static str,
    range: (i64, i64),
) -> Result<i64, EncodeError> {
    let scaled = (value * scale).round();
    #[allow(
        clippy::cast_precision_loss,
        reason = "Range bounds are far below 2^53 and convert exactly."
    )]
    let in_range = scaled.is_finite() && scaled >= range.0 as f64 && scaled <= range.1 as f64;
    if !in_range {
        return Err(EncodeError::OutOfRange {
            field,
            value,
        });
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Bounded by the preceding range check."
    )]
    let rounded = scaled as i64;
    Ok(rounded)
}

/// Narrows an in-range intermediate value to the wire integer width.
#[allow(
    clippy::cast_precision_loss,
    reason = "The cast is only reached on a narrowing failure, for error reporting."
)]
fn narrow<T: TryFrom<i64>>(value: i64, field: &'static str) -> Result<T, EncodeError> {
    T::try_from(value).map_err(|_| EncodeError::OutOfRange {
        field,
        value: value as f64,
    })
}

// ============================================================================
// SECTION: Encode Functions
// ============================================================================

/// Encodes a longitude into tenth-of-microdegree units.
///
/// The angle is rounded to whole microdegrees first and then scaled by ten,
/// so the wire value is always a multiple of ten. `None` encodes as
/// [`LONGITUDE_UNAVAILABLE`].
///
/// # Errors
///
/// Returns [`EncodeError::OutOfRange`] when the angle exceeds ±180°.
pub fn encode_longitude(longitude: Option<GeoAngle>) -> Result<i32, EncodeError> {
    let Some(angle) = longitude else {
        return Ok(LONGITUDE_UNAVAILABLE);
    };
    let microdegrees = scale_rounded(
        angle.as_degrees(),
        1_000_000.0,
        "longitude",
        LONGITUDE_MICRODEGREE_RANGE,
    )?;
    narrow(microdegrees * 10, "longitude")
}

/// Encodes a latitude into tenth-of-microdegree units.
///
/// Same scaling as [`encode_longitude`]; `None` encodes as
/// [`LATITUDE_UNAVAILABLE`].
///
/// # Errors
///
/// Returns [`EncodeError::OutOfRange`] when the angle exceeds ±90°.
pub fn encode_latitude(latitude: Option<GeoAngle>) -> Result<i32, EncodeError> {
    let Some(angle) = latitude else {
        return Ok(LATITUDE_UNAVAILABLE);
    };
    let microdegrees = scale_rounded(
        angle.as_degrees(),
        1_000_000.0,
        "latitude",
        LATITUDE_MICRODEGREE_RANGE,
    )?;
    narrow(microdegrees * 10, "latitude")
}

/// Encodes a speed magnitude into centimeters per second.
///
/// The wire field is unsigned magnitude only: the absolute value is encoded
/// and direction, if needed, is carried by the heading field. `None` encodes
/// as [`SPEED_UNAVAILABLE`].
///
/// # Errors
///
/// Returns [`EncodeError::OutOfRange`] when the magnitude exceeds
/// 163.82 m/s.
pub fn encode_speed(speed: Option<Speed>) -> Result<u16, EncodeError> {
    let Some(speed) = speed else {
        return Ok(SPEED_UNAVAILABLE);
    };
    let cm_per_sec = scale_rounded(
        speed.as_mps().abs(),
        100.0,
        "eventSpeed",
        SPEED_CM_PER_SEC_RANGE,
    )?;
    narrow(cm_per_sec, "eventSpeed")
}

/// Encodes a heading into decidegrees.
///
/// The input is normalized into [0°, 360°) before scaling, so any finite
/// heading encodes; a rounded value of 3600 wraps back to 0. `None` encodes
/// as [`HEADING_UNAVAILABLE`].
///
/// # Errors
///
/// Returns [`EncodeError::OutOfRange`] when the heading is not finite.
pub fn encode_heading(heading: Option<Heading>) -> Result<u16, EncodeError> {
    let Some(heading) = heading else {
        return Ok(HEADING_UNAVAILABLE);
    };
    let degrees = heading.as_degrees();
    if !degrees.is_finite() {
        return Err(EncodeError::OutOfRange {
            field: "heading",
            value: degrees,
        });
    }
    let decidegrees = scale_rounded(
        degrees.rem_euclid(360.0),
        10.0,
        "heading",
        HEADING_DECIDEGREE_RANGE,
    )?;
    let wrapped = if decidegrees == 3600 { 0 } else { decidegrees };
    narrow(wrapped, "heading")
}

/// Encodes an altitude into centimeters.
///
/// `None` encodes as [`ALTITUDE_UNAVAILABLE`].
///
/// # Errors
///
/// Returns [`EncodeError::OutOfRange`] when the altitude is outside
/// −1000 m..=8000 m.
pub fn encode_altitude(altitude: Option<AltitudeMeters>) -> Result<i32, EncodeError> {
    let Some(altitude) = altitude else {
        return Ok(ALTITUDE_UNAVAILABLE);
    };
    let centimeters =
        scale_rounded(altitude.as_meters(), 100.0, "altitude", ALTITUDE_CM_RANGE)?;
    narrow(centimeters, "altitude")
}
