// crates/denm-core/src/core/time.rs
// ============================================================================
// Module: DENM Time Model
// Description: Host-supplied timestamps and the ITS epoch conversion.
// Purpose: Keep the core clock-free and encode protocol times explicitly.
// Dependencies: serde, thiserror, time
// ============================================================================

//! ## Overview
//! The dissemination core never reads wall-clock time; hosts supply every
//! instant through the [`crate::interfaces::Clock`] boundary. Protocol
//! timestamps (detection time, reference time) count TAI milliseconds since
//! the ITS epoch, 2004-01-01T00:00:00Z, and are derived from host timestamps
//! only at the message-building boundary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use time::macros::datetime;

// ============================================================================
// SECTION: Epoch Constants
// ============================================================================

/// The ITS epoch: 2004-01-01T00:00:00Z.
const ITS_EPOCH: OffsetDateTime = datetime!(2004-01-01 00:00:00 UTC);

/// The ITS epoch in Unix milliseconds.
const ITS_EPOCH_UNIX_MILLIS: i64 = ITS_EPOCH.unix_timestamp() * 1000;

/// Leap seconds inserted between the ITS epoch and 2017-01-01, the last
/// insertion to date. ITS timestamps count TAI milliseconds, so the delta is
/// added on conversion from Unix (UTC) time.
const LEAP_SECONDS_SINCE_ITS_EPOCH: i64 = 5;

// ============================================================================
// SECTION: Time Error
// ============================================================================

/// Timestamp conversion errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimeError {
    /// Timestamp predates the ITS epoch and has no protocol representation.
    /// A vehicle-state snapshot from before 2004 is a contract violation by
    /// the time source, not a runtime condition.
    #[error("timestamp {0} predates the ITS epoch")]
    BeforeItsEpoch(i64),
}

// ============================================================================
// SECTION: Host Timestamp
// ============================================================================

/// Host-supplied instant in Unix milliseconds.
///
/// # Invariants
/// - Values are explicitly provided by the host clock; the core never reads
///   wall-clock time. Monotonicity is a host responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from Unix milliseconds.
    #[must_use]
    pub const fn from_unix_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the timestamp as Unix milliseconds.
    #[must_use]
    pub const fn as_unix_millis(&self) -> i64 {
        self.0
    }

    /// Returns the age of `earlier` relative to this instant in
    /// milliseconds, saturating to zero when `earlier` is in the future.
    #[must_use]
    pub const fn saturating_age_since(&self, earlier: Self) -> u64 {
        let delta = self.0.saturating_sub(earlier.0);
        if delta < 0 { 0 } else { delta as u64 }
    }

    /// Converts the timestamp to protocol time.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::BeforeItsEpoch`] when the instant predates the
    /// ITS epoch.
    pub const fn to_its(self) -> Result<ItsTimestamp, TimeError> {
        let tai_delta = self.0 - ITS_EPOCH_UNIX_MILLIS + LEAP_SECONDS_SINCE_ITS_EPOCH * 1000;
        if tai_delta < 0 {
            return Err(TimeError::BeforeItsEpoch(self.0));
        }
        Ok(ItsTimestamp(tai_delta as u64))
    }
}

// ============================================================================
// SECTION: Protocol Timestamp
// ============================================================================

/// TAI milliseconds since the ITS epoch.
///
/// This is the wire representation of detection and reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItsTimestamp(u64);

impl ItsTimestamp {
    /// Creates a protocol timestamp from raw ITS milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Returns the raw ITS milliseconds.
    #[must_use]
    pub const fn as_millis(&self) -> u64 {
        self.0
    }
}
