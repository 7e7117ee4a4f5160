// crates/denm-core/src/core/identifiers.rs
// ============================================================================
// Module: DENM Identifiers
// Description: Station, sequence, and action identifiers for notifications.
// Purpose: Provide strongly typed keys with deterministic ordering.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the identifiers that key DENM dissemination state.
//! An action identifier pairs the originating station with a per-station
//! sequence number; together they name one hazard notification uniquely for
//! deduplication across every station that relays it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Station Identifier
// ============================================================================

/// ITS station identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(u32);

impl StationId {
    /// Creates a new station identifier.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw station identifier.
    #[must_use]
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Sequence Number
// ============================================================================

/// Per-station DENM sequence number.
///
/// Assigned by the originating station, monotonically increasing per station
/// but not globally ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceNumber(u16);

impl SequenceNumber {
    /// Creates a sequence number from its wire value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the wire value.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Action Identifier
// ============================================================================

/// Unique identity of one hazard notification.
///
/// Immutable once created; the sole key of the notification memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActionId {
    /// Station that originated the notification.
    pub station_id: StationId,
    /// Sequence number assigned by the originating station.
    pub sequence_number: SequenceNumber,
}

impl ActionId {
    /// Creates a new action identifier.
    #[must_use]
    pub const fn new(station_id: StationId, sequence_number: SequenceNumber) -> Self {
        Self {
            station_id,
            sequence_number,
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.station_id, self.sequence_number)
    }
}

// ============================================================================
// SECTION: Sequence Counter
// ============================================================================

/// Session-scoped monotonic sequence counter.
///
/// Owned by the orchestrator; its sole consumer is the message builder when
/// constructing an outgoing notification. Never reset during a session. The
/// counter pre-increments, so the first outgoing message carries sequence
/// number 1; it wraps modulo 2^16 with the wire field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SequenceCounter {
    /// Last assigned sequence value.
    last: u16,
}

impl SequenceCounter {
    /// Creates a counter whose first assigned value is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: 0,
        }
    }

    /// Assigns and returns the next sequence number.
    pub const fn next(&mut self) -> SequenceNumber {
        self.last = self.last.wrapping_add(1);
        SequenceNumber::new(self.last)
    }
}
