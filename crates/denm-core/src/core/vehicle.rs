// crates/denm-core/src/core/vehicle.rs
// ============================================================================
// Module: Vehicle State Snapshot
// Description: Read-only view of the station's kinematic state.
// Purpose: Carry one coherent position/speed/heading/time reading per tick.
// Dependencies: denm-units, crate::core::{identifiers, time}, serde
// ============================================================================

//! ## Overview
//! A [`VehicleState`] is one coherent snapshot produced by the host's vehicle
//! data provider. Use cases read it to decide whether origination conditions
//! are met; the message builder encodes it into the outgoing notification.
//! All protocol times for a send derive from the snapshot's `updated`
//! instant, so detection and reference time always agree.

// ============================================================================
// SECTION: Imports
// ============================================================================

use denm_units::GeoAngle;
use denm_units::Heading;
use denm_units::Speed;
use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::StationId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Vehicle State
// ============================================================================

/// One coherent reading of the station's dynamic state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// Station identifier of this vehicle.
    pub station_id: StationId,
    /// Instant the reading was taken; the clock reference for every
    /// protocol time derived from this snapshot.
    pub updated: Timestamp,
    /// Geographic latitude.
    pub latitude: GeoAngle,
    /// Geographic longitude.
    pub longitude: GeoAngle,
    /// Ground speed; the sign carries direction along the vehicle axis.
    pub speed: Speed,
    /// Heading in degrees, clockwise from north.
    pub heading: Heading,
}
