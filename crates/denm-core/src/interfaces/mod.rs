// crates/denm-core/src/interfaces/mod.rs
// ============================================================================
// Module: DENM Interfaces
// Description: Host-facing contracts for vehicle data, time, and transport.
// Purpose: Define the boundary surfaces used by the dissemination runtime.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the dissemination core integrates with its host —
//! the vehicle-state provider, the scheduler's clock, the packet transport,
//! and reception monitoring — without embedding host specifics. Every call
//! is synchronous and returns; any real-time delay is the host scheduler's
//! responsibility.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::DataRequest;
use crate::core::Denm;
use crate::core::Timestamp;
use crate::core::VehicleState;

// ============================================================================
// SECTION: Vehicle Data Provider
// ============================================================================

/// Source of the station's kinematic state.
pub trait VehicleDataProvider {
    /// Returns one coherent snapshot of the current vehicle state.
    fn state(&self) -> VehicleState;
}

// ============================================================================
// SECTION: Clock
// ============================================================================

/// Host time reference.
///
/// The core never reads wall-clock time; simulated and real hosts supply
/// their own reference through this trait.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> Timestamp;
}

// ============================================================================
// SECTION: Transport
// ============================================================================

/// Transport errors for outgoing sends.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Transport rejected or failed to accept the request.
    #[error("transport request failed: {0}")]
    Request(String),
}

/// Packet transport accepting outgoing dissemination requests.
///
/// Radio-channel arbitration and everything below it live behind this
/// trait, outside the core.
pub trait DenmTransport {
    /// Hands one send request and its payload to the network stack.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the stack does not accept the
    /// request.
    fn request(&mut self, request: &DataRequest, payload: &Denm) -> Result<(), TransportError>;
}

// ============================================================================
// SECTION: Reception Listener
// ============================================================================

/// Observer of accepted notification receptions.
///
/// Fired exactly once per inbound notification that passes the self-origin
/// check, after it has been recorded in the notification memory. No further
/// contract binds consumers.
pub trait ReceptionListener {
    /// Observes one accepted reception.
    fn on_denm_received(&mut self, denm: &Denm);
}
