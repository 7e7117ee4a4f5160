// crates/denm-core/src/core/request.rs
// ============================================================================
// Module: Transport Boundary Objects
// Description: Outbound send parameters and the inbound packet wrapper.
// Purpose: Describe what crosses the transport boundary in either direction.
// Dependencies: crate::core::message, serde
// ============================================================================

//! ## Overview
//! For every outgoing send the orchestrator hands the transport a
//! [`DataRequest`] describing where and how to disseminate, plus the message
//! body itself. Inbound traffic arrives as an [`UpPacket`]: either a decoded
//! DENM or an unrecognized payload, which the orchestrator drops silently —
//! hostile or corrupted radio input is expected, not exceptional.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::message::Denm;

// ============================================================================
// SECTION: Protocol Constants
// ============================================================================

/// Registered transport-layer destination port for DENMs.
pub const DENM_DESTINATION_PORT: u16 = 2002;

/// Registered ITS application identifier for decentralized environmental
/// notifications.
pub const DEN_ITS_AID: u32 = 37;

// ============================================================================
// SECTION: Request Parameters
// ============================================================================

/// Packet transport type requested from the network layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportType {
    /// Broadcast to every station inside a geographic destination area.
    GeoBroadcast,
    /// Broadcast to direct neighbors only, without forwarding.
    SingleHopBroadcast,
}

/// Named communication profile selecting the access technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationProfile {
    /// No preference; the network layer chooses.
    Unspecified,
    /// ITS-G5 ad-hoc radio.
    ItsG5,
}

/// Network-layer traffic class, lower is more urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrafficClass(u8);

impl TrafficClass {
    /// Creates a traffic class from its identifier.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Returns the traffic class identifier.
    #[must_use]
    pub const fn id(&self) -> u8 {
        self.0
    }
}

/// Repetition policy for an outgoing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repetition {
    /// Interval between repeated transmissions in milliseconds.
    pub interval_ms: u32,
    /// Total repetition span in milliseconds.
    pub maximum_ms: u32,
}

/// Transport-layer parameters for one outgoing send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRequest {
    /// Destination service port.
    pub destination_port: u16,
    /// ITS application identifier.
    pub its_aid: u32,
    /// Requested transport type.
    pub transport_type: TransportType,
    /// Requested communication profile.
    pub communication_profile: CommunicationProfile,
    /// Urgency class supplied by the firing use case.
    pub traffic_class: TrafficClass,
    /// Repetition policy supplied by the firing use case.
    pub repetition: Option<Repetition>,
}

// ============================================================================
// SECTION: Inbound Packet
// ============================================================================

/// Inbound packet at the protocol-object boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpPacket {
    /// Payload decoded to a well-formed DENM.
    Denm(Box<Denm>),
    /// Payload that failed to decode to the expected notification type.
    Unrecognized,
}
