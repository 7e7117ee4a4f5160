// crates/denm-core/src/core/message.rs
// ============================================================================
// Module: DENM Protocol Object
// Description: Decoded Decentralized Environmental Notification Message.
// Purpose: Represent the message body above the packet-parsing boundary.
// Dependencies: denm-units, crate::core::{identifiers, time}, serde
// ============================================================================

//! ## Overview
//! The [`Denm`] structure is the protocol object exchanged at the service
//! boundary: inbound packets arrive already decoded to this level, and the
//! message builder produces it for outgoing sends. Position, speed, and
//! heading fields hold wire-scaled integers (see `denm_units::wire`);
//! discrete protocol values are closed enums, so an undefined discriminant is
//! unrepresentable above the parsing boundary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use denm_units::ALTITUDE_CONFIDENCE_UNAVAILABLE;
use denm_units::ALTITUDE_UNAVAILABLE;
use denm_units::HEADING_UNAVAILABLE;
use denm_units::SEMI_AXIS_LENGTH_UNAVAILABLE;
use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ActionId;
use crate::core::identifiers::StationId;
use crate::core::time::ItsTimestamp;

// ============================================================================
// SECTION: PDU Header
// ============================================================================

/// Protocol version stamped into every outgoing header.
pub const DENM_PROTOCOL_VERSION: u8 = 1;

/// Message type identifier of the ITS PDU header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageId {
    /// Decentralized Environmental Notification Message.
    Denm,
}

impl MessageId {
    /// Returns the wire discriminant.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Denm => 1,
        }
    }
}

/// Common ITS PDU header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItsPduHeader {
    /// Protocol version.
    pub protocol_version: u8,
    /// Message type identifier.
    pub message_id: MessageId,
    /// Station that transmitted this message.
    pub station_id: StationId,
}

// ============================================================================
// SECTION: Position Fields
// ============================================================================

/// Position confidence ellipse in wire units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionConfidenceEllipse {
    /// Semi-major axis confidence in centimeters.
    pub semi_major_confidence: u16,
    /// Semi-minor axis confidence in centimeters.
    pub semi_minor_confidence: u16,
    /// Semi-major axis orientation in decidegrees.
    pub semi_major_orientation: u16,
}

impl Default for PositionConfidenceEllipse {
    fn default() -> Self {
        Self {
            semi_major_confidence: SEMI_AXIS_LENGTH_UNAVAILABLE,
            semi_minor_confidence: SEMI_AXIS_LENGTH_UNAVAILABLE,
            semi_major_orientation: HEADING_UNAVAILABLE,
        }
    }
}

/// Altitude in wire units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Altitude {
    /// Altitude value in centimeters.
    pub value: i32,
    /// Altitude confidence discriminant.
    pub confidence: u8,
}

impl Default for Altitude {
    fn default() -> Self {
        Self {
            value: ALTITUDE_UNAVAILABLE,
            confidence: ALTITUDE_CONFIDENCE_UNAVAILABLE,
        }
    }
}

/// Geographic event position in wire units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencePosition {
    /// Latitude in tenth-of-microdegree units.
    pub latitude: i32,
    /// Longitude in tenth-of-microdegree units.
    pub longitude: i32,
    /// Position confidence ellipse.
    pub position_confidence: PositionConfidenceEllipse,
    /// Altitude.
    pub altitude: Altitude,
}

// ============================================================================
// SECTION: Management Container
// ============================================================================

/// Management container of a DENM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagementContainer {
    /// Unique identity of the notified event.
    pub action_id: ActionId,
    /// Instant the event was detected.
    pub detection_time: ItsTimestamp,
    /// Instant this message revision was produced.
    pub reference_time: ItsTimestamp,
    /// Position of the notified event.
    pub event_position: ReferencePosition,
}

// ============================================================================
// SECTION: Situation Container
// ============================================================================

/// Cause of a notified event.
///
/// Closed set: only the causes this service originates or reacts to are
/// representable. Parsing below the protocol-object boundary maps anything
/// else to an unrecognized packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CauseCode {
    /// Traffic condition ahead (jam building up or stationary traffic).
    TrafficCondition,
    /// Dangerous end of queue.
    DangerousEndOfQueue,
    /// Collision risk.
    CollisionRisk,
}

impl CauseCode {
    /// Returns the wire discriminant.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::TrafficCondition => 1,
            Self::DangerousEndOfQueue => 27,
            Self::CollisionRisk => 97,
        }
    }
}

/// Event type of the situation container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    /// Event cause.
    pub cause: CauseCode,
    /// Cause-specific subcause discriminant.
    pub subcause: u8,
}

/// Situation container of a DENM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SituationContainer {
    /// Information quality, 0 (lowest) to 7 (highest).
    pub information_quality: u8,
    /// Notified event type.
    pub event_type: EventType,
}

// ============================================================================
// SECTION: Location Container
// ============================================================================

/// Speed field in wire units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedValue {
    /// Speed magnitude in centimeters per second.
    pub value: u16,
    /// Speed confidence in centimeters per second.
    pub confidence: u8,
}

/// Heading field in wire units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingValue {
    /// Heading in decidegrees, clockwise from north.
    pub value: u16,
    /// Heading confidence in decidegrees.
    pub confidence: u8,
}

/// One recorded waypoint of a path history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathPoint {
    /// Latitude offset from the event position in tenth-of-microdegree
    /// units.
    pub delta_latitude: i32,
    /// Longitude offset from the event position in tenth-of-microdegree
    /// units.
    pub delta_longitude: i32,
    /// Time offset from the detection time in milliseconds.
    pub delta_time: u16,
}

/// Recorded trace of the originating vehicle.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathHistory {
    /// Waypoints, most recent first.
    pub points: Vec<PathPoint>,
}

/// Location container of a DENM.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationContainer {
    /// Speed of the originating vehicle at the event position.
    pub event_speed: Option<SpeedValue>,
    /// Heading of the originating vehicle at the event position.
    pub event_position_heading: Option<HeadingValue>,
    /// Path traces leading to the event position.
    pub traces: Vec<PathHistory>,
}

// ============================================================================
// SECTION: Alacarte Container
// ============================================================================

/// Role of an impact-reduction container exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestResponseIndication {
    /// Solicits impact-reduction containers from surrounding stations.
    Request,
    /// Answers a previously received request.
    Response,
}

/// Impact-reduction data exchange container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactReductionContainer {
    /// Whether this message solicits or answers an exchange.
    pub request_response: RequestResponseIndication,
}

/// A-la-carte container of a DENM.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlacarteContainer {
    /// Impact-reduction exchange payload.
    pub impact_reduction: Option<ImpactReductionContainer>,
}

// ============================================================================
// SECTION: Message
// ============================================================================

/// Decoded Decentralized Environmental Notification Message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denm {
    /// Common ITS PDU header.
    pub header: ItsPduHeader,
    /// Management container.
    pub management: ManagementContainer,
    /// Situation container, when the event has a classified cause.
    pub situation: Option<SituationContainer>,
    /// Location container.
    pub location: Option<LocationContainer>,
    /// A-la-carte container.
    pub alacarte: Option<AlacarteContainer>,
}

impl Denm {
    /// Returns the notification identity of this message.
    #[must_use]
    pub const fn action_id(&self) -> ActionId {
        self.management.action_id
    }
}
