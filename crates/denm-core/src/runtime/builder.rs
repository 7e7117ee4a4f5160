// crates/denm-core/src/runtime/builder.rs
// ============================================================================
// Module: Request and Message Builder
// Description: Assembles transport parameters and the outgoing DENM body.
// Purpose: Stamp the common fields every send carries, then merge variants.
// Dependencies: denm-units, crate::{core, runtime::use_case}, thiserror
// ============================================================================

//! ## Overview
//! Every outgoing send, regardless of which use case fired, carries the same
//! common fields: protocol version, message type, station identity, a fresh
//! action identity from the sequence counter, detection and reference time
//! from the vehicle-state snapshot, and the encoded event position, speed,
//! and heading. The firing variant's extension is merged afterwards and
//! structurally cannot touch the identity fields.
//!
//! An encoding failure here is a contract violation between the
//! vehicle-state provider and this builder — the reading left the
//! physically expected range — and propagates as a fatal error, never a
//! truncated field.

// ============================================================================
// SECTION: Imports
// ============================================================================

use denm_units::EncodeError;
use denm_units::encode_heading;
use denm_units::encode_latitude;
use denm_units::encode_longitude;
use denm_units::encode_speed;
use thiserror::Error;

use crate::core::Altitude;
use crate::core::CommunicationProfile;
use crate::core::DEN_ITS_AID;
use crate::core::DENM_DESTINATION_PORT;
use crate::core::DENM_PROTOCOL_VERSION;
use crate::core::DataRequest;
use crate::core::Denm;
use crate::core::HeadingValue;
use crate::core::ItsPduHeader;
use crate::core::LocationContainer;
use crate::core::ManagementContainer;
use crate::core::MessageId;
use crate::core::PathHistory;
use crate::core::PositionConfidenceEllipse;
use crate::core::ReferencePosition;
use crate::core::SequenceCounter;
use crate::core::SpeedValue;
use crate::core::TimeError;
use crate::core::TransportType;
use crate::core::VehicleState;
use crate::core::identifiers::ActionId;
use crate::runtime::use_case::UseCase;

// ============================================================================
// SECTION: Field Constants
// ============================================================================

/// Speed confidence stamped into outgoing messages: within 3 cm/s.
pub const EVENT_SPEED_CONFIDENCE: u8 = 3;

/// Heading confidence stamped into outgoing messages: within 1°.
pub const EVENT_HEADING_CONFIDENCE: u8 = 10;

// ============================================================================
// SECTION: Build Error
// ============================================================================

/// Message building errors.
///
/// Every variant indicates a broken contract with the vehicle-state
/// provider; callers treat it as fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// A physical quantity left its fixed-point field range.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// The snapshot instant has no protocol representation.
    #[error(transparent)]
    Time(#[from] TimeError),
}

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Assembles the transport parameters for one send.
///
/// The registered protocol constants are stamped first; the firing
/// variant contributes only its urgency and repetition parameters.
#[must_use]
pub fn build_request(use_case: &UseCase) -> DataRequest {
    let profile = use_case.dissemination();
    DataRequest {
        destination_port: DENM_DESTINATION_PORT,
        its_aid: DEN_ITS_AID,
        transport_type: TransportType::GeoBroadcast,
        communication_profile: CommunicationProfile::ItsG5,
        traffic_class: profile.traffic_class,
        repetition: profile.repetition,
    }
}

/// Assembles the message body for one send.
///
/// Detection and reference time are encoded identically from the snapshot's
/// `updated` instant. The event altitude is always encoded unavailable, and
/// the confidence ellipse is unavailable unless the variant overrides it.
///
/// # Errors
///
/// Returns [`BuildError`] when a snapshot value cannot be represented in
/// its wire field — a fatal provider contract violation.
pub fn build_denm(
    use_case: &UseCase,
    state: &VehicleState,
    counter: &mut SequenceCounter,
) -> Result<Denm, BuildError> {
    let message_time = state.updated.to_its()?;
    let action_id = ActionId::new(state.station_id, counter.next());

    let event_position = ReferencePosition {
        latitude: encode_latitude(Some(state.latitude))?,
        longitude: encode_longitude(Some(state.longitude))?,
        position_confidence: PositionConfidenceEllipse::default(),
        altitude: Altitude::default(),
    };

    let location = LocationContainer {
        event_speed: Some(SpeedValue {
            value: encode_speed(Some(state.speed))?,
            confidence: EVENT_SPEED_CONFIDENCE,
        }),
        event_position_heading: Some(HeadingValue {
            value: encode_heading(Some(state.heading))?,
            confidence: EVENT_HEADING_CONFIDENCE,
        }),
        // Path history is not recorded yet; the placeholder keeps the
        // container shape complete.
        traces: vec![PathHistory::default()],
    };

    let mut message = Denm {
        header: ItsPduHeader {
            protocol_version: DENM_PROTOCOL_VERSION,
            message_id: MessageId::Denm,
            station_id: state.station_id,
        },
        management: ManagementContainer {
            action_id,
            detection_time: message_time,
            reference_time: message_time,
            event_position,
        },
        situation: None,
        location: Some(location),
        alacarte: None,
    };

    let extension = use_case.message();
    message.situation = extension.situation;
    message.alacarte = extension.alacarte;
    if let Some(confidence) = extension.position_confidence {
        message.management.event_position.position_confidence = confidence;
    }

    Ok(message)
}
