// crates/denm-core/src/core/mod.rs
// ============================================================================
// Module: DENM Core Types
// Description: Canonical protocol objects and identifiers for dissemination.
// Purpose: Provide stable, serializable types for messages and boundaries.
// Dependencies: denm-units, serde
// ============================================================================

//! ## Overview
//! Core types define the DENM protocol object, its identifiers, the vehicle
//! state snapshot, the transport boundary parameters, and the time model.
//! These types are the canonical source of truth for every runtime workflow.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod events;
pub mod identifiers;
pub mod message;
pub mod request;
pub mod time;
pub mod vehicle;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use events::StoryboardEvent;
pub use identifiers::ActionId;
pub use identifiers::SequenceCounter;
pub use identifiers::SequenceNumber;
pub use identifiers::StationId;
pub use message::AlacarteContainer;
pub use message::Altitude;
pub use message::CauseCode;
pub use message::DENM_PROTOCOL_VERSION;
pub use message::Denm;
pub use message::EventType;
pub use message::HeadingValue;
pub use message::ImpactReductionContainer;
pub use message::ItsPduHeader;
pub use message::LocationContainer;
pub use message::ManagementContainer;
pub use message::MessageId;
pub use message::PathHistory;
pub use message::PathPoint;
pub use message::PositionConfidenceEllipse;
pub use message::ReferencePosition;
pub use message::RequestResponseIndication;
pub use message::SituationContainer;
pub use message::SpeedValue;
pub use request::CommunicationProfile;
pub use request::DEN_ITS_AID;
pub use request::DENM_DESTINATION_PORT;
pub use request::DataRequest;
pub use request::Repetition;
pub use request::TrafficClass;
pub use request::TransportType;
pub use request::UpPacket;
pub use time::ItsTimestamp;
pub use time::TimeError;
pub use time::Timestamp;
pub use vehicle::VehicleState;
