// crates/denm-core/src/lib.rs
// ============================================================================
// Module: DENM Core Library
// Description: Public API surface for the DENM dissemination core.
// Purpose: Expose core types, interfaces, and runtime workflows.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! DENM core models the dissemination logic of a vehicular hazard
//! notification service: a station periodically decides, from locally
//! observed conditions and previously seen notifications, whether to
//! originate, repeat, or let expire a notification, and suppresses redundant
//! notifications received from other stations for the same event. It is
//! host-agnostic and integrates through explicit interfaces rather than
//! embedding a scheduler or a radio stack.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::Clock;
pub use interfaces::DenmTransport;
pub use interfaces::ReceptionListener;
pub use interfaces::TransportError;
pub use interfaces::VehicleDataProvider;
pub use runtime::BuildError;
pub use runtime::DenmMemory;
pub use runtime::DenmRecord;
pub use runtime::DenmService;
pub use runtime::DenmServiceConfig;
pub use runtime::DisseminationProfile;
pub use runtime::EndOfQueueConfig;
pub use runtime::ImpactReductionConfig;
pub use runtime::ImpactReductionExchange;
pub use runtime::IndicationOutcome;
pub use runtime::JamAheadConfig;
pub use runtime::MessageExtension;
pub use runtime::OutgoingIntent;
pub use runtime::RecordOrigin;
pub use runtime::ServiceError;
pub use runtime::TickOutcome;
pub use runtime::TrafficJamAhead;
pub use runtime::TrafficJamEndOfQueue;
pub use runtime::UseCase;
pub use runtime::build_denm;
pub use runtime::build_request;
