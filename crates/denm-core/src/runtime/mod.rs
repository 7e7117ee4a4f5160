// crates/denm-core/src/runtime/mod.rs
// ============================================================================
// Module: DENM Runtime
// Description: Memory, use cases, builders, and the orchestrator.
// Purpose: Execute the dissemination workflows against host interfaces.
// Dependencies: crate::{core, interfaces}, denm-units
// ============================================================================

//! ## Overview
//! Runtime modules implement the dissemination workflows: the notification
//! memory, the detection use cases, the request/message builder, and the
//! orchestrator that drives them. Every entry path of the host goes through
//! the orchestrator, which preserves the ordering discipline the protocol
//! relies on.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod builder;
pub mod memory;
pub mod service;
pub mod use_case;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use builder::BuildError;
pub use builder::EVENT_HEADING_CONFIDENCE;
pub use builder::EVENT_SPEED_CONFIDENCE;
pub use builder::build_denm;
pub use builder::build_request;
pub use memory::DenmMemory;
pub use memory::DenmRecord;
pub use memory::RecordOrigin;
pub use service::DenmService;
pub use service::DenmServiceConfig;
pub use service::IndicationOutcome;
pub use service::ServiceError;
pub use service::TickOutcome;
pub use use_case::DisseminationProfile;
pub use use_case::EndOfQueueConfig;
pub use use_case::ImpactReductionConfig;
pub use use_case::ImpactReductionExchange;
pub use use_case::JamAheadConfig;
pub use use_case::MessageExtension;
pub use use_case::OutgoingIntent;
pub use use_case::TrafficJamAhead;
pub use use_case::TrafficJamEndOfQueue;
pub use use_case::UseCase;
