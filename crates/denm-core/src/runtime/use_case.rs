// crates/denm-core/src/runtime/use_case.rs
// ============================================================================
// Module: Detection Use Cases
// Description: Hazard-detection policies evaluated by the orchestrator.
// Purpose: Decide per tick and per reception whether to emit a notification.
// Dependencies: denm-units, crate::{core, runtime::memory}, serde
// ============================================================================

//! ## Overview
//! Each use case is an independently evolving detection policy with a fixed
//! capability set: a per-tick origination check, a reception reaction, a
//! scripted-event reaction, and the variant-specific transport and payload
//! fields for an outgoing send. The orchestrator stores use cases as a
//! closed sum type in an ordered sequence and dispatches by exhaustive
//! matching, so evaluation order is deterministic and no variant knows
//! another's internals.
//!
//! A use case never mutates the shared memory itself; returning an intent
//! leaves recording the sent message to the orchestrator. Payload and
//! transport contributions are returned as extension values the builder
//! merges, so a variant structurally cannot touch identity or sequence
//! fields.

// ============================================================================
// SECTION: Imports
// ============================================================================

use denm_units::Speed;
use serde::Deserialize;
use serde::Serialize;

use crate::core::AlacarteContainer;
use crate::core::CauseCode;
use crate::core::EventType;
use crate::core::ImpactReductionContainer;
use crate::core::PositionConfidenceEllipse;
use crate::core::Repetition;
use crate::core::RequestResponseIndication;
use crate::core::SituationContainer;
use crate::core::StoryboardEvent;
use crate::core::TrafficClass;
use crate::core::VehicleState;
use crate::runtime::memory::DenmMemory;
use crate::runtime::memory::DenmRecord;
use crate::runtime::memory::RecordOrigin;

// ============================================================================
// SECTION: Use Case Outputs
// ============================================================================

/// Marker returned by a use case whose origination conditions are met.
///
/// Returning an intent does not mutate the memory; the orchestrator builds
/// the message, sends it, and records it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutgoingIntent;

/// Variant-specific transport parameters for one send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisseminationProfile {
    /// Urgency class for the network layer.
    pub traffic_class: TrafficClass,
    /// Repetition policy, when the variant wants one.
    pub repetition: Option<Repetition>,
}

/// Variant-specific payload fields merged into an outgoing message.
///
/// Deliberately excludes the header, identity, and sequence fields: the
/// builder stamps those, and an extension cannot overwrite them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MessageExtension {
    /// Situation container contributed by the variant.
    pub situation: Option<SituationContainer>,
    /// A-la-carte container contributed by the variant.
    pub alacarte: Option<AlacarteContainer>,
    /// Position confidence override; the builder encodes the confidence
    /// ellipse as unavailable otherwise.
    pub position_confidence: Option<PositionConfidenceEllipse>,
}

// ============================================================================
// SECTION: End-of-Queue Detection
// ============================================================================

/// Configuration for [`TrafficJamEndOfQueue`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndOfQueueConfig {
    /// Speed magnitude at or below which the station counts as stationary
    /// in a jam, in meters per second.
    pub jam_speed_threshold: Speed,
    /// Consecutive slow ticks required before announcing.
    pub jam_ticks: u32,
    /// Whether the station may assume a non-urban environment; end-of-queue
    /// detection is unreliable between junctions and stays silent otherwise.
    pub non_urban_environment: bool,
}

impl Default for EndOfQueueConfig {
    fn default() -> Self {
        Self {
            jam_speed_threshold: Speed::from_mps(2.8),
            jam_ticks: 5,
            non_urban_environment: false,
        }
    }
}

/// Detects that this station has become the end of a queue.
///
/// Fires once the station has been at jam speed for the configured number
/// of consecutive ticks while no own end-of-queue notification is live in
/// the memory.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficJamEndOfQueue {
    /// Detection thresholds.
    config: EndOfQueueConfig,
    /// Consecutive ticks spent at or below jam speed.
    slow_ticks: u32,
}

impl TrafficJamEndOfQueue {
    /// Creates the use case with the given thresholds.
    #[must_use]
    pub const fn new(config: EndOfQueueConfig) -> Self {
        Self {
            config,
            slow_ticks: 0,
        }
    }

    /// Per-tick origination check.
    fn check(&mut self, state: &VehicleState, memory: &DenmMemory) -> Option<OutgoingIntent> {
        if !self.config.non_urban_environment {
            return None;
        }
        if state.speed.as_mps().abs() <= self.config.jam_speed_threshold.as_mps() {
            self.slow_ticks = self.slow_ticks.saturating_add(1);
        } else {
            self.slow_ticks = 0;
        }
        if self.slow_ticks < self.config.jam_ticks {
            return None;
        }
        if has_live_own_cause(memory, state, CauseCode::DangerousEndOfQueue) {
            return None;
        }
        Some(OutgoingIntent)
    }

    /// Transport parameters: urgent, repeated while the queue persists.
    const fn dissemination(&self) -> DisseminationProfile {
        DisseminationProfile {
            traffic_class: TrafficClass::new(0),
            repetition: Some(Repetition {
                interval_ms: 500,
                maximum_ms: 10_000,
            }),
        }
    }

    /// Payload: dangerous end-of-queue situation.
    const fn message(&self) -> MessageExtension {
        MessageExtension {
            situation: Some(SituationContainer {
                information_quality: 3,
                event_type: EventType {
                    cause: CauseCode::DangerousEndOfQueue,
                    subcause: 0,
                },
            }),
            alacarte: None,
            position_confidence: None,
        }
    }
}

// ============================================================================
// SECTION: Jam-Ahead Detection
// ============================================================================

/// Configuration for [`TrafficJamAhead`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JamAheadConfig {
    /// Speed magnitude at or below which the station itself counts as
    /// jammed, in meters per second.
    pub jam_speed_threshold: Speed,
    /// Distinct foreign jam notifications required before relaying.
    pub min_reports: usize,
    /// Whether the station may assume a non-urban environment.
    pub non_urban_environment: bool,
}

impl Default for JamAheadConfig {
    fn default() -> Self {
        Self {
            jam_speed_threshold: Speed::from_mps(2.8),
            min_reports: 3,
            non_urban_environment: false,
        }
    }
}

/// Relays a jam warning to traffic approaching from behind.
///
/// Fires while the station still moves freely but the memory holds enough
/// distinct foreign jam notifications ahead, and no own relay is live yet.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficJamAhead {
    /// Detection thresholds.
    config: JamAheadConfig,
}

impl TrafficJamAhead {
    /// Creates the use case with the given thresholds.
    #[must_use]
    pub const fn new(config: JamAheadConfig) -> Self {
        Self {
            config,
        }
    }

    /// Per-tick origination check.
    fn check(&mut self, state: &VehicleState, memory: &DenmMemory) -> Option<OutgoingIntent> {
        if !self.config.non_urban_environment {
            return None;
        }
        if state.speed.as_mps().abs() <= self.config.jam_speed_threshold.as_mps() {
            return None;
        }
        let foreign_reports = memory
            .iter()
            .filter(|record| {
                record.origin == RecordOrigin::Received
                    && matches!(
                        record.cause,
                        Some(CauseCode::TrafficCondition | CauseCode::DangerousEndOfQueue)
                    )
            })
            .count();
        if foreign_reports < self.config.min_reports {
            return None;
        }
        if has_live_own_cause(memory, state, CauseCode::TrafficCondition) {
            return None;
        }
        Some(OutgoingIntent)
    }

    /// Transport parameters: elevated urgency, slower repetition than the
    /// end-of-queue warning.
    const fn dissemination(&self) -> DisseminationProfile {
        DisseminationProfile {
            traffic_class: TrafficClass::new(1),
            repetition: Some(Repetition {
                interval_ms: 1_000,
                maximum_ms: 30_000,
            }),
        }
    }

    /// Payload: general traffic-condition situation.
    const fn message(&self) -> MessageExtension {
        MessageExtension {
            situation: Some(SituationContainer {
                information_quality: 2,
                event_type: EventType {
                    cause: CauseCode::TrafficCondition,
                    subcause: 0,
                },
            }),
            alacarte: None,
            position_confidence: None,
        }
    }
}

// ============================================================================
// SECTION: Impact-Reduction Exchange
// ============================================================================

/// Configuration for [`ImpactReductionExchange`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactReductionConfig {
    /// Storyboard cause label that arms an exchange request.
    pub storyboard_cause: String,
}

impl Default for ImpactReductionConfig {
    fn default() -> Self {
        Self {
            storyboard_cause: "impact-reduction".to_string(),
        }
    }
}

/// Exchanges impact-reduction containers with surrounding stations.
///
/// A scripted event arms a one-shot request; a received foreign request
/// obliges an immediate response. Responses are never answered, so two
/// stations cannot echo each other.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactReductionExchange {
    /// Exchange configuration.
    config: ImpactReductionConfig,
    /// Whether a scripted request is armed for the next tick.
    pending_request: bool,
    /// Role the next outgoing message carries.
    next_indication: RequestResponseIndication,
}

impl ImpactReductionExchange {
    /// Creates the use case with the given configuration.
    #[must_use]
    pub const fn new(config: ImpactReductionConfig) -> Self {
        Self {
            config,
            pending_request: false,
            next_indication: RequestResponseIndication::Request,
        }
    }

    /// Per-tick origination check; fires once per armed request.
    fn check(&mut self) -> Option<OutgoingIntent> {
        if self.pending_request {
            self.pending_request = false;
            self.next_indication = RequestResponseIndication::Request;
            Some(OutgoingIntent)
        } else {
            None
        }
    }

    /// Responds to foreign exchange requests.
    fn handle_message_reception(&mut self, record: &DenmRecord) -> bool {
        if record.impact_reduction == Some(RequestResponseIndication::Request) {
            self.next_indication = RequestResponseIndication::Response;
            true
        } else {
            false
        }
    }

    /// Arms a request when the scripted cause matches.
    fn handle_storyboard_trigger(&mut self, event: &StoryboardEvent) {
        if event.cause() == self.config.storyboard_cause {
            self.pending_request = true;
        }
    }

    /// Transport parameters: single shot, default urgency.
    const fn dissemination(&self) -> DisseminationProfile {
        DisseminationProfile {
            traffic_class: TrafficClass::new(2),
            repetition: None,
        }
    }

    /// Payload: collision-risk situation plus the exchange container.
    const fn message(&self) -> MessageExtension {
        MessageExtension {
            situation: Some(SituationContainer {
                information_quality: 7,
                event_type: EventType {
                    cause: CauseCode::CollisionRisk,
                    subcause: 0,
                },
            }),
            alacarte: Some(AlacarteContainer {
                impact_reduction: Some(ImpactReductionContainer {
                    request_response: self.next_indication,
                }),
            }),
            position_confidence: None,
        }
    }
}

// ============================================================================
// SECTION: Use Case Dispatch
// ============================================================================

/// Closed set of detection policies.
///
/// The orchestrator evaluates registered use cases in registration order,
/// one complete pass per tick; an earlier variant's send is visible to a
/// later variant's check within the same pass.
#[derive(Debug, Clone, PartialEq)]
pub enum UseCase {
    /// End-of-queue detection.
    EndOfQueue(TrafficJamEndOfQueue),
    /// Jam-ahead relaying.
    JamAhead(TrafficJamAhead),
    /// Impact-reduction container exchange.
    ImpactReduction(ImpactReductionExchange),
}

impl UseCase {
    /// Evaluates the origination conditions for one tick.
    pub fn check(&mut self, state: &VehicleState, memory: &DenmMemory) -> Option<OutgoingIntent> {
        match self {
            Self::EndOfQueue(use_case) => use_case.check(state, memory),
            Self::JamAhead(use_case) => use_case.check(state, memory),
            Self::ImpactReduction(use_case) => use_case.check(),
        }
    }

    /// Reacts to an inbound notification already recorded in the memory;
    /// `true` obliges an immediate response send.
    pub fn handle_message_reception(&mut self, record: &DenmRecord) -> bool {
        match self {
            Self::EndOfQueue(_) | Self::JamAhead(_) => false,
            Self::ImpactReduction(use_case) => use_case.handle_message_reception(record),
        }
    }

    /// Reacts to an externally scripted event; any state change is internal
    /// and observed on the next check.
    pub fn handle_storyboard_trigger(&mut self, event: &StoryboardEvent) {
        match self {
            Self::EndOfQueue(_) | Self::JamAhead(_) => {}
            Self::ImpactReduction(use_case) => use_case.handle_storyboard_trigger(event),
        }
    }

    /// Returns the variant's transport parameters for one send.
    #[must_use]
    pub const fn dissemination(&self) -> DisseminationProfile {
        match self {
            Self::EndOfQueue(use_case) => use_case.dissemination(),
            Self::JamAhead(use_case) => use_case.dissemination(),
            Self::ImpactReduction(use_case) => use_case.dissemination(),
        }
    }

    /// Returns the variant's payload fields for one send.
    #[must_use]
    pub const fn message(&self) -> MessageExtension {
        match self {
            Self::EndOfQueue(use_case) => use_case.message(),
            Self::JamAhead(use_case) => use_case.message(),
            Self::ImpactReduction(use_case) => use_case.message(),
        }
    }
}

// ============================================================================
// SECTION: Shared Predicates
// ============================================================================

/// Returns whether the memory holds a live notification with the given
/// cause that this station originated itself.
fn has_live_own_cause(memory: &DenmMemory, state: &VehicleState, cause: CauseCode) -> bool {
    memory.iter().any(|record| {
        record.origin == RecordOrigin::Originated
            && record.action_id.station_id == state.station_id
            && record.cause == Some(cause)
    })
}
