// crates/denm-core/src/runtime/service.rs
// ============================================================================
// Module: Dissemination Orchestrator
// Description: Tick, reception, and scripted-event workflows for one station.
// Purpose: Drive the use cases against shared memory and build every send.
// Dependencies: crate::{core, interfaces, runtime}, serde, thiserror
// ============================================================================

//! ## Overview
//! One [`DenmService`] instance owns a station's dissemination state: the
//! ordered use cases, the notification memory, and the sequence counter.
//! The host scheduler invokes its three entry points — [`DenmService::trigger`]
//! on the repetition timer, [`DenmService::indicate`] on packet arrival, and
//! [`DenmService::notify`] on scripted events — never concurrently for the
//! same station. Every call runs to completion without suspension; the only
//! discipline is ordering: stale records are dropped before any check, and
//! an inbound notification is recorded before any reception handler runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::ActionId;
use crate::core::SequenceCounter;
use crate::core::StoryboardEvent;
use crate::core::Timestamp;
use crate::core::UpPacket;
use crate::core::VehicleState;
use crate::interfaces::Clock;
use crate::interfaces::DenmTransport;
use crate::interfaces::ReceptionListener;
use crate::interfaces::TransportError;
use crate::interfaces::VehicleDataProvider;
use crate::runtime::builder::BuildError;
use crate::runtime::builder::build_denm;
use crate::runtime::builder::build_request;
use crate::runtime::memory::DenmMemory;
use crate::runtime::use_case::UseCase;

// ============================================================================
// SECTION: Service Configuration
// ============================================================================

/// Configuration for one station's dissemination service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenmServiceConfig {
    /// Notification retention window in milliseconds; a remembered
    /// notification expires once unrefreshed for this long.
    pub retention_ms: u64,
}

impl Default for DenmServiceConfig {
    fn default() -> Self {
        Self {
            retention_ms: 600_000,
        }
    }
}

// ============================================================================
// SECTION: Outcomes and Errors
// ============================================================================

/// Result of one orchestration tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    /// Records evicted by aging before the use cases ran.
    pub evicted: usize,
    /// Identities of the messages sent this tick, in firing order.
    pub sent: Vec<ActionId>,
}

/// Result of one inbound packet indication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicationOutcome {
    /// Payload did not decode to a notification; dropped without any state
    /// change.
    DiscardedMalformed,
    /// Notification carried this station's own identity; dropped for loop
    /// prevention without reaching memory or any use case.
    DiscardedSelf,
    /// Notification was recorded and offered to every use case.
    Accepted {
        /// Whether the identity was already known to the memory.
        duplicate: bool,
        /// Number of response sends the reception obliged.
        responses: usize,
    },
}

/// Orchestration errors.
///
/// Recoverable radio conditions are deliberately not represented here:
/// malformed and self-originated packets are silent no-ops, and the
/// protocol's own periodicity provides the corrective resend. What remains
/// is fatal.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Message building broke the provider contract.
    #[error(transparent)]
    Build(#[from] BuildError),
    /// The transport did not accept a send.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

// ============================================================================
// SECTION: Service
// ============================================================================

/// Dissemination orchestrator for one station.
pub struct DenmService<V, C, T, L> {
    /// Vehicle-state source.
    vehicle: V,
    /// Host time reference.
    clock: C,
    /// Outgoing packet transport.
    transport: T,
    /// Optional reception observer.
    listener: Option<L>,
    /// Ordered detection policies; registration order is evaluation order.
    use_cases: Vec<UseCase>,
    /// Shared notification memory.
    memory: DenmMemory,
    /// Session-scoped sequence counter.
    sequence: SequenceCounter,
}

impl<V, C, T, L> DenmService<V, C, T, L>
where
    V: VehicleDataProvider,
    C: Clock,
    T: DenmTransport,
    L: ReceptionListener,
{
    /// Creates a service with no registered use cases.
    #[must_use]
    pub fn new(
        vehicle: V,
        clock: C,
        transport: T,
        listener: Option<L>,
        config: DenmServiceConfig,
    ) -> Self {
        Self {
            vehicle,
            clock,
            transport,
            listener,
            use_cases: Vec::new(),
            memory: DenmMemory::new(config.retention_ms),
            sequence: SequenceCounter::new(),
        }
    }

    /// Registers a use case; evaluation follows registration order.
    pub fn register(&mut self, use_case: UseCase) {
        self.use_cases.push(use_case);
    }

    /// Returns a read-only view of the notification memory.
    #[must_use]
    pub const fn memory(&self) -> &DenmMemory {
        &self.memory
    }

    /// Runs one orchestration tick.
    ///
    /// Stale records are evicted first, then every use case is checked in
    /// registration order. A firing use case's message is built, sent, and
    /// recorded before the next use case runs, so a later check observes
    /// the earlier send within the same pass. One complete pass per tick;
    /// re-entrant effects are not chased.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] when building or sending fails; both are
    /// fatal for the station.
    pub fn trigger(&mut self) -> Result<TickOutcome, ServiceError> {
        let now = self.clock.now();
        let evicted = self.memory.drop_expired(now);
        let state = self.vehicle.state();

        let mut sent = Vec::new();
        for index in 0..self.use_cases.len() {
            if self.use_cases[index].check(&state, &self.memory).is_some() {
                sent.push(self.send(index, &state, now)?);
            }
        }

        Ok(TickOutcome {
            evicted,
            sent,
        })
    }

    /// Handles one inbound packet.
    ///
    /// Unrecognized payloads and self-originated notifications are dropped
    /// silently. An accepted notification is recorded in the memory and
    /// announced to the reception listener before any use case reacts; a
    /// use case demanding a response triggers an immediate send.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] when building or sending a response fails.
    pub fn indicate(&mut self, packet: UpPacket) -> Result<IndicationOutcome, ServiceError> {
        let UpPacket::Denm(denm) = packet else {
            return Ok(IndicationOutcome::DiscardedMalformed);
        };
        let state = self.vehicle.state();
        if denm.header.station_id == state.station_id {
            return Ok(IndicationOutcome::DiscardedSelf);
        }

        let now = self.clock.now();
        let duplicate = self.memory.received(&denm, now);
        if let Some(listener) = self.listener.as_mut() {
            listener.on_denm_received(&denm);
        }

        // The record was inserted above; the clone decouples the handlers
        // from the memory borrow while responses mutate it.
        let Some(record) = self.memory.get(&denm.action_id()).cloned() else {
            return Ok(IndicationOutcome::Accepted {
                duplicate,
                responses: 0,
            });
        };

        let mut responses = 0;
        for index in 0..self.use_cases.len() {
            if self.use_cases[index].handle_message_reception(&record) {
                self.send(index, &state, now)?;
                responses += 1;
            }
        }

        Ok(IndicationOutcome::Accepted {
            duplicate,
            responses,
        })
    }

    /// Forwards a scripted event to every use case.
    ///
    /// No send is triggered directly; a reacting use case changes internal
    /// state that its next check observes.
    pub fn notify(&mut self, event: &StoryboardEvent) {
        for use_case in &mut self.use_cases {
            use_case.handle_storyboard_trigger(event);
        }
    }

    /// Builds, transmits, and records one message for the given use case.
    fn send(
        &mut self,
        index: usize,
        state: &VehicleState,
        now: Timestamp,
    ) -> Result<ActionId, ServiceError> {
        let use_case = &self.use_cases[index];
        let request = build_request(use_case);
        let message = build_denm(use_case, state, &mut self.sequence)?;
        self.transport.request(&request, &message)?;
        self.memory.sent(&message, now);
        Ok(message.action_id())
    }
}
