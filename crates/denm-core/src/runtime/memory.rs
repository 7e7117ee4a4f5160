// crates/denm-core/src/runtime/memory.rs
// ============================================================================
// Module: Notification Memory
// Description: Keyed store of in-flight notification identities.
// Purpose: Deduplicate by action identity and age out stale entries.
// Dependencies: crate::core, serde
// ============================================================================

//! ## Overview
//! The notification memory remembers every notification the station has sent
//! or seen, keyed by action identity. Use cases consult it to avoid
//! re-announcing events; the orchestrator uses its dedup signal on
//! reception. Records are mutated only through [`DenmMemory::received`],
//! [`DenmMemory::sent`], and [`DenmMemory::drop_expired`]; the memory runs
//! no background timer, so nothing changes between ticks except through
//! these calls.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::ActionId;
use crate::core::CauseCode;
use crate::core::Denm;
use crate::core::HeadingValue;
use crate::core::ItsTimestamp;
use crate::core::ReferencePosition;
use crate::core::RequestResponseIndication;
use crate::core::SpeedValue;
use crate::core::Timestamp;

// ============================================================================
// SECTION: Record
// ============================================================================

/// How a record entered the memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOrigin {
    /// This station transmitted the notification itself.
    Originated,
    /// The notification arrived from another station.
    Received,
}

/// One remembered notification.
///
/// Owned exclusively by the memory; use cases see shared references only and
/// request mutations through the memory's operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenmRecord {
    /// Notification identity.
    pub action_id: ActionId,
    /// How the record entered the memory.
    pub origin: RecordOrigin,
    /// Instant the record was first inserted.
    pub created: Timestamp,
    /// Instant of the most recent refresh; the aging reference.
    pub updated: Timestamp,
    /// Position of the notified event in wire units.
    pub event_position: ReferencePosition,
    /// Speed of the originating vehicle, when carried.
    pub event_speed: Option<SpeedValue>,
    /// Heading of the originating vehicle, when carried.
    pub event_heading: Option<HeadingValue>,
    /// Instant the event was detected.
    pub detection_time: ItsTimestamp,
    /// Instant the message revision was produced.
    pub reference_time: ItsTimestamp,
    /// Classified event cause, when carried.
    pub cause: Option<CauseCode>,
    /// Impact-reduction exchange role, when carried.
    pub impact_reduction: Option<RequestResponseIndication>,
}

impl DenmRecord {
    /// Decodes the record fields use cases need from a message.
    fn from_denm(denm: &Denm, origin: RecordOrigin, created: Timestamp, updated: Timestamp) -> Self {
        Self {
            action_id: denm.action_id(),
            origin,
            created,
            updated,
            event_position: denm.management.event_position,
            event_speed: denm.location.as_ref().and_then(|location| location.event_speed),
            event_heading: denm
                .location
                .as_ref()
                .and_then(|location| location.event_position_heading),
            detection_time: denm.management.detection_time,
            reference_time: denm.management.reference_time,
            cause: denm.situation.map(|situation| situation.event_type.cause),
            impact_reduction: denm
                .alacarte
                .and_then(|alacarte| alacarte.impact_reduction)
                .map(|container| container.request_response),
        }
    }

    /// Refreshes the record in place from a newer message revision.
    fn refresh(&mut self, denm: &Denm, origin: RecordOrigin, updated: Timestamp) {
        let created = self.created;
        *self = Self::from_denm(denm, origin, created, updated);
    }
}

// ============================================================================
// SECTION: Memory
// ============================================================================

/// Keyed store of in-flight notifications.
///
/// # Invariants
/// - At most one record per action identity; inserting a present identity
///   refreshes in place.
#[derive(Debug, Clone)]
pub struct DenmMemory {
    /// Retention window in milliseconds; a record is evicted once its age
    /// reaches the window.
    retention_ms: u64,
    /// Records keyed by action identity.
    records: BTreeMap<ActionId, DenmRecord>,
}

impl DenmMemory {
    /// Creates an empty memory with the given retention window.
    #[must_use]
    pub const fn new(retention_ms: u64) -> Self {
        Self {
            retention_ms,
            records: BTreeMap::new(),
        }
    }

    /// Inserts or refreshes a record for an externally received
    /// notification and returns whether the identity was already known.
    pub fn received(&mut self, denm: &Denm, now: Timestamp) -> bool {
        self.upsert(denm, RecordOrigin::Received, now)
    }

    /// Inserts or refreshes a record for a notification this station just
    /// transmitted.
    pub fn sent(&mut self, denm: &Denm, now: Timestamp) {
        self.upsert(denm, RecordOrigin::Originated, now);
    }

    /// Evicts every record whose age reached the retention window and
    /// returns the eviction count.
    ///
    /// Called exactly once per orchestration tick, before any use case is
    /// evaluated, so stale context never influences a decision in the tick
    /// it expires.
    pub fn drop_expired(&mut self, now: Timestamp) -> usize {
        let before = self.records.len();
        let retention_ms = self.retention_ms;
        self.records
            .retain(|_, record| now.saturating_age_since(record.updated) < retention_ms);
        before - self.records.len()
    }

    /// Looks up a record by identity; absent means "never seen".
    #[must_use]
    pub fn get(&self, action_id: &ActionId) -> Option<&DenmRecord> {
        self.records.get(action_id)
    }

    /// Returns whether an identity is currently remembered.
    #[must_use]
    pub fn contains(&self, action_id: &ActionId) -> bool {
        self.records.contains_key(action_id)
    }

    /// Returns the number of remembered notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the memory holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the remembered records in identity order.
    pub fn iter(&self) -> impl Iterator<Item = &DenmRecord> {
        self.records.values()
    }

    /// Inserts or refreshes one record and returns whether the identity was
    /// already known.
    fn upsert(&mut self, denm: &Denm, origin: RecordOrigin, now: Timestamp) -> bool {
        let action_id = denm.action_id();
        if let Some(record) = self.records.get_mut(&action_id) {
            record.refresh(denm, origin, now);
            true
        } else {
            self.records
                .insert(action_id, DenmRecord::from_denm(denm, origin, now, now));
            false
        }
    }
}
