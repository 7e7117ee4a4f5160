// crates/denm-core/src/core/events.rs
// ============================================================================
// Module: Scripted Events
// Description: Externally injected scenario events.
// Purpose: Let a scenario script arm use cases outside the message flow.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A storyboard event is an opaque, scenario-driven injection unrelated to
//! the normal message flow — for example a scripted hazard. It carries a
//! cause label that interested use cases match against; the resulting state
//! change is internal to the use case and observed on its next check.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Storyboard Event
// ============================================================================

/// Externally scripted scenario event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryboardEvent {
    /// Cause label use cases match against.
    cause: String,
}

impl StoryboardEvent {
    /// Creates an event with the given cause label.
    #[must_use]
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }

    /// Returns the cause label.
    #[must_use]
    pub fn cause(&self) -> &str {
        &self.cause
    }
}
