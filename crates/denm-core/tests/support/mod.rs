// crates/denm-core/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Shared host fixtures for dissemination tests.
// Purpose: Provide deterministic vehicle, clock, transport, and listener
//          doubles.
// ============================================================================

//! Deterministic host-boundary doubles shared by the integration tests.

#![allow(
    dead_code,
    reason = "Each test binary uses a subset of the shared fixtures."
)]

use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;

use denm_core::ActionId;
use denm_core::AlacarteContainer;
use denm_core::Altitude;
use denm_core::CauseCode;
use denm_core::Clock;
use denm_core::DENM_PROTOCOL_VERSION;
use denm_core::DataRequest;
use denm_core::Denm;
use denm_core::DenmTransport;
use denm_core::EventType;
use denm_core::ImpactReductionContainer;
use denm_core::ItsPduHeader;
use denm_core::ItsTimestamp;
use denm_core::LocationContainer;
use denm_core::ManagementContainer;
use denm_core::MessageId;
use denm_core::PositionConfidenceEllipse;
use denm_core::ReceptionListener;
use denm_core::ReferencePosition;
use denm_core::RequestResponseIndication;
use denm_core::SequenceNumber;
use denm_core::SituationContainer;
use denm_core::StationId;
use denm_core::Timestamp;
use denm_core::TransportError;
use denm_core::VehicleDataProvider;
use denm_core::VehicleState;
use denm_units::GeoAngle;
use denm_units::Heading;
use denm_units::Speed;

/// Reference instant used by the tests: 2023-11-14T22:13:20Z.
pub const NOW_MILLIS: i64 = 1_700_000_000_000;

/// Vehicle provider returning a fixed, test-controlled snapshot.
pub struct FixedVehicle {
    /// Snapshot shared with the test body.
    pub state: Rc<RefCell<VehicleState>>,
}

impl VehicleDataProvider for FixedVehicle {
    fn state(&self) -> VehicleState {
        *self.state.borrow()
    }
}

/// Manually advanced clock.
#[derive(Clone)]
pub struct ManualClock {
    /// Current instant in Unix milliseconds, shared with the test body.
    pub now: Rc<Cell<i64>>,
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_unix_millis(self.now.get())
    }
}

/// Transport double recording every accepted request.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    /// Accepted sends in order.
    pub log: Rc<RefCell<Vec<(DataRequest, Denm)>>>,
}

impl DenmTransport for RecordingTransport {
    fn request(&mut self, request: &DataRequest, payload: &Denm) -> Result<(), TransportError> {
        self.log.borrow_mut().push((*request, payload.clone()));
        Ok(())
    }
}

/// Listener double recording every observed reception.
#[derive(Clone, Default)]
pub struct CountingListener {
    /// Observed notifications in order.
    pub received: Rc<RefCell<Vec<Denm>>>,
}

impl ReceptionListener for CountingListener {
    fn on_denm_received(&mut self, denm: &Denm) {
        self.received.borrow_mut().push(denm.clone());
    }
}

/// Builds a stationary vehicle snapshot for the given station.
pub fn resting_state(station: u32) -> VehicleState {
    VehicleState {
        station_id: StationId::new(station),
        updated: Timestamp::from_unix_millis(NOW_MILLIS),
        latitude: GeoAngle::from_degrees(48.765_432),
        longitude: GeoAngle::from_degrees(11.27),
        speed: Speed::from_mps(0.0),
        heading: Heading::from_degrees(0.0),
    }
}

/// Builds a well-formed foreign notification with the given cause.
pub fn foreign_denm(station: u32, sequence: u16, cause: CauseCode) -> Denm {
    Denm {
        header: ItsPduHeader {
            protocol_version: DENM_PROTOCOL_VERSION,
            message_id: MessageId::Denm,
            station_id: StationId::new(station),
        },
        management: ManagementContainer {
            action_id: ActionId::new(StationId::new(station), SequenceNumber::new(sequence)),
            detection_time: ItsTimestamp::from_millis(627_084_805_000),
            reference_time: ItsTimestamp::from_millis(627_084_805_000),
            event_position: ReferencePosition {
                latitude: 487_654_320,
                longitude: 112_700_000,
                position_confidence: PositionConfidenceEllipse::default(),
                altitude: Altitude::default(),
            },
        },
        situation: Some(SituationContainer {
            information_quality: 3,
            event_type: EventType {
                cause,
                subcause: 0,
            },
        }),
        location: Some(LocationContainer::default()),
        alacarte: None,
    }
}

/// Builds a foreign impact-reduction exchange notification.
pub fn impact_denm(
    station: u32,
    sequence: u16,
    request_response: RequestResponseIndication,
) -> Denm {
    let mut denm = foreign_denm(station, sequence, CauseCode::CollisionRisk);
    denm.alacarte = Some(AlacarteContainer {
        impact_reduction: Some(ImpactReductionContainer {
            request_response,
        }),
    });
    denm
}
