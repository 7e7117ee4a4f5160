// crates/denm-core/tests/service.rs
// ============================================================================
// Module: Orchestrator Tests
// Description: Tick, reception, and scripted-event workflows end to end.
// Purpose: Validate ordering, suppression, and response obligations.
// Dependencies: denm-core, denm-units
// ============================================================================

//! ## Overview
//! Drives the dissemination orchestrator through its three entry points with
//! deterministic host doubles: origination ticks, inbound packet
//! indications, and scripted events. Covers loop prevention, same-pass
//! visibility of a send, retention-window re-announcement, and the
//! impact-reduction request/response exchange.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Tests use unwrap and panic-based assertions on deterministic fixtures."
)]

mod support;

use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;

use denm_core::ActionId;
use denm_core::CauseCode;
use denm_core::DataRequest;
use denm_core::Denm;
use denm_core::DenmService;
use denm_core::DenmServiceConfig;
use denm_core::EndOfQueueConfig;
use denm_core::ImpactReductionConfig;
use denm_core::ImpactReductionExchange;
use denm_core::IndicationOutcome;
use denm_core::JamAheadConfig;
use denm_core::RecordOrigin;
use denm_core::RequestResponseIndication;
use denm_core::SequenceNumber;
use denm_core::StationId;
use denm_core::StoryboardEvent;
use denm_core::Timestamp;
use denm_core::TrafficJamAhead;
use denm_core::TrafficJamEndOfQueue;
use denm_core::UpPacket;
use denm_core::UseCase;
use denm_core::VehicleState;
use denm_units::Speed;

use support::CountingListener;
use support::FixedVehicle;
use support::ManualClock;
use support::NOW_MILLIS;
use support::RecordingTransport;
use support::foreign_denm;
use support::impact_denm;
use support::resting_state;

/// Station identity of the vehicle under test.
const OWN_STATION: u32 = 42;

// ============================================================================
// SECTION: Harness
// ============================================================================

/// One orchestrator wired to shared, test-controlled host doubles.
struct Harness {
    service: DenmService<FixedVehicle, ManualClock, RecordingTransport, CountingListener>,
    state: Rc<RefCell<VehicleState>>,
    now: Rc<Cell<i64>>,
    sends: Rc<RefCell<Vec<(DataRequest, Denm)>>>,
    received: Rc<RefCell<Vec<Denm>>>,
}

impl Harness {
    fn new() -> Self {
        let state = Rc::new(RefCell::new(resting_state(OWN_STATION)));
        let now = Rc::new(Cell::new(NOW_MILLIS));
        let transport = RecordingTransport::default();
        let listener = CountingListener::default();
        let sends = Rc::clone(&transport.log);
        let received = Rc::clone(&listener.received);
        let service = DenmService::new(
            FixedVehicle {
                state: Rc::clone(&state),
            },
            ManualClock {
                now: Rc::clone(&now),
            },
            transport,
            Some(listener),
            DenmServiceConfig::default(),
        );
        Self {
            service,
            state,
            now,
            sends,
            received,
        }
    }

    fn advance(&self, millis: i64) {
        self.now.set(self.now.get() + millis);
        self.state.borrow_mut().updated = Timestamp::from_unix_millis(self.now.get());
    }

    fn set_speed(&self, mps: f64) {
        self.state.borrow_mut().speed = Speed::from_mps(mps);
    }

    fn send_count(&self) -> usize {
        self.sends.borrow().len()
    }
}

fn armed_end_of_queue() -> UseCase {
    UseCase::EndOfQueue(TrafficJamEndOfQueue::new(EndOfQueueConfig {
        jam_ticks: 1,
        non_urban_environment: true,
        ..EndOfQueueConfig::default()
    }))
}

fn jam_ahead() -> UseCase {
    UseCase::JamAhead(TrafficJamAhead::new(JamAheadConfig {
        non_urban_environment: true,
        ..JamAheadConfig::default()
    }))
}

fn impact_reduction() -> UseCase {
    UseCase::ImpactReduction(ImpactReductionExchange::new(ImpactReductionConfig::default()))
}

// ============================================================================
// SECTION: Reception Filtering
// ============================================================================

#[test]
fn unrecognized_payloads_are_dropped_without_any_state_change() {
    let mut harness = Harness::new();
    harness.service.register(impact_reduction());

    let outcome = harness.service.indicate(UpPacket::Unrecognized).unwrap();

    assert_eq!(outcome, IndicationOutcome::DiscardedMalformed);
    assert!(harness.service.memory().is_empty());
    assert!(harness.received.borrow().is_empty());
    assert_eq!(harness.send_count(), 0);
}

#[test]
fn own_notifications_are_dropped_before_memory_and_use_cases() {
    let mut harness = Harness::new();
    harness.service.register(impact_reduction());
    let echoed = impact_denm(OWN_STATION, 1, RequestResponseIndication::Request);

    let outcome = harness
        .service
        .indicate(UpPacket::Denm(Box::new(echoed)))
        .unwrap();

    assert_eq!(outcome, IndicationOutcome::DiscardedSelf);
    assert!(harness.service.memory().is_empty());
    assert!(harness.received.borrow().is_empty());
    assert_eq!(harness.send_count(), 0);
}

// ============================================================================
// SECTION: Reception Recording
// ============================================================================

#[test]
fn foreign_notification_is_recorded_and_announced() {
    let mut harness = Harness::new();
    let denm = foreign_denm(7, 7, CauseCode::TrafficCondition);

    let outcome = harness
        .service
        .indicate(UpPacket::Denm(Box::new(denm.clone())))
        .unwrap();

    assert_eq!(
        outcome,
        IndicationOutcome::Accepted {
            duplicate: false,
            responses: 0,
        }
    );
    let record = harness.service.memory().get(&denm.action_id()).unwrap();
    assert_eq!(record.origin, RecordOrigin::Received);
    assert_eq!(harness.received.borrow().len(), 1);
    assert_eq!(harness.received.borrow()[0], denm);
}

#[test]
fn repeated_reception_reports_a_duplicate_but_still_announces() {
    let mut harness = Harness::new();
    let denm = foreign_denm(7, 7, CauseCode::TrafficCondition);

    harness
        .service
        .indicate(UpPacket::Denm(Box::new(denm.clone())))
        .unwrap();
    let outcome = harness
        .service
        .indicate(UpPacket::Denm(Box::new(denm)))
        .unwrap();

    assert_eq!(
        outcome,
        IndicationOutcome::Accepted {
            duplicate: true,
            responses: 0,
        }
    );
    assert_eq!(harness.service.memory().len(), 1);
    assert_eq!(harness.received.borrow().len(), 2);
}

// ============================================================================
// SECTION: End-of-Queue Origination
// ============================================================================

#[test]
fn resting_station_announces_the_end_of_queue() {
    let mut harness = Harness::new();
    harness.service.register(armed_end_of_queue());

    let outcome = harness.service.trigger().unwrap();

    let expected = ActionId::new(StationId::new(OWN_STATION), SequenceNumber::new(1));
    assert_eq!(outcome.sent, vec![expected]);
    let (request, message) = harness.sends.borrow()[0].clone();
    assert_eq!(request.destination_port, 2002);
    assert_eq!(
        message.situation.unwrap().event_type.cause,
        CauseCode::DangerousEndOfQueue
    );
    let record = harness.service.memory().get(&expected).unwrap();
    assert_eq!(record.origin, RecordOrigin::Originated);
    assert_eq!(harness.service.memory().len(), 1);
}

#[test]
fn a_live_own_notification_suppresses_re_announcement() {
    let mut harness = Harness::new();
    harness.service.register(armed_end_of_queue());

    harness.service.trigger().unwrap();
    let outcome = harness.service.trigger().unwrap();

    assert!(outcome.sent.is_empty());
    assert_eq!(harness.send_count(), 1);
}

#[test]
fn expiry_of_the_own_notification_re_arms_the_announcement() {
    let mut harness = Harness::new();
    harness.service.register(armed_end_of_queue());

    harness.service.trigger().unwrap();
    harness.advance(600_000);
    let outcome = harness.service.trigger().unwrap();

    assert_eq!(outcome.evicted, 1);
    assert_eq!(outcome.sent.len(), 1);
    assert_eq!(
        outcome.sent[0].sequence_number,
        SequenceNumber::new(2)
    );
}

#[test]
fn an_earlier_send_is_visible_within_the_same_pass() {
    let mut harness = Harness::new();
    harness.service.register(armed_end_of_queue());
    harness.service.register(armed_end_of_queue());

    let outcome = harness.service.trigger().unwrap();

    // The second use case observes the first one's recorded send and
    // stays silent in the same tick.
    assert_eq!(outcome.sent.len(), 1);
    assert_eq!(harness.send_count(), 1);
}

#[test]
fn moving_station_does_not_announce_an_end_of_queue() {
    let mut harness = Harness::new();
    harness.service.register(armed_end_of_queue());
    harness.set_speed(20.0);

    let outcome = harness.service.trigger().unwrap();

    assert!(outcome.sent.is_empty());
}

// ============================================================================
// SECTION: Jam-Ahead Origination
// ============================================================================

#[test]
fn enough_foreign_jam_reports_oblige_a_relay() {
    let mut harness = Harness::new();
    harness.service.register(jam_ahead());
    harness.set_speed(20.0);
    for station in 70..73 {
        harness
            .service
            .indicate(UpPacket::Denm(Box::new(foreign_denm(
                station,
                1,
                CauseCode::TrafficCondition,
            ))))
            .unwrap();
    }

    let outcome = harness.service.trigger().unwrap();

    assert_eq!(outcome.sent.len(), 1);
    let (_, message) = harness.sends.borrow()[0].clone();
    let situation = message.situation.unwrap();
    assert_eq!(situation.event_type.cause, CauseCode::TrafficCondition);
    assert_eq!(situation.information_quality, 2);

    let repeat = harness.service.trigger().unwrap();
    assert!(repeat.sent.is_empty());
}

#[test]
fn too_few_foreign_reports_stay_silent() {
    let mut harness = Harness::new();
    harness.service.register(jam_ahead());
    harness.set_speed(20.0);
    for station in 70..72 {
        harness
            .service
            .indicate(UpPacket::Denm(Box::new(foreign_denm(
                station,
                1,
                CauseCode::TrafficCondition,
            ))))
            .unwrap();
    }

    let outcome = harness.service.trigger().unwrap();

    assert!(outcome.sent.is_empty());
}

#[test]
fn a_jammed_station_relays_nothing() {
    let mut harness = Harness::new();
    harness.service.register(jam_ahead());
    for station in 70..73 {
        harness
            .service
            .indicate(UpPacket::Denm(Box::new(foreign_denm(
                station,
                1,
                CauseCode::TrafficCondition,
            ))))
            .unwrap();
    }

    let outcome = harness.service.trigger().unwrap();

    assert!(outcome.sent.is_empty());
}

// ============================================================================
// SECTION: Impact-Reduction Exchange
// ============================================================================

#[test]
fn scripted_event_arms_a_one_shot_request() {
    let mut harness = Harness::new();
    harness.service.register(impact_reduction());

    harness.service.notify(&StoryboardEvent::new("impact-reduction"));
    assert_eq!(harness.send_count(), 0);

    let first = harness.service.trigger().unwrap();
    assert_eq!(first.sent.len(), 1);
    let (request, message) = harness.sends.borrow()[0].clone();
    assert_eq!(request.repetition, None);
    assert_eq!(
        message
            .alacarte
            .unwrap()
            .impact_reduction
            .unwrap()
            .request_response,
        RequestResponseIndication::Request
    );

    let second = harness.service.trigger().unwrap();
    assert!(second.sent.is_empty());
}

#[test]
fn unrelated_scripted_events_arm_nothing() {
    let mut harness = Harness::new();
    harness.service.register(impact_reduction());

    harness.service.notify(&StoryboardEvent::new("fog-bank"));
    let outcome = harness.service.trigger().unwrap();

    assert!(outcome.sent.is_empty());
}

#[test]
fn foreign_request_obliges_an_immediate_response() {
    let mut harness = Harness::new();
    harness.service.register(impact_reduction());
    let request = impact_denm(9, 1, RequestResponseIndication::Request);

    let outcome = harness
        .service
        .indicate(UpPacket::Denm(Box::new(request)))
        .unwrap();

    assert_eq!(
        outcome,
        IndicationOutcome::Accepted {
            duplicate: false,
            responses: 1,
        }
    );
    let (_, message) = harness.sends.borrow()[0].clone();
    assert_eq!(message.header.station_id, StationId::new(OWN_STATION));
    assert_eq!(
        message
            .alacarte
            .unwrap()
            .impact_reduction
            .unwrap()
            .request_response,
        RequestResponseIndication::Response
    );
    // Foreign request plus the own response.
    assert_eq!(harness.service.memory().len(), 2);
}

#[test]
fn foreign_responses_are_never_answered() {
    let mut harness = Harness::new();
    harness.service.register(impact_reduction());
    let response = impact_denm(9, 2, RequestResponseIndication::Response);

    let outcome = harness
        .service
        .indicate(UpPacket::Denm(Box::new(response)))
        .unwrap();

    assert_eq!(
        outcome,
        IndicationOutcome::Accepted {
            duplicate: false,
            responses: 0,
        }
    );
    assert_eq!(harness.send_count(), 0);
}

// ============================================================================
// SECTION: Sequence Progression
// ============================================================================

#[test]
fn sequence_numbers_advance_across_every_send() {
    let mut harness = Harness::new();
    harness.service.register(impact_reduction());

    for expected in 1..=3_u16 {
        harness.service.notify(&StoryboardEvent::new("impact-reduction"));
        let outcome = harness.service.trigger().unwrap();
        assert_eq!(
            outcome.sent[0].sequence_number,
            SequenceNumber::new(expected)
        );
    }
}
