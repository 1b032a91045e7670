//! Mouse emulation through the session controller.

mod common;

use std::rc::Rc;

use common::*;
use touchy::input::{MouseEvent, MousePhase, NodeId, VirtualSurface};
use touchy::{Finger, Hand, HandlerResult, Session, SessionOptions};

fn mouse_session(log: &Log) -> Session<VirtualSurface> {
    let surface = VirtualSurface::new(NodeId(1)).with_descendant(NodeId(2));
    let session = Session::new(surface, recording_options(log).handle_mouse(true)).unwrap();
    watch_hand(log, "main", session.main_hand());
    session
}

fn mouse(phase: MousePhase, x: f64) -> MouseEvent {
    MouseEvent::new(phase, x, 0.0, x)
}

fn count(events: &[String], prefix: &str) -> usize {
    events.iter().filter(|e| e.starts_with(prefix)).count()
}

#[test]
fn press_drag_release_behaves_like_one_finger() {
    let log = new_log();
    let mut session = mouse_session(&log);

    session.handle_mouse(&mouse(MousePhase::Down, 0.0)).unwrap();
    let id = session.main_hand().ids()[0];
    session.handle_mouse(&mouse(MousePhase::Move, 5.0)).unwrap();
    session.handle_mouse(&mouse(MousePhase::Up, 6.0)).unwrap();

    let events = drain(&log);
    assert_eq!(events[0], format!("any {}", id));
    assert!(events.contains(&format!("one {}", id)));
    assert!(events.contains(&format!("main move {}", id)));
    assert!(events.contains(&format!("cohort end {}", id)));
    assert_eq!(events.last().unwrap(), &format!("cohort end {}", id));
    assert!(session.main_hand().is_empty());
    assert!(session.cohort().is_none());

    let finger_points = events
        .iter()
        .filter(|e| e.starts_with(&format!("finger {}", id)))
        .count();
    assert_eq!(finger_points, 3);
}

#[test]
fn move_without_press_does_nothing() {
    let log = new_log();
    let mut session = mouse_session(&log);

    session.handle_mouse(&mouse(MousePhase::Move, 1.0)).unwrap();
    session.handle_mouse(&mouse(MousePhase::Up, 2.0)).unwrap();

    assert!(drain(&log).is_empty());
}

#[test]
fn second_press_releases_stale_identifier_first() {
    let log = new_log();
    let mut session = mouse_session(&log);

    session.handle_mouse(&mouse(MousePhase::Down, 0.0)).unwrap();
    let stale = session.main_hand().ids()[0];
    drain(&log);

    session.handle_mouse(&mouse(MousePhase::Down, 9.0)).unwrap();
    let fresh = session.main_hand().ids()[0];
    assert_ne!(stale, fresh);

    let events = drain(&log);
    assert_eq!(count(&events, "main end"), 1);
    assert_eq!(count(&events, "main start"), 1);
    assert_eq!(events[0], format!("finger {} end", stale));
    let end_at = events
        .iter()
        .position(|e| *e == format!("main end {}", stale))
        .unwrap();
    let start_at = events
        .iter()
        .position(|e| *e == format!("main start {}", fresh))
        .unwrap();
    assert!(end_at < start_at);
    assert_eq!(session.main_hand().len(), 1);
}

#[test]
fn leaving_into_a_descendant_keeps_the_press() {
    let log = new_log();
    let mut session = mouse_session(&log);
    session.handle_mouse(&mouse(MousePhase::Down, 0.0)).unwrap();
    drain(&log);

    let into_child = mouse(MousePhase::Out, 1.0).with_related_target(NodeId(2));
    session.handle_mouse(&into_child).unwrap();
    assert!(drain(&log).is_empty());
    assert_eq!(session.main_hand().len(), 1);

    let leaving = mouse(MousePhase::Out, 2.0).with_related_target(NodeId(40));
    session.handle_mouse(&leaving).unwrap();
    assert_eq!(count(&drain(&log), "main end"), 1);
    assert!(session.main_hand().is_empty());
}

#[test]
fn mouse_is_ignored_unless_enabled() {
    let log = new_log();
    let mut session =
        Session::new(VirtualSurface::new(NodeId(1)), recording_options(&log)).unwrap();

    session.handle_mouse(&mouse(MousePhase::Down, 0.0)).unwrap();

    assert!(!session.handles_mouse());
    assert!(drain(&log).is_empty());
    assert!(session.main_hand().is_empty());
}

#[test]
fn stopped_session_ignores_mouse() {
    let log = new_log();
    let mut session = mouse_session(&log);
    session.stop();

    session.handle_mouse(&mouse(MousePhase::Down, 0.0)).unwrap();

    assert!(drain(&log).is_empty());
    assert_eq!(session.surface().subscription_count(), 0);
}

#[test]
fn mouse_emulation_defaults_off_for_bare_handler() {
    let any = |_: &Rc<Hand>, _: &[Rc<Finger>]| -> HandlerResult { Ok(()) };
    let session = Session::new(VirtualSurface::new(NodeId(1)), SessionOptions::from(any)).unwrap();
    assert!(!session.handles_mouse());
}
