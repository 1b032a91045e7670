//! Shared recording helpers for the integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use touchy::input::{NodeId, RawTouch, TouchEvent, TouchPhase, VirtualSurface};
use touchy::{Finger, Hand, HandlerKey, Lifecycle, Point, Session, SessionOptions};

pub type Log = Rc<RefCell<Vec<String>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn ids(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| p.id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn finger_ids(fingers: &[Rc<Finger>]) -> String {
    fingers
        .iter()
        .map(|f| f.id().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Log every lifecycle event of `finger` as `"<tag> <id> <stage>"`.
pub fn watch_finger(log: &Log, tag: &'static str, finger: &Finger) {
    for stage in Lifecycle::ALL {
        let log = Rc::clone(log);
        finger.on(stage, move |f, _| {
            log.borrow_mut().push(format!("{} {} {}", tag, f.id(), stage));
            Ok(())
        });
    }
}

/// Log every lifecycle event of `hand` as `"<tag> <stage> <ids>"`.
pub fn watch_hand(log: &Log, tag: &'static str, hand: &Hand) {
    for stage in Lifecycle::ALL {
        let log = Rc::clone(log);
        hand.on(stage, move |_, points| {
            log.borrow_mut()
                .push(format!("{} {} {}", tag, stage, ids(points)));
            Ok(())
        });
    }
}

/// Options whose `any` and count handlers log themselves and watch
/// every finger and cohort they are handed.
pub fn recording_options(log: &Log) -> SessionOptions {
    let mut options = SessionOptions::new();

    let any_log = Rc::clone(log);
    options = options.any(move |_, fingers| {
        any_log
            .borrow_mut()
            .push(format!("any {}", finger_ids(fingers)));
        watch_finger(&any_log, "finger", &fingers[0]);
        Ok(())
    });

    for count in 1..=5 {
        let key = HandlerKey::for_count(count).unwrap();
        let count_log = Rc::clone(log);
        options = options.handler(key, move |cohort, fingers| {
            count_log
                .borrow_mut()
                .push(format!("{} {}", key, finger_ids(fingers)));
            watch_hand(&count_log, "cohort", cohort);
            for finger in fingers {
                watch_finger(&count_log, "cohort-finger", finger);
            }
            Ok(())
        });
    }

    options
}

/// Session on a virtual surface with full recording, main hand included.
pub fn recording_session(log: &Log) -> Session<VirtualSurface> {
    let session = Session::new(VirtualSurface::new(NodeId(1)), recording_options(log)).unwrap();
    watch_hand(log, "main", session.main_hand());
    session
}

pub fn touch(id: u64, x: f64, y: f64) -> RawTouch {
    RawTouch::new(id, x, y)
}

pub fn touch_event(
    phase: TouchPhase,
    changed: &[RawTouch],
    touches: &[RawTouch],
    timestamp: f64,
) -> TouchEvent {
    TouchEvent::new(phase, changed.to_vec(), touches.to_vec(), timestamp)
}

/// Take and clear the log.
pub fn drain(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.borrow_mut())
}
