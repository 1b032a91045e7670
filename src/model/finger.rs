//! Tracking state for one continuous contact.

use std::cell::RefCell;

use super::point::{Point, TouchId};
use crate::error::HandlerResult;
use crate::events::{EventBus, Lifecycle, Listener};

/// Listener type accepted by [`Finger::on`] and friends.
pub type FingerListener = Listener<Finger, Point>;

/// One physical contact: its ordered point history plus its own bus.
///
/// History is append-only. Every point in it carries the finger's id.
#[derive(Debug)]
pub struct Finger {
    id: TouchId,
    points: RefCell<Vec<Point>>,
    bus: EventBus<Finger, Point>,
}

impl Finger {
    pub fn new(id: TouchId) -> Self {
        Self {
            id,
            points: RefCell::new(Vec::new()),
            bus: EventBus::new(),
        }
    }

    pub fn id(&self) -> TouchId {
        self.id
    }

    /// Snapshot of the point history, oldest first.
    pub fn points(&self) -> Vec<Point> {
        self.points.borrow().clone()
    }

    /// Number of points recorded so far.
    pub fn len(&self) -> usize {
        self.points.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.borrow().is_empty()
    }

    /// Most recently appended point, if any.
    pub fn latest_point(&self) -> Option<Point> {
        self.points.borrow().last().copied()
    }

    pub fn on<F>(&self, stage: Lifecycle, f: F) -> FingerListener
    where
        F: Fn(&Finger, &Point) -> HandlerResult + 'static,
    {
        let listener = Listener::new(f);
        self.bus.on(stage, listener.clone());
        listener
    }

    pub fn once<F>(&self, stage: Lifecycle, f: F) -> FingerListener
    where
        F: Fn(&Finger, &Point) -> HandlerResult + 'static,
    {
        let listener = Listener::new(f);
        self.bus.once(stage, listener.clone());
        listener
    }

    /// Register an existing listener as persistent, upgrading a one-shot
    /// registration of it. No-op if it is already persistent.
    pub fn on_listener(&self, stage: Lifecycle, listener: &FingerListener) {
        self.bus.on(stage, listener.clone());
    }

    /// Register an existing listener as one-shot, downgrading a
    /// persistent registration of it.
    pub fn once_listener(&self, stage: Lifecycle, listener: &FingerListener) {
        self.bus.once(stage, listener.clone());
    }

    pub fn off(&self, stage: Lifecycle, listener: &FingerListener) {
        self.bus.off(&stage, listener);
    }

    /// Fire `stage` without touching the history.
    pub fn trigger(&self, stage: Lifecycle, point: &Point) -> HandlerResult {
        self.bus.trigger(self, &stage, point)
    }

    pub fn record_start(&self, point: Point) -> HandlerResult {
        self.record(Lifecycle::Start, point)
    }

    pub fn record_move(&self, point: Point) -> HandlerResult {
        self.record(Lifecycle::Move, point)
    }

    /// Append the lift-off point and fire `end`.
    ///
    /// Hand membership is left alone; the controller removes the finger.
    pub fn record_end(&self, point: Point) -> HandlerResult {
        self.record(Lifecycle::End, point)
    }

    fn record(&self, stage: Lifecycle, point: Point) -> HandlerResult {
        debug_assert_eq!(point.id, self.id, "point routed to the wrong finger");
        self.points.borrow_mut().push(point);
        self.trigger(stage, &point)
    }
}
