//! Ordered set of fingers sharing batch-level lifecycle events.
//!
//! The same type plays two roles in a session:
//!
//! - the **main hand**, holding every active finger until it lifts off
//! - the **cohort**, rebuilt whenever the number of active fingers changes
//!
//! Membership is only mutated by the session controller. Handlers get
//! read access (`get`, `has`, `fingers`) and can subscribe to events.

use std::cell::RefCell;
use std::rc::Rc;

use super::finger::Finger;
use super::point::{Point, TouchId};
use crate::error::HandlerResult;
use crate::events::{EventBus, Lifecycle, Listener};

/// Listener type accepted by [`Hand::on`] and friends.
pub type HandListener = Listener<Hand, [Point]>;

#[derive(Debug, Default)]
pub struct Hand {
    fingers: RefCell<Vec<Rc<Finger>>>,
    bus: EventBus<Hand, [Point]>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a hand with one fresh finger per identifier, in order.
    pub(crate) fn with_ids(ids: impl IntoIterator<Item = TouchId>) -> Self {
        let hand = Self::new();
        for id in ids {
            hand.add(Rc::new(Finger::new(id)));
        }
        hand
    }

    /// Insert `finger` unless a finger with its id is already a member.
    pub(crate) fn add(&self, finger: Rc<Finger>) {
        if self.has(finger.id()) {
            return;
        }
        self.fingers.borrow_mut().push(finger);
    }

    /// Drop the member with `id`, returning it if present.
    pub(crate) fn remove(&self, id: TouchId) -> Option<Rc<Finger>> {
        let mut fingers = self.fingers.borrow_mut();
        let index = fingers.iter().position(|f| f.id() == id)?;
        Some(fingers.remove(index))
    }

    pub fn get(&self, id: TouchId) -> Option<Rc<Finger>> {
        self.fingers
            .borrow()
            .iter()
            .find(|f| f.id() == id)
            .cloned()
    }

    pub fn has(&self, id: TouchId) -> bool {
        self.fingers.borrow().iter().any(|f| f.id() == id)
    }

    pub fn len(&self) -> usize {
        self.fingers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingers.borrow().is_empty()
    }

    /// Member ids in hand order.
    pub fn ids(&self) -> Vec<TouchId> {
        self.fingers.borrow().iter().map(|f| f.id()).collect()
    }

    /// Snapshot of the members in hand order.
    pub fn fingers(&self) -> Vec<Rc<Finger>> {
        self.fingers.borrow().clone()
    }

    /// Latest point of every member that has one, in hand order.
    pub fn latest_points(&self) -> Vec<Point> {
        self.fingers
            .borrow()
            .iter()
            .filter_map(|f| f.latest_point())
            .collect()
    }

    pub fn on<F>(&self, stage: Lifecycle, f: F) -> HandListener
    where
        F: Fn(&Hand, &[Point]) -> HandlerResult + 'static,
    {
        let listener = Listener::new(f);
        self.bus.on(stage, listener.clone());
        listener
    }

    pub fn once<F>(&self, stage: Lifecycle, f: F) -> HandListener
    where
        F: Fn(&Hand, &[Point]) -> HandlerResult + 'static,
    {
        let listener = Listener::new(f);
        self.bus.once(stage, listener.clone());
        listener
    }

    /// Register an existing listener as persistent, upgrading a one-shot
    /// registration of it. No-op if it is already persistent.
    pub fn on_listener(&self, stage: Lifecycle, listener: &HandListener) {
        self.bus.on(stage, listener.clone());
    }

    /// Register an existing listener as one-shot, downgrading a
    /// persistent registration of it.
    pub fn once_listener(&self, stage: Lifecycle, listener: &HandListener) {
        self.bus.once(stage, listener.clone());
    }

    pub fn off(&self, stage: Lifecycle, listener: &HandListener) {
        self.bus.off(&stage, listener);
    }

    /// Fire a hand-level event with an explicit batch.
    pub fn trigger(&self, stage: Lifecycle, points: &[Point]) -> HandlerResult {
        self.bus.trigger(self, &stage, points)
    }

    pub fn fire_start(&self, points: &[Point]) -> HandlerResult {
        self.fire(Lifecycle::Start, points)
    }

    pub fn fire_move(&self, points: &[Point]) -> HandlerResult {
        self.fire(Lifecycle::Move, points)
    }

    pub fn fire_end(&self, points: &[Point]) -> HandlerResult {
        self.fire(Lifecycle::End, points)
    }

    /// Route each point to its member finger, then fire the hand event
    /// with every member's latest point in hand order.
    ///
    /// Points for non-members are skipped. Nothing fires at hand level
    /// if no point matched.
    fn fire(&self, stage: Lifecycle, points: &[Point]) -> HandlerResult {
        let mut matched = false;
        for point in points {
            let Some(finger) = self.get(point.id) else {
                continue;
            };
            matched = true;
            match stage {
                Lifecycle::Start => finger.record_start(*point)?,
                Lifecycle::Move => finger.record_move(*point)?,
                Lifecycle::End => finger.record_end(*point)?,
            }
        }
        if !matched {
            return Ok(());
        }
        self.trigger(stage, &self.latest_points())
    }
}
