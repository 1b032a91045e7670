//! Session controller: turns raw touch and mouse input on one element
//! into finger, hand and cohort lifecycle events.
//!
//! # State
//!
//! ```text
//! fingers   TouchId → Rc<Finger>   every active contact (sole owner)
//! main_hand Hand                   same fingers, in touch-down order
//! cohort    Option<Hand>           "everything down right now", rebuilt
//!                                  with fresh fingers on every count change
//! ```
//!
//! # Transitions
//!
//! ```text
//! begin(changed, active)   new fingers → `any` handlers → finger start
//!                          → main hand start → cohort rebuild
//! update(changed, active)  finger move → main hand move
//!                          → cohort move (or rebuild if membership drifted)
//! release(changed, active) finger end → main hand end → cohort rebuild
//! ```
//!
//! A finger-level event always fires before the hand-level batch that
//! contains it. Identifiers the controller does not track are skipped on
//! every path. A failing handler aborts the rest of the transition.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::events::Lifecycle;
use crate::handlers::{HandlerKey, HandlerSet, PluginRegistry};
use crate::handlers::plugins::default_registry;
use crate::input::{
    InputKind, InputSurface, MouseAction, MouseEmulator, MouseEvent, SubscriptionId, TouchEvent,
    TouchPhase,
};
use crate::model::{Finger, Hand, Point, SessionOptions, TouchId};

/// Gesture session bound to one input surface.
pub struct Session<S: InputSurface> {
    surface: S,
    handle_mouse: bool,
    handlers: HandlerSet,
    fingers: HashMap<TouchId, Rc<Finger>>,
    main_hand: Rc<Hand>,
    cohort: Option<Rc<Hand>>,
    mouse: MouseEmulator,
    subscriptions: Vec<SubscriptionId>,
    running: bool,
}

impl<S: InputSurface> Session<S> {
    /// Build a session using this thread's default plugin registry, and
    /// start it.
    pub fn new(surface: S, options: impl Into<SessionOptions>) -> Result<Self> {
        Self::with_registry(surface, options, &default_registry())
    }

    /// Build a session using an explicit plugin registry, and start it.
    pub fn with_registry(
        surface: S,
        options: impl Into<SessionOptions>,
        registry: &PluginRegistry,
    ) -> Result<Self> {
        let options = options.into();
        let handle_mouse = options.config.handle_mouse;
        let handlers = compose_handlers(&surface, options, registry)?;

        let mut session = Self {
            surface,
            handle_mouse,
            handlers,
            fingers: HashMap::new(),
            main_hand: Rc::new(Hand::new()),
            cohort: None,
            mouse: MouseEmulator::new(),
            subscriptions: Vec::new(),
            running: false,
        };
        session.start();
        Ok(session)
    }

    /// Subscribe to the surface's input. No-op while running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;

        let mouse_kinds: &[InputKind] = if self.handle_mouse {
            &InputKind::MOUSE
        } else {
            &[]
        };
        for kind in InputKind::TOUCH.iter().chain(mouse_kinds) {
            let subscription = self.surface.subscribe(*kind);
            self.subscriptions.push(subscription);
        }
        debug!(
            subscriptions = self.subscriptions.len(),
            handle_mouse = self.handle_mouse,
            "Session started"
        );
    }

    /// Drop every subscription taken by `start`. No-op while stopped.
    ///
    /// Tracked fingers and the cohort are kept as they are.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;

        for subscription in self.subscriptions.drain(..) {
            self.surface.unsubscribe(subscription);
        }
        debug!("Session stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn handles_mouse(&self) -> bool {
        self.handle_mouse
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The hand holding every active finger.
    pub fn main_hand(&self) -> &Rc<Hand> {
        &self.main_hand
    }

    /// The current cohort, if any finger is down.
    pub fn cohort(&self) -> Option<&Rc<Hand>> {
        self.cohort.as_ref()
    }

    /// Number of fingers in the current cohort (0 when there is none).
    pub fn cohort_size(&self) -> usize {
        self.cohort.as_ref().map_or(0, |c| c.len())
    }

    /// Tracked finger for `id`.
    pub fn finger(&self, id: TouchId) -> Option<Rc<Finger>> {
        self.fingers.get(&id).cloned()
    }

    /// Number of tracked fingers.
    pub fn active_count(&self) -> usize {
        self.fingers.len()
    }

    /// Feed a platform touch event. Ignored while stopped.
    ///
    /// Without a reported active set, the tracked fingers stand in for it.
    pub fn handle_touch(&mut self, event: &TouchEvent) -> Result<()> {
        if !self.running {
            trace!(kind = event.phase.kind().as_str(), "Session stopped, touch ignored");
            return Ok(());
        }

        let changed = event.changed_points();
        let active = event
            .active_points()
            .unwrap_or_else(|| self.implied_active(&changed));
        match event.phase {
            TouchPhase::Start => self.begin(&changed, &active),
            TouchPhase::Move => self.update(&changed, &active),
            TouchPhase::End | TouchPhase::Cancel => self.release(&changed, &active),
        }
    }

    /// Feed a platform mouse event. Ignored unless mouse emulation is on
    /// and the session runs.
    pub fn handle_mouse(&mut self, event: &MouseEvent) -> Result<()> {
        if !self.running || !self.handle_mouse {
            return Ok(());
        }

        let surface = &self.surface;
        let fingers = &self.fingers;
        let action = self.mouse.interpret(
            event,
            |node| surface.contains(node),
            |id| fingers.contains_key(&id),
        );

        match action {
            MouseAction::Ignore => Ok(()),
            MouseAction::Begin { stale, fresh } => {
                if let Some(stale) = stale {
                    debug!(id = %stale, "Releasing stale mouse contact");
                    let points = [event.to_point(stale)];
                    self.release(&points, &points)?;
                }
                let points = [event.to_point(fresh)];
                self.begin(&points, &points)
            }
            MouseAction::Move(id) => {
                let points = [event.to_point(id)];
                self.update(&points, &points)
            }
            MouseAction::Release(id) => {
                let points = [event.to_point(id)];
                self.release(&points, &points)
            }
        }
    }

    /// Contacts in `changed` touched down; `active` lists every contact
    /// now down.
    pub fn begin(&mut self, changed: &[Point], active: &[Point]) -> Result<()> {
        let mut started = Vec::with_capacity(changed.len());
        for point in changed {
            if self.fingers.contains_key(&point.id) {
                trace!(id = %point.id, "Begin for tracked identifier ignored");
                continue;
            }
            let finger = Rc::new(Finger::new(point.id));
            self.fingers.insert(point.id, Rc::clone(&finger));
            self.main_hand.add(Rc::clone(&finger));
            debug!(id = %point.id, "Finger down");
            started.push((finger, *point));
        }

        for (finger, point) in &started {
            self.handlers
                .dispatch(HandlerKey::Any, &self.main_hand, std::slice::from_ref(finger))?;
            finger.record_start(*point)?;
        }

        if !started.is_empty() {
            let points: Vec<Point> = started.iter().map(|(_, point)| *point).collect();
            self.main_hand.trigger(Lifecycle::Start, &points)?;
        }

        self.restart_cohort(active)
    }

    /// Contacts in `changed` moved; `active` lists every contact down.
    pub fn update(&mut self, changed: &[Point], active: &[Point]) -> Result<()> {
        let mut moved = Vec::with_capacity(changed.len());
        for point in changed {
            let Some(finger) = self.fingers.get(&point.id) else {
                trace!(id = %point.id, "Move for untracked identifier ignored");
                continue;
            };
            finger.record_move(*point)?;
            moved.push(*point);
        }

        if !moved.is_empty() {
            self.main_hand.trigger(Lifecycle::Move, &moved)?;
        }

        if self.cohort_matches(active) {
            if let Some(cohort) = &self.cohort {
                cohort.fire_move(&moved)?;
            }
            Ok(())
        } else {
            debug!("Active set changed during move, rebuilding cohort");
            self.restart_cohort(active)
        }
    }

    /// Contacts in `changed` lifted off (or were cancelled).
    ///
    /// `active` may or may not still list them; they are removed either way.
    pub fn release(&mut self, changed: &[Point], active: &[Point]) -> Result<()> {
        let mut ended = Vec::with_capacity(changed.len());
        for point in changed {
            let Some(finger) = self.fingers.remove(&point.id) else {
                trace!(id = %point.id, "Release for untracked identifier ignored");
                continue;
            };
            self.main_hand.remove(point.id);
            debug!(id = %point.id, "Finger up");
            finger.record_end(*point)?;
            ended.push(*point);
        }

        if !ended.is_empty() {
            self.main_hand.trigger(Lifecycle::End, &ended)?;
        }

        let released: HashSet<TouchId> = changed.iter().map(|p| p.id).collect();
        let remaining: Vec<Point> = active
            .iter()
            .filter(|p| !released.contains(&p.id))
            .copied()
            .collect();
        self.restart_cohort(&remaining)
    }

    /// Close the current cohort and open a new one over `active`.
    fn restart_cohort(&mut self, active: &[Point]) -> Result<()> {
        self.destroy_cohort()?;

        let points = self.tracked(active);
        if points.is_empty() {
            return Ok(());
        }

        let cohort = Rc::new(Hand::with_ids(points.iter().map(|p| p.id)));
        self.cohort = Some(Rc::clone(&cohort));
        debug!(size = cohort.len(), "Cohort started");

        if let Some(key) = HandlerKey::for_count(cohort.len()) {
            self.handlers.dispatch(key, &cohort, &cohort.fingers())?;
        }
        cohort.fire_start(&points)?;
        Ok(())
    }

    /// End every cohort finger at its last known point, then the cohort.
    fn destroy_cohort(&mut self) -> Result<()> {
        let Some(cohort) = self.cohort.take() else {
            return Ok(());
        };
        debug!(size = cohort.len(), "Cohort ended");

        let mut points = Vec::with_capacity(cohort.len());
        for finger in cohort.fingers() {
            let Some(point) = finger.latest_point() else {
                continue;
            };
            finger.trigger(Lifecycle::End, &point)?;
            points.push(point);
        }
        cohort.trigger(Lifecycle::End, &points)?;
        Ok(())
    }

    /// Points of `active` the controller tracks, first occurrence only.
    fn tracked(&self, active: &[Point]) -> Vec<Point> {
        let mut seen = HashSet::new();
        active
            .iter()
            .filter(|p| self.fingers.contains_key(&p.id) && seen.insert(p.id))
            .copied()
            .collect()
    }

    /// Active set for an event that did not report one: every tracked
    /// finger at its latest point, overridden or extended by `changed`.
    fn implied_active(&self, changed: &[Point]) -> Vec<Point> {
        let mut active = self.main_hand.latest_points();
        for point in changed {
            match active.iter_mut().find(|p| p.id == point.id) {
                Some(slot) => *slot = *point,
                None => active.push(*point),
            }
        }
        active
    }

    fn cohort_matches(&self, active: &[Point]) -> bool {
        let tracked: HashSet<TouchId> = self.tracked(active).iter().map(|p| p.id).collect();
        let members: HashSet<TouchId> = self
            .cohort
            .as_ref()
            .map(|c| c.ids().into_iter().collect())
            .unwrap_or_default();
        tracked == members
    }
}

impl<S: InputSurface> Drop for Session<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Plugin-derived handlers first (registration order), then the user's.
fn compose_handlers(
    surface: &dyn InputSurface,
    options: SessionOptions,
    registry: &PluginRegistry,
) -> Result<HandlerSet> {
    let SessionOptions {
        config,
        handlers: mut base,
    } = options;

    for name in config.plugins.keys().filter(|name| !registry.contains(name)) {
        warn!(plugin = %name, "No plugin registered under this name, option ignored");
    }

    let mut derived = HandlerSet::new();
    for (name, plugin) in registry.iter() {
        let Some(plugin_config) = config.plugins.get(name) else {
            continue;
        };
        let output = plugin(surface, plugin_config)?;
        debug!(plugin = %name, "Plugin handlers composed");
        derived.extend(output.into_set());
    }

    base.prepend(derived);
    Ok(base)
}
