//! Mouse emulation: presents a mouse as a one-finger touch stream.
//!
//! Each press gets a fresh random identifier; it is never reused after
//! the button goes up. A press while an earlier identifier is still
//! active (the `up` was lost) first releases the stale identifier.

use super::native::{MouseEvent, MousePhase};
use super::surface::NodeId;
use crate::model::TouchId;

/// What a mouse event means for the touch state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    /// Nothing to do.
    Ignore,
    /// Release `stale` (if any), then begin `fresh`.
    Begin {
        stale: Option<TouchId>,
        fresh: TouchId,
    },
    Move(TouchId),
    Release(TouchId),
}

/// Tracks the synthetic identifier of the current press.
#[derive(Debug, Default)]
pub struct MouseEmulator {
    active: Option<TouchId>,
}

impl MouseEmulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier of the press in progress.
    pub fn active(&self) -> Option<TouchId> {
        self.active
    }

    /// Translate `event` and update the active identifier.
    ///
    /// `inside` tells whether a node belongs to the bound element; an
    /// `Out` into such a node is ignored. `taken` reports identifiers
    /// already tracked so a fresh token never collides with them.
    pub fn interpret(
        &mut self,
        event: &MouseEvent,
        inside: impl Fn(NodeId) -> bool,
        taken: impl Fn(TouchId) -> bool,
    ) -> MouseAction {
        match event.phase {
            MousePhase::Down => {
                let stale = self.active.take();
                let fresh = fresh_id(|id| taken(id) || Some(id) == stale);
                self.active = Some(fresh);
                MouseAction::Begin { stale, fresh }
            }
            MousePhase::Move => self.active.map_or(MouseAction::Ignore, MouseAction::Move),
            MousePhase::Out if event.related_target.is_some_and(&inside) => MouseAction::Ignore,
            MousePhase::Up | MousePhase::Out => {
                self.active.take().map_or(MouseAction::Ignore, MouseAction::Release)
            }
        }
    }
}

fn fresh_id(taken: impl Fn(TouchId) -> bool) -> TouchId {
    loop {
        let id = TouchId(rand::random());
        if !taken(id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(phase: MousePhase) -> MouseEvent {
        MouseEvent::new(phase, 0.0, 0.0, 0.0)
    }

    fn outside(_: NodeId) -> bool {
        false
    }

    fn free(_: TouchId) -> bool {
        false
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut mouse = MouseEmulator::new();
        assert_eq!(
            mouse.interpret(&event(MousePhase::Move), outside, free),
            MouseAction::Ignore
        );
        assert_eq!(
            mouse.interpret(&event(MousePhase::Up), outside, free),
            MouseAction::Ignore
        );
    }

    #[test]
    fn test_press_move_release_cycle() {
        let mut mouse = MouseEmulator::new();
        let MouseAction::Begin { stale, fresh } =
            mouse.interpret(&event(MousePhase::Down), outside, free)
        else {
            panic!("press should begin a contact");
        };
        assert_eq!(stale, None);
        assert_eq!(mouse.active(), Some(fresh));

        assert_eq!(
            mouse.interpret(&event(MousePhase::Move), outside, free),
            MouseAction::Move(fresh)
        );
        assert_eq!(
            mouse.interpret(&event(MousePhase::Up), outside, free),
            MouseAction::Release(fresh)
        );
        assert_eq!(mouse.active(), None);
    }

    #[test]
    fn test_second_press_releases_stale_id() {
        let mut mouse = MouseEmulator::new();
        let MouseAction::Begin { fresh: first, .. } =
            mouse.interpret(&event(MousePhase::Down), outside, free)
        else {
            panic!("press should begin a contact");
        };

        let action = mouse.interpret(&event(MousePhase::Down), outside, free);

        let MouseAction::Begin { stale, fresh } = action else {
            panic!("press should begin a contact");
        };
        assert_eq!(stale, Some(first));
        assert_ne!(fresh, first);
    }

    #[test]
    fn test_out_into_descendant_is_ignored() {
        let mut mouse = MouseEmulator::new();
        mouse.interpret(&event(MousePhase::Down), outside, free);

        let into_child = event(MousePhase::Out).with_related_target(NodeId(2));
        assert_eq!(
            mouse.interpret(&into_child, |n| n == NodeId(2), free),
            MouseAction::Ignore
        );
        assert!(mouse.active().is_some());

        let leaving = event(MousePhase::Out).with_related_target(NodeId(3));
        assert!(matches!(
            mouse.interpret(&leaving, |n| n == NodeId(2), free),
            MouseAction::Release(_)
        ));
    }

    #[test]
    fn test_out_to_nowhere_releases() {
        let mut mouse = MouseEmulator::new();
        mouse.interpret(&event(MousePhase::Down), outside, free);
        assert!(matches!(
            mouse.interpret(&event(MousePhase::Out), |_| true, free),
            MouseAction::Release(_)
        ));
    }

    #[test]
    fn test_fresh_id_skips_taken_ids() {
        let first = fresh_id(free);
        let second = fresh_id(|id| id == first);
        assert_ne!(first, second);
    }
}
