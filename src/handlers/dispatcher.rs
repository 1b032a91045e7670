//! Count-keyed session handlers and their dispatch.
//!
//! A session fans lifecycle batches out to handlers keyed by how many
//! fingers are down (`one` … `five`) plus the `any` key, which sees every
//! new finger individually.
//!
//! # Architecture
//!
//! ```text
//! user handlers ─┐
//!                ├─► HandlerSet (ordered Vec per key) ─► dispatch(key, hand, fingers)
//! plugin output ─┘
//! ```
//!
//! Composition happens once, when the session is built. Dispatch walks
//! the list for one key in order and stops at the first error.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::error::HandlerResult;
use crate::model::constants::{HANDLER_NAMES, MAX_KEYED_FINGERS};
use crate::model::{Finger, Hand};

/// Which handler list a callback belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HandlerKey {
    /// Every new finger, with the main hand.
    Any,
    One,
    Two,
    Three,
    Four,
    Five,
}

impl HandlerKey {
    /// Count keys, indexed by finger count minus one.
    const BY_COUNT: [HandlerKey; MAX_KEYED_FINGERS] = [
        HandlerKey::One,
        HandlerKey::Two,
        HandlerKey::Three,
        HandlerKey::Four,
        HandlerKey::Five,
    ];

    /// Key for a cohort of `count` fingers; `None` for 0 or more than 5.
    pub fn for_count(count: usize) -> Option<HandlerKey> {
        count
            .checked_sub(1)
            .and_then(|index| Self::BY_COUNT.get(index))
            .copied()
    }

    /// Finger count this key stands for; `None` for `Any`.
    pub fn count(&self) -> Option<usize> {
        match self {
            HandlerKey::Any => None,
            HandlerKey::One => Some(1),
            HandlerKey::Two => Some(2),
            HandlerKey::Three => Some(3),
            HandlerKey::Four => Some(4),
            HandlerKey::Five => Some(5),
        }
    }

    pub fn as_str(&self) -> &'static str {
        HANDLER_NAMES[self.count().unwrap_or(0)]
    }
}

impl fmt::Display for HandlerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown handler name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown handler key: {0}")]
pub struct UnknownHandlerKey(pub String);

impl FromStr for HandlerKey {
    type Err = UnknownHandlerKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(HandlerKey::Any),
            _ => HANDLER_NAMES
                .iter()
                .position(|name| *name == s)
                .and_then(HandlerKey::for_count)
                .ok_or_else(|| UnknownHandlerKey(s.to_string())),
        }
    }
}

/// Callback invoked with a hand and the fingers that triggered it.
///
/// `any` handlers get the main hand and a single new finger; count
/// handlers get the cohort and all of its fingers in cohort order.
#[derive(Clone)]
pub struct SessionHandler(Rc<dyn Fn(&Rc<Hand>, &[Rc<Finger>]) -> HandlerResult>);

impl SessionHandler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Rc<Hand>, &[Rc<Finger>]) -> HandlerResult + 'static,
    {
        Self(Rc::new(f))
    }

    pub fn call(&self, hand: &Rc<Hand>, fingers: &[Rc<Finger>]) -> HandlerResult {
        (self.0)(hand, fingers)
    }
}

impl fmt::Debug for SessionHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionHandler({:p})", Rc::as_ptr(&self.0))
    }
}

/// Ordered handler lists per key.
#[derive(Debug, Clone, Default)]
pub struct HandlerSet {
    handlers: HashMap<HandlerKey, Vec<SessionHandler>>,
}

impl HandlerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `handler` to the list for `key`.
    pub fn push(&mut self, key: HandlerKey, handler: SessionHandler) {
        self.handlers.entry(key).or_default().push(handler);
    }

    /// Append `other`'s handlers after the ones already held, key by key.
    pub fn extend(&mut self, other: HandlerSet) {
        for (key, list) in other.handlers {
            self.handlers.entry(key).or_default().extend(list);
        }
    }

    /// Place `other`'s handlers ahead of the ones already held, key by key.
    pub fn prepend(&mut self, other: HandlerSet) {
        for (key, mut first) in other.handlers {
            let list = self.handlers.entry(key).or_default();
            first.append(list);
            *list = first;
        }
    }

    pub fn get(&self, key: HandlerKey) -> &[SessionHandler] {
        self.handlers
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has(&self, key: HandlerKey) -> bool {
        !self.get(key).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.values().all(Vec::is_empty)
    }

    /// Run every handler for `key` in order; the first error stops the run.
    pub fn dispatch(
        &self,
        key: HandlerKey,
        hand: &Rc<Hand>,
        fingers: &[Rc<Finger>],
    ) -> HandlerResult {
        for handler in self.get(key) {
            handler.call(hand, fingers)?;
        }
        Ok(())
    }
}
