//! The element a session is bound to.
//!
//! Binding real listeners is the host's business: a browser binding, a
//! windowing toolkit or a test harness implements [`InputSurface`] and
//! forwards the events it receives to the session. The session only asks
//! the surface to start or stop delivering a kind of event, and keeps
//! the returned handles itself.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// Native event kinds a session listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
    MouseDown,
    MouseMove,
    MouseUp,
    MouseOut,
}

impl InputKind {
    pub const TOUCH: [InputKind; 4] = [
        InputKind::TouchStart,
        InputKind::TouchMove,
        InputKind::TouchEnd,
        InputKind::TouchCancel,
    ];

    pub const MOUSE: [InputKind; 4] = [
        InputKind::MouseDown,
        InputKind::MouseUp,
        InputKind::MouseOut,
        InputKind::MouseMove,
    ];

    /// DOM-style event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::TouchStart => "touchstart",
            InputKind::TouchMove => "touchmove",
            InputKind::TouchEnd => "touchend",
            InputKind::TouchCancel => "touchcancel",
            InputKind::MouseDown => "mousedown",
            InputKind::MouseMove => "mousemove",
            InputKind::MouseUp => "mouseup",
            InputKind::MouseOut => "mouseout",
        }
    }
}

/// Handle for one live subscription, returned by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Opaque identity of a node in the host's element tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

/// Host-side binding of a session to one element.
pub trait InputSurface {
    /// Start delivering events of `kind`.
    fn subscribe(&mut self, kind: InputKind) -> SubscriptionId;

    /// Stop delivering the events behind `subscription`.
    fn unsubscribe(&mut self, subscription: SubscriptionId);

    /// True if `node` is the bound element or one of its descendants.
    fn contains(&self, node: NodeId) -> bool;
}

/// In-memory surface: one element node, a set of descendants and the
/// subscriptions currently live.
#[derive(Debug, Clone)]
pub struct VirtualSurface {
    element: NodeId,
    descendants: HashSet<NodeId>,
    subscriptions: BTreeMap<SubscriptionId, InputKind>,
    next_id: u64,
}

impl VirtualSurface {
    pub fn new(element: NodeId) -> Self {
        Self {
            element,
            descendants: HashSet::new(),
            subscriptions: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Declare `node` as nested inside the element.
    pub fn with_descendant(mut self, node: NodeId) -> Self {
        self.descendants.insert(node);
        self
    }

    /// True if at least one subscription for `kind` is live.
    pub fn is_subscribed(&self, kind: InputKind) -> bool {
        self.subscriptions.values().any(|k| *k == kind)
    }

    /// Number of live subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

impl InputSurface for VirtualSurface {
    fn subscribe(&mut self, kind: InputKind) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.insert(id, kind);
        id
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) {
        self.subscriptions.remove(&subscription);
    }

    fn contains(&self, node: NodeId) -> bool {
        node == self.element || self.descendants.contains(&node)
    }
}
