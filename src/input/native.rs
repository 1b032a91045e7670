//! Raw platform events and their normalization into [`Point`]s.
//!
//! Field names follow the DOM (`identifier`, `pageX`, `relatedTarget`)
//! so recorded browser traces deserialize as-is.

use serde::{Deserialize, Serialize};

use super::surface::{InputKind, NodeId};
use crate::model::{Point, TouchId};

/// One contact as the platform reports it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTouch {
    pub identifier: u64,
    pub page_x: f64,
    pub page_y: f64,
}

impl RawTouch {
    pub fn new(identifier: u64, page_x: f64, page_y: f64) -> Self {
        Self {
            identifier,
            page_x,
            page_y,
        }
    }

    fn to_point(self, time: f64) -> Point {
        Point {
            id: TouchId(self.identifier),
            x: self.page_x,
            y: self.page_y,
            time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    Start,
    Move,
    End,
    /// The platform aborted the contact; handled exactly like `End`.
    Cancel,
}

impl TouchPhase {
    pub fn kind(&self) -> InputKind {
        match self {
            TouchPhase::Start => InputKind::TouchStart,
            TouchPhase::Move => InputKind::TouchMove,
            TouchPhase::End => InputKind::TouchEnd,
            TouchPhase::Cancel => InputKind::TouchCancel,
        }
    }
}

/// A touch event: the contacts that changed plus every contact still down.
///
/// `touches` is `None` when the source did not report the active set;
/// the session then derives it from the fingers it tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub changed: Vec<RawTouch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touches: Option<Vec<RawTouch>>,
    pub timestamp: f64,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, changed: Vec<RawTouch>, touches: Vec<RawTouch>, timestamp: f64) -> Self {
        Self {
            phase,
            changed,
            touches: Some(touches),
            timestamp,
        }
    }

    /// Event that reports only the changed contacts.
    pub fn changed_only(phase: TouchPhase, changed: Vec<RawTouch>, timestamp: f64) -> Self {
        Self {
            phase,
            changed,
            touches: None,
            timestamp,
        }
    }

    /// Changed contacts as points stamped with the event time.
    pub fn changed_points(&self) -> Vec<Point> {
        to_points(&self.changed, self.timestamp)
    }

    /// Active contacts as points stamped with the event time, if reported.
    pub fn active_points(&self) -> Option<Vec<Point>> {
        self.touches
            .as_deref()
            .map(|touches| to_points(touches, self.timestamp))
    }
}

fn to_points(touches: &[RawTouch], time: f64) -> Vec<Point> {
    touches.iter().map(|t| t.to_point(time)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MousePhase {
    Down,
    Move,
    Up,
    /// Pointer left an element; see [`MouseEvent::related_target`].
    Out,
}

impl MousePhase {
    pub fn kind(&self) -> InputKind {
        match self {
            MousePhase::Down => InputKind::MouseDown,
            MousePhase::Move => InputKind::MouseMove,
            MousePhase::Up => InputKind::MouseUp,
            MousePhase::Out => InputKind::MouseOut,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MouseEvent {
    pub phase: MousePhase,
    pub page_x: f64,
    pub page_y: f64,
    pub timestamp: f64,
    /// For `Out`: the node the pointer moved into, if any.
    #[serde(default)]
    pub related_target: Option<NodeId>,
}

impl MouseEvent {
    pub fn new(phase: MousePhase, page_x: f64, page_y: f64, timestamp: f64) -> Self {
        Self {
            phase,
            page_x,
            page_y,
            timestamp,
            related_target: None,
        }
    }

    pub fn with_related_target(mut self, node: NodeId) -> Self {
        self.related_target = Some(node);
        self
    }

    /// The event as a point of the emulated contact `id`.
    pub fn to_point(&self, id: TouchId) -> Point {
        Point {
            id,
            x: self.page_x,
            y: self.page_y,
            time: self.timestamp,
        }
    }
}

/// One entry of a recorded input trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputRecord {
    Touch(TouchEvent),
    Mouse(MouseEvent),
}

impl InputRecord {
    pub fn kind(&self) -> InputKind {
        match self {
            InputRecord::Touch(e) => e.phase.kind(),
            InputRecord::Mouse(e) => e.phase.kind(),
        }
    }
}
