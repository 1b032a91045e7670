//! Normalized contact samples.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one physical contact (or the emulated mouse contact).
///
/// The platform never reuses an identifier while it is still tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TouchId(pub u64);

impl fmt::Display for TouchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for TouchId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// One timestamped position sample of a contact.
///
/// Coordinates are page coordinates; `time` is the platform timestamp
/// in milliseconds. Points are immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: TouchId,
    pub x: f64,
    pub y: f64,
    pub time: f64,
}

impl Point {
    pub fn new(id: impl Into<TouchId>, x: f64, y: f64, time: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            time,
        }
    }
}
