//! Input handling module.
//!
//! This module contains:
//! - surface.rs: the element binding (`InputSurface`) and an in-memory surface
//! - native.rs: raw touch/mouse events and their normalization
//! - mouse.rs: mouse emulation as a one-finger touch stream

pub mod mouse;
pub mod native;
pub mod surface;

pub use mouse::{MouseAction, MouseEmulator};
pub use native::{InputRecord, MouseEvent, MousePhase, RawTouch, TouchEvent, TouchPhase};
pub use surface::{InputKind, InputSurface, NodeId, SubscriptionId, VirtualSurface};
