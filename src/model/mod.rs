//! Touch domain model.
//!
//! Pure Rust, no platform dependencies: points, fingers, hands, the
//! session configuration and its constants.

pub mod constants;
pub mod finger;
pub mod hand;
pub mod options;
pub mod point;

pub use finger::{Finger, FingerListener};
pub use hand::{Hand, HandListener};
pub use options::{SessionConfig, SessionOptions};
pub use point::{Point, TouchId};
