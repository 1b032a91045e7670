//! Gesture session state machine.

pub mod controller;

pub use controller::Session;
