//! Socket-style finger management for multi-touch input.
//!
//! A [`Session`] is bound to one input surface. It turns raw touch (and,
//! optionally, mouse) events into per-finger and per-gesture lifecycle
//! callbacks: every contact becomes a [`Finger`] with its own
//! `start`/`move`/`end` events, the main [`Hand`] tracks all of them, and
//! a cohort hand is rebuilt whenever the number of fingers down changes
//! so handlers keyed by finger count (`one` … `five`) see each gesture as
//! a whole.
//!
//! ```
//! use touchy::input::{NodeId, RawTouch, TouchEvent, TouchPhase, VirtualSurface};
//! use touchy::{Lifecycle, Session, SessionOptions};
//!
//! let options = SessionOptions::new().two(|hand, fingers| {
//!     assert_eq!(fingers.len(), 2);
//!     hand.on(Lifecycle::End, |_, points| {
//!         assert_eq!(points.len(), 2);
//!         Ok(())
//!     });
//!     Ok(())
//! });
//! let mut session = Session::new(VirtualSurface::new(NodeId(1)), options)?;
//!
//! let (a, b) = (RawTouch::new(1, 0.0, 0.0), RawTouch::new(2, 5.0, 5.0));
//! session.handle_touch(&TouchEvent::new(TouchPhase::Start, vec![a, b], vec![a, b], 0.0))?;
//! session.handle_touch(&TouchEvent::new(TouchPhase::End, vec![a, b], vec![], 16.0))?;
//! assert!(session.cohort().is_none());
//! # Ok::<(), touchy::TouchyError>(())
//! ```
//!
//! The library logs through `tracing` and never installs a subscriber.

pub mod error;
pub mod events;
pub mod handlers;
pub mod input;
pub mod model;
pub mod session;

// Re-export the main types for convenience
pub use error::{HandlerError, HandlerResult, Result, TouchyError};
pub use events::{EventBus, Lifecycle, Listener};
pub use handlers::{register_plugin, HandlerKey, PluginHandlers, PluginRegistry, SessionHandler};
pub use input::{InputSurface, MouseEvent, TouchEvent};
pub use model::{Finger, Hand, Point, SessionConfig, SessionOptions, TouchId};
pub use session::Session;

/// Bind a new, running session to `surface`.
///
/// `options` may be a [`SessionOptions`] or a bare handler closure, which
/// is registered under the `any` key.
pub fn create_session<S: InputSurface>(
    surface: S,
    options: impl Into<SessionOptions>,
) -> Result<Session<S>> {
    Session::new(surface, options)
}
