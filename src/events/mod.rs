//! Event system for finger and hand lifecycle notifications.
//!
//! Every [`Finger`](crate::model::Finger) and [`Hand`](crate::model::Hand)
//! owns an [`EventBus`] and delegates `on`/`once`/`off`/`trigger` to it.
//! Dispatch is synchronous: a `trigger` returns once every handler ran.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐  record_*()  ┌─────────────┐   trigger()   ┌──────────────┐
//! │   Session   │ ───────────► │ Finger/Hand │ ────────────► │  EventBus    │
//! │ controller  │              │             │               │ on + once    │
//! └─────────────┘              └─────────────┘               └──────┬───────┘
//!                                                                   │ (owner, payload)
//!                                                                   ▼
//!                                                            user handlers
//! ```
//!
//! # Module Structure
//!
//! - [`types`]: lifecycle event names (`Lifecycle`)
//! - [`bus`]: `EventBus` and `Listener`

pub mod bus;
pub mod types;

pub use bus::{EventBus, Listener};
pub use types::Lifecycle;
