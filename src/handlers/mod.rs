//! Session handlers and plugins.
//!
//! - dispatcher.rs: handler keys, ordered handler lists, dispatch
//! - plugins.rs: plugin registry and plugin output

pub mod dispatcher;
pub mod plugins;

pub use dispatcher::{HandlerKey, HandlerSet, SessionHandler, UnknownHandlerKey};
pub use plugins::{register_plugin, Plugin, PluginHandlers, PluginRegistry};
