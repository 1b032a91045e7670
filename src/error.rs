//! Error types.
//!
//! Three kinds of failure exist: configuration errors (raised when a
//! plugin is registered or a session is configured), handler errors
//! (returned by user callbacks and propagated out of the dispatch that
//! invoked them) and I/O while loading config files. Unknown touch
//! identifiers are not errors at all; the controller skips them.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TouchyError>;

/// What every listener and session handler returns.
pub type HandlerResult = std::result::Result<(), HandlerError>;

/// Errors surfaced by the session controller and its configuration.
#[derive(Debug, Error)]
pub enum TouchyError {
    /// A plugin with this name is already registered.
    #[error("Touchy: {0} plugin already defined")]
    DuplicatePlugin(String),

    /// A plugin rejected the configuration it was given.
    #[error("Plugin '{name}' rejected its configuration: {reason}")]
    Plugin { name: String, reason: String },

    /// Config JSON could not be parsed.
    #[error("Invalid session config: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// Config file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// A user handler failed; the rest of that dispatch was skipped.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

/// Failure returned by a user-supplied callback.
#[derive(Debug, Error)]
#[error("handler failed: {inner}")]
pub struct HandlerError {
    inner: Box<dyn StdError + Send + Sync>,
}

impl HandlerError {
    /// Wrap any error produced inside a handler.
    pub fn new<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self { inner: err.into() }
    }

    /// Build an error from a plain message.
    pub fn msg(message: impl fmt::Display) -> Self {
        Self::new(message.to_string())
    }

    /// The wrapped error.
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.inner.as_ref()
    }
}
