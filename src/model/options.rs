//! Session configuration.
//!
//! Two layers:
//!
//! - [`SessionConfig`]: the serializable part (mouse emulation flag and
//!   per-plugin JSON), loadable from a config file
//! - [`SessionOptions`]: the config plus the user's handlers, built in code

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::constants::DEFAULT_HANDLE_MOUSE;
use super::{Finger, Hand};
use crate::error::{HandlerResult, Result};
use crate::handlers::{HandlerKey, HandlerSet, SessionHandler};

/// Serializable session settings.
///
/// ```json
/// { "handleMouse": true, "plugins": { "hold": { "ms": 300 } } }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SessionConfig {
    /// Treat mouse input as a one-finger touch stream.
    #[serde(default = "default_handle_mouse")]
    pub handle_mouse: bool,
    /// Plugin name → plugin-specific configuration.
    #[serde(default)]
    pub plugins: BTreeMap<String, Value>,
}

fn default_handle_mouse() -> bool {
    DEFAULT_HANDLE_MOUSE
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            handle_mouse: DEFAULT_HANDLE_MOUSE,
            plugins: BTreeMap::new(),
        }
    }
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

/// Everything a session is built from.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub config: SessionConfig,
    pub handlers: HandlerSet,
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: SessionConfig) -> Self {
        Self {
            config,
            handlers: HandlerSet::new(),
        }
    }

    pub fn handle_mouse(mut self, enabled: bool) -> Self {
        self.config.handle_mouse = enabled;
        self
    }

    /// Configure the plugin registered as `name`.
    pub fn plugin(mut self, name: impl Into<String>, config: Value) -> Self {
        self.config.plugins.insert(name.into(), config);
        self
    }

    /// Add a handler under `key`.
    pub fn handler<F>(mut self, key: HandlerKey, f: F) -> Self
    where
        F: Fn(&Rc<Hand>, &[Rc<Finger>]) -> HandlerResult + 'static,
    {
        self.handlers.push(key, SessionHandler::new(f));
        self
    }

    /// Called for every new finger with the main hand.
    pub fn any<F>(self, f: F) -> Self
    where
        F: Fn(&Rc<Hand>, &[Rc<Finger>]) -> HandlerResult + 'static,
    {
        self.handler(HandlerKey::Any, f)
    }

    pub fn one<F>(self, f: F) -> Self
    where
        F: Fn(&Rc<Hand>, &[Rc<Finger>]) -> HandlerResult + 'static,
    {
        self.handler(HandlerKey::One, f)
    }

    pub fn two<F>(self, f: F) -> Self
    where
        F: Fn(&Rc<Hand>, &[Rc<Finger>]) -> HandlerResult + 'static,
    {
        self.handler(HandlerKey::Two, f)
    }

    pub fn three<F>(self, f: F) -> Self
    where
        F: Fn(&Rc<Hand>, &[Rc<Finger>]) -> HandlerResult + 'static,
    {
        self.handler(HandlerKey::Three, f)
    }

    pub fn four<F>(self, f: F) -> Self
    where
        F: Fn(&Rc<Hand>, &[Rc<Finger>]) -> HandlerResult + 'static,
    {
        self.handler(HandlerKey::Four, f)
    }

    pub fn five<F>(self, f: F) -> Self
    where
        F: Fn(&Rc<Hand>, &[Rc<Finger>]) -> HandlerResult + 'static,
    {
        self.handler(HandlerKey::Five, f)
    }

    /// Add a handler for cohorts of `count` fingers.
    ///
    /// Counts without a key (0, or above five) can never fire, so the
    /// handler is dropped.
    pub fn on_count<F>(self, count: usize, f: F) -> Self
    where
        F: Fn(&Rc<Hand>, &[Rc<Finger>]) -> HandlerResult + 'static,
    {
        match HandlerKey::for_count(count) {
            Some(key) => self.handler(key, f),
            None => {
                tracing::warn!(count, "No handler key for this finger count, handler dropped");
                self
            }
        }
    }
}

/// A bare function is shorthand for `{ any: f }`.
impl<F> From<F> for SessionOptions
where
    F: Fn(&Rc<Hand>, &[Rc<Finger>]) -> HandlerResult + 'static,
{
    fn from(f: F) -> Self {
        SessionOptions::new().any(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TouchyError;

    #[test]
    fn test_config_defaults() {
        let config = SessionConfig::default();
        assert!(!config.handle_mouse);
        assert!(config.plugins.is_empty());
    }

    #[test]
    fn test_config_from_empty_object() {
        let config = SessionConfig::from_json("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_config_from_json() {
        let config = SessionConfig::from_json(
            r#"{ "handleMouse": true, "plugins": { "hold": { "ms": 300 } } }"#,
        )
        .unwrap();
        assert!(config.handle_mouse);
        assert_eq!(config.plugins["hold"]["ms"], 300);
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let err = SessionConfig::from_json(r#"{ "handle_mouse": true }"#).unwrap_err();
        assert!(matches!(err, TouchyError::InvalidConfig(_)));
    }

    #[test]
    fn test_config_load_missing_file() {
        let err = SessionConfig::load("/nonexistent/touchy/config.json").unwrap_err();
        assert!(matches!(err, TouchyError::Io(_)));
    }

    #[test]
    fn test_builder_collects_handlers() {
        let options = SessionOptions::new()
            .handle_mouse(true)
            .any(|_, _| Ok(()))
            .two(|_, _| Ok(()))
            .on_count(5, |_, _| Ok(()))
            .on_count(6, |_, _| Ok(()))
            .plugin("hold", serde_json::json!({}));

        assert!(options.config.handle_mouse);
        assert!(options.handlers.has(HandlerKey::Any));
        assert!(options.handlers.has(HandlerKey::Two));
        assert!(options.handlers.has(HandlerKey::Five));
        assert!(!options.handlers.has(HandlerKey::One));
        assert!(options.config.plugins.contains_key("hold"));
    }

    #[test]
    fn test_bare_function_means_any() {
        let options =
            SessionOptions::from(|_: &Rc<Hand>, _: &[Rc<Finger>]| -> HandlerResult { Ok(()) });
        assert_eq!(options.handlers.get(HandlerKey::Any).len(), 1);
        assert!(!options.config.handle_mouse);
    }
}
