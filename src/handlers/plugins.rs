//! Plugin registry for custom touch handling.
//!
//! A plugin is looked up by the name of an option the session was
//! configured with. It receives the bound surface plus that option's
//! JSON value and returns extra handlers, which the session composes
//! ahead of the user's own, in registration order.
//!
//! # Usage
//!
//! ```ignore
//! use touchy::handlers::plugins::{self, PluginHandlers};
//! use touchy::handlers::SessionHandler;
//!
//! plugins::register_plugin("tap", |_surface, _config| {
//!     Ok(PluginHandlers::Any(SessionHandler::new(|_hand, _fingers| Ok(()))))
//! })?;
//! ```
//!
//! The default registry is thread-local: sessions and their handlers are
//! single-threaded, and so is the registry they consult.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use serde_json::Value;

use super::dispatcher::{HandlerKey, HandlerSet, SessionHandler};
use crate::error::{Result, TouchyError};
use crate::input::InputSurface;

/// What a plugin contributes.
#[derive(Debug, Clone)]
pub enum PluginHandlers {
    /// A single handler, registered under the `any` key.
    Any(SessionHandler),
    /// Handlers for explicit keys.
    Keyed(Vec<(HandlerKey, SessionHandler)>),
}

impl PluginHandlers {
    pub fn into_set(self) -> HandlerSet {
        let mut set = HandlerSet::new();
        match self {
            PluginHandlers::Any(handler) => set.push(HandlerKey::Any, handler),
            PluginHandlers::Keyed(handlers) => {
                for (key, handler) in handlers {
                    set.push(key, handler);
                }
            }
        }
        set
    }
}

/// Factory turning a surface and plugin config into handlers.
pub type Plugin = Rc<dyn Fn(&dyn InputSurface, &Value) -> Result<PluginHandlers>>;

/// Name → plugin map, in registration order. Names can be registered once.
#[derive(Clone, Default)]
pub struct PluginRegistry {
    plugins: IndexMap<String, Plugin>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `plugin` under `name`.
    ///
    /// Fails with [`TouchyError::DuplicatePlugin`] if the name is taken.
    pub fn register<F>(&mut self, name: impl Into<String>, plugin: F) -> Result<()>
    where
        F: Fn(&dyn InputSurface, &Value) -> Result<PluginHandlers> + 'static,
    {
        let name = name.into();
        if self.plugins.contains_key(&name) {
            return Err(TouchyError::DuplicatePlugin(name));
        }
        tracing::debug!(plugin = %name, "Registered plugin");
        self.plugins.insert(name, Rc::new(plugin));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Plugin> {
        self.plugins.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }

    /// Registered plugins, oldest registration first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Plugin)> {
        self.plugins.iter().map(|(name, plugin)| (name.as_str(), plugin))
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.plugins.keys()).finish()
    }
}

thread_local! {
    static REGISTRY: RefCell<PluginRegistry> = RefCell::new(PluginRegistry::new());
}

/// Register a plugin in this thread's default registry.
pub fn register_plugin<F>(name: impl Into<String>, plugin: F) -> Result<()>
where
    F: Fn(&dyn InputSurface, &Value) -> Result<PluginHandlers> + 'static,
{
    REGISTRY.with(|registry| registry.borrow_mut().register(name, plugin))
}

/// Snapshot of this thread's default registry.
pub fn default_registry() -> PluginRegistry {
    REGISTRY.with(|registry| registry.borrow().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{NodeId, VirtualSurface};

    fn noop() -> SessionHandler {
        SessionHandler::new(|_, _| Ok(()))
    }

    #[test]
    fn test_register_then_lookup() {
        let mut registry = PluginRegistry::new();
        registry
            .register("tap", |_, _| Ok(PluginHandlers::Any(noop())))
            .unwrap();
        assert!(registry.contains("tap"));
        assert!(registry.get("tap").is_some());
        assert!(registry.get("swipe").is_none());
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut registry = PluginRegistry::new();
        registry
            .register("tap", |_, _| Ok(PluginHandlers::Any(noop())))
            .unwrap();

        let err = registry
            .register("tap", |_, _| Ok(PluginHandlers::Any(noop())))
            .unwrap_err();

        assert!(matches!(err, TouchyError::DuplicatePlugin(ref name) if name == "tap"));
        assert_eq!(registry.names().count(), 1);
    }

    #[test]
    fn test_plugin_receives_config() {
        let mut registry = PluginRegistry::new();
        registry
            .register("hold", |_, config| {
                let ms = config["ms"].as_u64().ok_or_else(|| TouchyError::Plugin {
                    name: "hold".into(),
                    reason: "missing ms".into(),
                })?;
                assert_eq!(ms, 300);
                Ok(PluginHandlers::Keyed(vec![(HandlerKey::One, noop())]))
            })
            .unwrap();

        let surface = VirtualSurface::new(NodeId(1));
        let plugin = registry.get("hold").unwrap();
        let set = plugin(&surface, &serde_json::json!({ "ms": 300 }))
            .unwrap()
            .into_set();
        assert!(set.has(HandlerKey::One));

        assert!(plugin(&surface, &Value::Null).is_err());
    }

    #[test]
    fn test_registration_order_is_kept() {
        let mut registry = PluginRegistry::new();
        for name in ["zoom", "drag", "hold"] {
            registry
                .register(name, |_, _| Ok(PluginHandlers::Any(noop())))
                .unwrap();
        }
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["zoom", "drag", "hold"]);
        let iterated: Vec<&str> = registry.iter().map(|(name, _)| name).collect();
        assert_eq!(iterated, vec!["zoom", "drag", "hold"]);
    }

    #[test]
    fn test_any_output_maps_to_any_key() {
        let set = PluginHandlers::Any(noop()).into_set();
        assert_eq!(set.get(HandlerKey::Any).len(), 1);
    }

    #[test]
    fn test_default_registry_is_per_thread() {
        register_plugin("thread-local-tap", |_, _| Ok(PluginHandlers::Any(noop()))).unwrap();
        assert!(default_registry().contains("thread-local-tap"));
        assert!(register_plugin("thread-local-tap", |_, _| {
            Ok(PluginHandlers::Any(noop()))
        })
        .is_err());

        let seen_elsewhere = std::thread::spawn(|| default_registry().contains("thread-local-tap"))
            .join()
            .unwrap();
        assert!(!seen_elsewhere);
    }
}
