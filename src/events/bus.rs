//! Named publish/subscribe bus with one-shot subscriptions.
//!
//! Every `Finger` and `Hand` owns one of these. Handlers are invoked
//! synchronously, on the caller's stack, in registration order:
//! persistent handlers first, then one-shot handlers.
//!
//! The bus never owns its owner. Instead of binding `this`, `trigger`
//! takes the owner by reference and hands it to each listener, so a
//! finger's handlers never need to capture the finger itself.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use super::types::Lifecycle;
use crate::error::HandlerResult;

/// A registered callback.
///
/// Identity is the identity of the underlying allocation: clones of a
/// `Listener` compare equal, two listeners built from identical closures
/// do not.
pub struct Listener<T: ?Sized, A: ?Sized>(Rc<dyn Fn(&T, &A) -> HandlerResult>);

impl<T: ?Sized, A: ?Sized> Listener<T, A> {
    /// Wrap a closure as a listener.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&T, &A) -> HandlerResult + 'static,
    {
        Self(Rc::new(f))
    }

    /// True if both handles refer to the same callback.
    pub fn same(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }

    fn call(&self, owner: &T, args: &A) -> HandlerResult {
        (self.0)(owner, args)
    }
}

impl<T: ?Sized, A: ?Sized> Clone for Listener<T, A> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: ?Sized, A: ?Sized> fmt::Debug for Listener<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", Rc::as_ptr(&self.0))
    }
}

type HandlerMap<N, T, A> = HashMap<N, Vec<Listener<T, A>>>;

/// Publish/subscribe bus keyed by event name.
///
/// `T` is the owner passed to listeners, `A` the payload type and `N`
/// the event name type (lifecycle stages by default).
///
/// # Example
///
/// ```
/// use touchy::events::{EventBus, Lifecycle, Listener};
///
/// let bus: EventBus<(), u32> = EventBus::new();
/// bus.on(Lifecycle::Move, Listener::new(|_, n: &u32| {
///     assert_eq!(*n, 7);
///     Ok(())
/// }));
/// bus.trigger(&(), &Lifecycle::Move, &7).unwrap();
/// ```
pub struct EventBus<T: ?Sized, A: ?Sized, N = Lifecycle> {
    on_handlers: RefCell<HandlerMap<N, T, A>>,
    once_handlers: RefCell<HandlerMap<N, T, A>>,
}

impl<T: ?Sized, A: ?Sized, N> EventBus<T, A, N>
where
    N: Eq + Hash + Clone,
{
    /// Create an empty bus.
    pub fn new() -> Self {
        Self {
            on_handlers: RefCell::new(HashMap::new()),
            once_handlers: RefCell::new(HashMap::new()),
        }
    }

    /// Register a persistent handler.
    ///
    /// No-op if `listener` is already persistent for `name`. A one-shot
    /// registration of the same listener is upgraded to persistent.
    pub fn on(&self, name: N, listener: Listener<T, A>) {
        if contains(&self.on_handlers.borrow(), &name, &listener) {
            return;
        }
        remove(&mut self.once_handlers.borrow_mut(), &name, &listener);
        self.on_handlers
            .borrow_mut()
            .entry(name)
            .or_default()
            .push(listener);
    }

    /// Register a one-shot handler.
    ///
    /// No-op if `listener` is already one-shot for `name`. A persistent
    /// registration of the same listener is downgraded to one-shot.
    pub fn once(&self, name: N, listener: Listener<T, A>) {
        if contains(&self.once_handlers.borrow(), &name, &listener) {
            return;
        }
        remove(&mut self.on_handlers.borrow_mut(), &name, &listener);
        self.once_handlers
            .borrow_mut()
            .entry(name)
            .or_default()
            .push(listener);
    }

    /// Remove `listener` from whichever category holds it for `name`.
    pub fn off(&self, name: &N, listener: &Listener<T, A>) {
        if remove(&mut self.on_handlers.borrow_mut(), name, listener) {
            return;
        }
        remove(&mut self.once_handlers.borrow_mut(), name, listener);
    }

    /// Invoke every handler registered for `name`.
    ///
    /// The handler list is snapshotted first, so listeners may register
    /// or remove handlers on this bus while it dispatches. A one-shot
    /// handler is unregistered right before it runs. The first failing
    /// handler aborts the rest of the dispatch.
    pub fn trigger(&self, owner: &T, name: &N, args: &A) -> HandlerResult {
        let persistent = snapshot(&self.on_handlers.borrow(), name);
        let one_shot = snapshot(&self.once_handlers.borrow(), name);

        for listener in &persistent {
            listener.call(owner, args)?;
        }

        for listener in &one_shot {
            // Already fired by a nested trigger, or removed with `off`
            if !remove(&mut self.once_handlers.borrow_mut(), name, listener) {
                continue;
            }
            listener.call(owner, args)?;
        }

        Ok(())
    }

    /// Number of handlers (both categories) registered for `name`.
    pub fn listener_count(&self, name: &N) -> usize {
        let on = self.on_handlers.borrow().get(name).map_or(0, Vec::len);
        let once = self.once_handlers.borrow().get(name).map_or(0, Vec::len);
        on + once
    }

    /// True if no handler is registered under any name.
    pub fn is_empty(&self) -> bool {
        self.on_handlers.borrow().is_empty() && self.once_handlers.borrow().is_empty()
    }
}

impl<T: ?Sized, A: ?Sized, N> Default for EventBus<T, A, N>
where
    N: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized, A: ?Sized, N> fmt::Debug for EventBus<T, A, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on: usize = self.on_handlers.borrow().values().map(Vec::len).sum();
        let once: usize = self.once_handlers.borrow().values().map(Vec::len).sum();
        f.debug_struct("EventBus")
            .field("on", &on)
            .field("once", &once)
            .finish()
    }
}

fn contains<N, T, A>(map: &HandlerMap<N, T, A>, name: &N, listener: &Listener<T, A>) -> bool
where
    N: Eq + Hash,
    T: ?Sized,
    A: ?Sized,
{
    map.get(name)
        .is_some_and(|list| list.iter().any(|l| l.same(listener)))
}

/// Remove `listener` from `name`'s list; drops the list once empty.
fn remove<N, T, A>(map: &mut HandlerMap<N, T, A>, name: &N, listener: &Listener<T, A>) -> bool
where
    N: Eq + Hash,
    T: ?Sized,
    A: ?Sized,
{
    let Some(list) = map.get_mut(name) else {
        return false;
    };
    let Some(index) = list.iter().position(|l| l.same(listener)) else {
        return false;
    };
    list.remove(index);
    if list.is_empty() {
        map.remove(name);
    }
    true
}

fn snapshot<N, T, A>(map: &HandlerMap<N, T, A>, name: &N) -> Vec<Listener<T, A>>
where
    N: Eq + Hash,
    T: ?Sized,
    A: ?Sized,
{
    map.get(name).cloned().unwrap_or_default()
}
