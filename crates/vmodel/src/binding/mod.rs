//! # Value Binding
//!
//! A [`BindingRegistry`] maps a property key to the ordered observers that
//! want to hear about new values for it. Three kinds of observer exist:
//!
//! - a **callback**, invoked with `(key, value)`;
//! - a **target** implementing [`Settable`], whose `set(key, value)` is called;
//! - a **property bag**, into which the value is written directly.
//!
//! Observers are held weakly. The registry never keeps an observer alive, and
//! dead observers are dropped the next time their key is notified.
//!
//! ```ignore
//! let log: Rc<dyn Fn(&str, &Value)> = Rc::new(|key, value| println!("{key} = {value}"));
//! let mut registry = BindingRegistry::new();
//! registry.bind("Budget", Observer::Callback(Rc::downgrade(&log)));
//! registry.notify("Budget", &Value::from(250));
//! ```
//!
//! ## Cycles
//!
//! Two-way bindings (model → input → model) form cycles. A
//! [`BoundElement`] tracks the keys it is currently notifying and drops a
//! nested notification for the same key. A shared model
//! (`RefCell<Model>`) drops any delivery that arrives while it is being
//! updated. Either way the skip is logged at `warn` and the cycle ends.

pub mod element;

pub use element::{BoundElement, InputElement};

use indexmap::IndexMap;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{trace, warn};

use crate::error::Result;
use crate::value::Value;

/// Something that accepts keyed writes from a binding.
pub trait Settable {
    fn set(&self, key: &str, value: Value) -> Result<()>;
}

pub type Callback = dyn Fn(&str, &Value);

/// Plain key/value bag used as a passive observer.
pub type PropertyBag = RefCell<HashMap<String, Value>>;

#[derive(Clone)]
pub enum Observer {
    Callback(Weak<Callback>),
    Target(Weak<dyn Settable>),
    Properties(Weak<PropertyBag>),
}

impl Observer {
    pub fn callback<F>(f: &Rc<F>) -> Self
    where
        F: Fn(&str, &Value) + 'static,
    {
        let f: Rc<Callback> = f.clone();
        Observer::Callback(Rc::downgrade(&f))
    }

    pub fn target<T>(target: &Rc<T>) -> Self
    where
        T: Settable + 'static,
    {
        let target: Rc<dyn Settable> = target.clone();
        Observer::Target(Rc::downgrade(&target))
    }

    pub fn properties(bag: &Rc<PropertyBag>) -> Self {
        Observer::Properties(Rc::downgrade(bag))
    }

    /// Identity comparison: both refer to the same allocation.
    pub fn same(&self, other: &Observer) -> bool {
        match (self, other) {
            (Observer::Callback(a), Observer::Callback(b)) => Weak::ptr_eq(a, b),
            (Observer::Target(a), Observer::Target(b)) => Weak::ptr_eq(a, b),
            (Observer::Properties(a), Observer::Properties(b)) => Weak::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn is_alive(&self) -> bool {
        match self {
            Observer::Callback(w) => w.strong_count() > 0,
            Observer::Target(w) => w.strong_count() > 0,
            Observer::Properties(w) => w.strong_count() > 0,
        }
    }

    /// Hand `value` to the observer. Returns `false` when it has been dropped.
    fn deliver(&self, key: &str, value: &Value) -> bool {
        match self {
            Observer::Callback(w) => match w.upgrade() {
                Some(f) => {
                    f(key, value);
                    true
                }
                None => false,
            },
            Observer::Target(w) => match w.upgrade() {
                Some(target) => {
                    if let Err(err) = target.set(key, value.clone()) {
                        warn!(key, error = %err, "binding target rejected value");
                    }
                    true
                }
                None => false,
            },
            Observer::Properties(w) => match w.upgrade() {
                Some(bag) => {
                    match bag.try_borrow_mut() {
                        Ok(mut bag) => {
                            bag.insert(key.to_string(), value.clone());
                        }
                        Err(_) => warn!(key, "property bag is borrowed, skipping delivery"),
                    }
                    true
                }
                None => false,
            },
        }
    }
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Observer::Callback(_) => "Callback",
            Observer::Target(_) => "Target",
            Observer::Properties(_) => "Properties",
        };
        write!(f, "{kind}(alive: {})", self.is_alive())
    }
}

#[derive(Debug, Default)]
pub struct BindingRegistry {
    entries: IndexMap<String, Vec<Observer>>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `observer` for `key`. Returns `false` if it was already bound.
    pub fn bind(&mut self, key: impl Into<String>, observer: Observer) -> bool {
        let list = self.entries.entry(key.into()).or_default();
        if list.iter().any(|existing| existing.same(&observer)) {
            return false;
        }
        list.push(observer);
        true
    }

    /// Remove one observer, or the whole key when `observer` is `None`.
    /// Returns whether anything was removed.
    pub fn unbind(&mut self, key: &str, observer: Option<&Observer>) -> bool {
        match observer {
            None => self.entries.shift_remove(key).is_some(),
            Some(observer) => {
                let Some(list) = self.entries.get_mut(key) else {
                    return false;
                };
                let before = list.len();
                list.retain(|existing| !existing.same(observer));
                let removed = list.len() != before;
                if list.is_empty() {
                    self.entries.shift_remove(key);
                }
                removed
            }
        }
    }

    /// Deliver `value` to every live observer of `key`, in registration order.
    /// Returns how many observers were reached.
    pub fn notify(&mut self, key: &str, value: &Value) -> usize {
        let observers = self.observers(key);
        let (delivered, dead) = fan_out(&observers, key, value);
        if dead > 0 {
            self.prune(key);
        }
        delivered
    }

    /// Snapshot of the observers bound to `key`.
    ///
    /// Callers that cannot hold the registry across delivery (because an
    /// observer may bind or unbind on it) fan out over this copy with
    /// [`fan_out`] and call [`BindingRegistry::prune`] afterwards.
    pub fn observers(&self, key: &str) -> Vec<Observer> {
        self.entries.get(key).cloned().unwrap_or_default()
    }

    /// Number of observers bound to `key`, dead ones included until pruned.
    pub fn observer_count(&self, key: &str) -> usize {
        self.entries.get(key).map_or(0, Vec::len)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop the dead observers of `key`.
    pub fn prune(&mut self, key: &str) {
        if let Some(list) = self.entries.get_mut(key) {
            list.retain(Observer::is_alive);
            if list.is_empty() {
                self.entries.shift_remove(key);
            }
        }
    }
}

/// Deliver `value` to each of `observers` in order.
/// Returns `(delivered, dead)`.
pub fn fan_out(observers: &[Observer], key: &str, value: &Value) -> (usize, usize) {
    let mut delivered = 0;
    let mut dead = 0;
    for observer in observers {
        if observer.deliver(key, value) {
            delivered += 1;
        } else {
            dead += 1;
        }
    }
    trace!(key, delivered, "notified observers");
    (delivered, dead)
}
