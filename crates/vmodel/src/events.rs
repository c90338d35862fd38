//! Named-event pub/sub owned by each model.
//!
//! Listeners are registered under an event name and receive an immutable
//! [`Event`]. The names a model fires:
//!
//! | Name | When |
//! |------|------|
//! | `change` | any field accepted a write |
//! | `change:<key>` | field `<key>` accepted a write |
//! | `beforesave` | a save is about to go out; listeners may veto |
//! | `save` | the transport reported success |

use indexmap::IndexMap;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::model::Model;
use crate::value::Value;

pub type ListenerId = u64;

pub type Listener = Rc<dyn Fn(&Event<'_>)>;

pub const CHANGE: &str = "change";
pub const BEFORE_SAVE: &str = "beforesave";
pub const SAVE: &str = "save";

/// Name of the per-field change event, `change:<key>`.
pub fn field_change(key: &str) -> String {
    format!("{CHANGE}:{key}")
}

/// Payload handed to listeners.
pub enum Event<'a> {
    Change {
        model: &'a Model,
        key: &'a str,
        value: &'a Value,
    },
    FieldChange {
        model: &'a Model,
        key: &'a str,
        value: &'a Value,
    },
    BeforeSave {
        model: &'a Model,
        veto: &'a Cell<bool>,
    },
    Save {
        model: &'a Model,
        response: &'a serde_json::Value,
    },
}

impl Event<'_> {
    /// The name this event is dispatched under.
    pub fn name(&self) -> String {
        match self {
            Event::Change { .. } => CHANGE.to_string(),
            Event::FieldChange { key, .. } => field_change(key),
            Event::BeforeSave { .. } => BEFORE_SAVE.to_string(),
            Event::Save { .. } => SAVE.to_string(),
        }
    }

    pub fn model(&self) -> &Model {
        match self {
            Event::Change { model, .. }
            | Event::FieldChange { model, .. }
            | Event::BeforeSave { model, .. }
            | Event::Save { model, .. } => *model,
        }
    }

    /// The accepted value, for change events.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Event::Change { value, .. } | Event::FieldChange { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Cancel the pending save. No-op for other events.
    pub fn veto(&self) {
        if let Event::BeforeSave { veto, .. } = self {
            veto.set(true);
        }
    }
}

impl fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name())
            .field("value", &self.value())
            .finish()
    }
}

#[derive(Default)]
pub struct Events {
    listeners: IndexMap<String, Vec<(ListenerId, Listener)>>,
    next_id: ListenerId,
}

impl fmt::Debug for Events {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<_> = self
            .listeners
            .iter()
            .map(|(name, list)| (name.as_str(), list.len()))
            .collect();
        f.debug_struct("Events").field("listeners", &counts).finish()
    }
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `listener` to `name`. Listeners run in subscription order.
    pub fn on<F>(&mut self, name: impl Into<String>, listener: F) -> ListenerId
    where
        F: Fn(&Event<'_>) + 'static,
    {
        self.next_id += 1;
        let id = self.next_id;
        let listener: Listener = Rc::new(listener);
        self.listeners
            .entry(name.into())
            .or_default()
            .push((id, listener));
        id
    }

    /// Remove one subscription. Returns whether it existed.
    pub fn off(&mut self, name: &str, id: ListenerId) -> bool {
        let Some(list) = self.listeners.get_mut(name) else {
            return false;
        };
        let before = list.len();
        list.retain(|(existing, _)| *existing != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.listeners.shift_remove(name);
        }
        removed
    }

    /// Subscribe a batch of handlers, e.g. a model type's declared listen map.
    pub fn listen<I, S>(&mut self, handlers: I) -> Vec<(String, ListenerId)>
    where
        I: IntoIterator<Item = (S, Listener)>,
        S: Into<String>,
    {
        handlers
            .into_iter()
            .map(|(name, listener)| {
                let name = name.into();
                self.next_id += 1;
                let id = self.next_id;
                self.listeners
                    .entry(name.clone())
                    .or_default()
                    .push((id, listener));
                (name, id)
            })
            .collect()
    }

    /// Undo a [`Events::listen`].
    pub fn stop_listening(&mut self, subscriptions: &[(String, ListenerId)]) {
        for (name, id) in subscriptions {
            self.off(name, *id);
        }
    }

    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners.get(name).map_or(0, Vec::len)
    }

    /// Dispatch `event` to every listener of its name.
    pub fn fire(&self, event: &Event<'_>) {
        let name = event.name();
        if let Some(list) = self.listeners.get(&name) {
            for (_, listener) in list {
                listener(event);
            }
        }
    }
}
