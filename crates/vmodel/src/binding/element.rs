//! Binding for UI input controls.
//!
//! [`BoundElement`] wraps anything implementing [`InputElement`] and adds a
//! [`BindingRegistry`]. Programmatic writes through [`BoundElement::set`]
//! notify observers, and for user-editable properties (`value`, `checked`,
//! `selected` on `input`/`select` controls) a change listener is attached so
//! edits made by the user reach observers too. At most one listener is
//! attached per key, however many observers are bound to it.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};
use tracing::{trace, warn};

use super::{fan_out, BindingRegistry, Observer, Settable};
use crate::error::Result;
use crate::value::Value;

const EDITABLE_NODES: &[&str] = &["input", "select"];
const EDITABLE_PROPS: &[&str] = &["value", "checked", "selected"];

/// The slice of a UI control a binding needs.
pub trait InputElement {
    /// Tag name, e.g. `INPUT`. Compared case-insensitively.
    fn node_name(&self) -> &str;

    fn get(&self, key: &str) -> Value;

    fn set(&mut self, key: &str, value: Value);

    /// Register a callback for the control's user-change event.
    fn add_change_listener(&mut self, listener: Rc<dyn Fn()>);
}

/// Whether user interaction can change `key` on a control named `node_name`.
pub fn is_user_editable(node_name: &str, key: &str) -> bool {
    EDITABLE_NODES
        .iter()
        .any(|node| node.eq_ignore_ascii_case(node_name))
        && EDITABLE_PROPS.contains(&key)
}

struct ElementInner<E> {
    element: RefCell<E>,
    registry: RefCell<BindingRegistry>,
    listening: RefCell<HashSet<String>>,
    notifying: RefCell<HashSet<String>>,
    this: Weak<ElementInner<E>>,
}

impl<E: InputElement + 'static> ElementInner<E> {
    /// Fan `value` out to the observers of `key`.
    ///
    /// No registry borrow is held while observers run, so they may bind or
    /// unbind on this element. A nested notification for a key already in
    /// flight is a cycle and is dropped; other keys go through.
    fn notify(&self, key: &str, value: &Value) {
        if !self.notifying.borrow_mut().insert(key.to_string()) {
            warn!(key, "element already notifying this key, skipping re-entrant delivery");
            return;
        }
        let observers = self.registry.borrow().observers(key);
        let (_, dead) = fan_out(&observers, key, value);
        if dead > 0 {
            self.registry.borrow_mut().prune(key);
        }
        self.notifying.borrow_mut().remove(key);
    }

    fn write(&self, key: &str, value: Value) -> bool {
        match self.element.try_borrow_mut() {
            Ok(mut element) => {
                element.set(key, value);
                true
            }
            Err(_) => {
                warn!(key, "element is busy, dropping write");
                false
            }
        }
    }

    fn on_user_change(&self, key: &str) {
        let value = match self.element.try_borrow() {
            Ok(element) => element.get(key),
            Err(_) => return,
        };
        trace!(key, %value, "user edit");
        self.notify(key, &value);
    }

    fn listen(&self, key: &str) {
        if !self.listening.borrow_mut().insert(key.to_string()) {
            return;
        }
        let this = self.this.clone();
        let key = key.to_string();
        let listener: Rc<dyn Fn()> = Rc::new(move || {
            if let Some(inner) = this.upgrade() {
                inner.on_user_change(&key);
            }
        });
        self.element.borrow_mut().add_change_listener(listener);
    }
}

impl<E: InputElement + 'static> Settable for ElementInner<E> {
    fn set(&self, key: &str, value: Value) -> Result<()> {
        if self.write(key, value.clone()) {
            self.notify(key, &value);
        }
        Ok(())
    }
}

/// Handle to a bound UI control. Clones share the same control and registry.
pub struct BoundElement<E> {
    inner: Rc<ElementInner<E>>,
}

impl<E> Clone for BoundElement<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E: InputElement + 'static> BoundElement<E> {
    pub fn new(element: E) -> Self {
        let inner = Rc::new_cyclic(|this| ElementInner {
            element: RefCell::new(element),
            registry: RefCell::new(BindingRegistry::new()),
            listening: RefCell::new(HashSet::new()),
            notifying: RefCell::new(HashSet::new()),
            this: this.clone(),
        });
        Self { inner }
    }

    /// Bind `observer` to `key`, wiring the user-change listener if needed.
    pub fn bind(&self, key: &str, observer: Observer) -> bool {
        let editable = is_user_editable(self.inner.element.borrow().node_name(), key);
        if editable {
            self.inner.listen(key);
        }
        self.inner.registry.borrow_mut().bind(key, observer)
    }

    /// Remove one observer, or every observer of `key`. The change listener,
    /// once attached, stays for the element's lifetime.
    pub fn unbind(&self, key: &str, observer: Option<&Observer>) -> bool {
        self.inner.registry.borrow_mut().unbind(key, observer)
    }

    pub fn get(&self, key: &str) -> Value {
        self.inner.element.borrow().get(key)
    }

    /// Programmatic write followed by notification.
    pub fn set(&self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        if self.inner.write(key, value.clone()) {
            self.inner.notify(key, &value);
        }
    }

    /// This element as a binding target, for binding a model field to it.
    pub fn observer(&self) -> Observer {
        Observer::target(&self.inner)
    }

    pub fn observer_count(&self, key: &str) -> usize {
        self.inner.registry.borrow().observer_count(key)
    }

    /// Keys with a user-change listener attached.
    pub fn listening_keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.inner.listening.borrow().iter().cloned().collect();
        keys.sort();
        keys
    }

    /// Run `f` against the wrapped control.
    pub fn with_element<R>(&self, f: impl FnOnce(&E) -> R) -> R {
        f(&self.inner.element.borrow())
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    //! A scriptable stand-in for a UI control.

    use super::*;
    use std::collections::HashMap;

    /// Fake control whose state is shared with a [`UserHandle`] so tests can
    /// simulate user edits while the control itself sits inside a binding.
    pub struct FakeInput {
        node_name: String,
        props: Rc<RefCell<HashMap<String, Value>>>,
        listeners: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
    }

    #[derive(Clone)]
    pub struct UserHandle {
        props: Rc<RefCell<HashMap<String, Value>>>,
        listeners: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
    }

    impl FakeInput {
        pub fn new(node_name: &str) -> (Self, UserHandle) {
            let props: Rc<RefCell<HashMap<String, Value>>> = Rc::default();
            let listeners: Rc<RefCell<Vec<Rc<dyn Fn()>>>> = Rc::default();
            let input = Self {
                node_name: node_name.to_string(),
                props: props.clone(),
                listeners: listeners.clone(),
            };
            (input, UserHandle { props, listeners })
        }
    }

    impl InputElement for FakeInput {
        fn node_name(&self) -> &str {
            &self.node_name
        }

        fn get(&self, key: &str) -> Value {
            self.props.borrow().get(key).cloned().unwrap_or_default()
        }

        fn set(&mut self, key: &str, value: Value) {
            self.props.borrow_mut().insert(key.to_string(), value);
        }

        fn add_change_listener(&mut self, listener: Rc<dyn Fn()>) {
            self.listeners.borrow_mut().push(listener);
        }
    }

    impl UserHandle {
        /// Type into the control: update the property, then fire `change`.
        pub fn edit(&self, key: &str, value: impl Into<Value>) {
            self.props.borrow_mut().insert(key.to_string(), value.into());
            let listeners: Vec<_> = self.listeners.borrow().clone();
            for listener in listeners {
                listener();
            }
        }

        pub fn listener_count(&self) -> usize {
            self.listeners.borrow().len()
        }

        pub fn value(&self, key: &str) -> Value {
            self.props.borrow().get(key).cloned().unwrap_or_default()
        }
    }
}
