//! # The Change-Tracking Model
//!
//! A [`Model`] is one instance of a [`ModelSchema`]: an ordered set of fields,
//! each either a plain value or a [`ValidatedProperty`], plus the bookkeeping
//! around them.
//!
//! ## Write Path
//!
//! ```text
//! set(key, value)
//!   ├─ custom setter?  → setter(model, value)      (usually via Model::store)
//!   ├─ validated field → ValidatedProperty::set     (rules, then value map)
//!   └─ plain field     → assign
//!
//!   rejected → errors[key] = error, return Ok(false); nothing else happens
//!   accepted → errors[key] cleared, changed = true,
//!              fire "change" and "change:<key>", notify bound observers
//! ```
//!
//! ## Change Tracking
//!
//! `originals` is a snapshot of [`Model::fields`] taken at construction and
//! on every [`Model::establish_originals`]. [`Model::changes`] is the per-key
//! diff against it. The `changed` flag is separate: it is raised by any
//! accepted write, even one that restores an original value.
//!
//! ## Composition
//!
//! Each model owns its own [`Events`], [`BindingRegistry`] and
//! [`ModelOptions`]. None of them are shared between instances.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::cell::{Cell, RefCell};
use std::sync::Arc;
use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::binding::{BindingRegistry, Observer, Settable};
use crate::config::ModelOptions;
use crate::error::{ModelError, Result, ValidationError};
use crate::events::{Event, Events, ListenerId};
use crate::persist::{SaveOutcome, SaveTransport, SkipReason};
use crate::property::ValidatedProperty;
use crate::schema::ModelSchema;
use crate::value::Value;

/// Storage slot for one field.
#[derive(Debug, Clone)]
pub enum Field {
    Plain(Value),
    Validated(ValidatedProperty),
}

impl Field {
    pub fn value(&self) -> &Value {
        match self {
            Field::Plain(value) => value,
            Field::Validated(prop) => prop.get(),
        }
    }

    pub fn is_validated(&self) -> bool {
        matches!(self, Field::Validated(_))
    }
}

#[derive(Debug)]
pub struct Model {
    id: Uuid,
    schema: Arc<ModelSchema>,
    fields: IndexMap<String, Field>,
    originals: IndexMap<String, Value>,
    changed: bool,
    errors: IndexMap<String, ValidationError>,
    events: Events,
    bindings: BindingRegistry,
    options: ModelOptions,
    saved_at: Option<DateTime<Utc>>,
}

impl Model {
    /// Build an instance from `schema`, overriding defaults with `initial`.
    ///
    /// Initial values are stored as given, without validation. Fails with
    /// [`ModelError::UnknownField`] for a key the schema does not declare and
    /// with [`ModelError::UnknownRule`] for a rule the engine cannot run.
    pub fn new<'k, I>(schema: Arc<ModelSchema>, initial: I, options: ModelOptions) -> Result<Self>
    where
        I: IntoIterator<Item = (&'k str, Value)>,
    {
        let mut merged = schema.defaults().clone();
        for (key, value) in initial {
            match merged.get_mut(key) {
                Some(slot) => *slot = value,
                None => return Err(ModelError::unknown_field(key)),
            }
        }

        for (key, _) in schema.all_rules() {
            if !schema.has_field(key) {
                warn!(model = schema.name(), key, "rules declared for an undeclared field");
            }
        }

        let engine = schema.rule_engine();
        let mut fields = IndexMap::with_capacity(merged.len());
        for (key, value) in merged {
            let field = match schema.rules_for(&key) {
                Some(rules) => Field::Validated(ValidatedProperty::new(
                    key.clone(),
                    value,
                    rules.clone(),
                    Arc::clone(engine),
                )?),
                None => Field::Plain(value),
            };
            fields.insert(key, field);
        }

        let mut model = Self {
            id: Uuid::new_v4(),
            schema,
            fields,
            originals: IndexMap::new(),
            changed: false,
            errors: IndexMap::new(),
            events: Events::new(),
            bindings: BindingRegistry::new(),
            options,
            saved_at: None,
        };
        model.establish_originals();
        debug!(model = model.schema.name(), id = %model.id, "model created");
        Ok(model)
    }

    /// An instance with schema defaults and default options.
    pub fn from_schema(schema: Arc<ModelSchema>) -> Result<Self> {
        Self::new(schema, [], ModelOptions::default())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.get(key)
    }

    /// Read `key`, through its custom getter if the schema has one.
    pub fn get(&self, key: &str) -> Result<Value> {
        if let Some(get) = self.schema.accessor(key).and_then(|a| a.get) {
            return get(self);
        }
        self.raw(key)
    }

    /// Read the stored value of `key`, bypassing custom getters.
    pub fn raw(&self, key: &str) -> Result<Value> {
        self.fields
            .get(key)
            .map(|field| field.value().clone())
            .ok_or_else(|| ModelError::unknown_field(key))
    }

    /// Write `key`.
    ///
    /// Returns `Ok(true)` when the value was accepted and `Ok(false)` when a
    /// rule rejected it; the rejection is then available from
    /// [`Model::error`]. Unknown keys are an `Err` and leave the model as it
    /// was.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<bool> {
        let value = value.into();
        trace!(model = self.schema.name(), key, %value, "set");

        let custom = self.schema.accessor(key).and_then(|a| a.set);
        let outcome = match custom {
            Some(set) => set(self, value.clone()),
            None => self.store(key, value.clone()),
        };

        match outcome {
            Ok(()) => {}
            Err(ModelError::Invalid(err)) => {
                let err = if err.field().is_empty() {
                    err.for_field(key)
                } else {
                    err
                };
                trace!(key, error = %err, "write rejected");
                self.errors.insert(key.to_string(), err);
                return Ok(false);
            }
            Err(other) => return Err(other),
        }

        self.errors.shift_remove(key);
        self.changed = true;

        // Keys handled only by a custom setter have no slot; report the input.
        let stored = self
            .fields
            .get(key)
            .map(|field| field.value().clone())
            .unwrap_or(value);

        self.events.fire(&Event::Change {
            model: self,
            key,
            value: &stored,
        });
        self.events.fire(&Event::FieldChange {
            model: self,
            key,
            value: &stored,
        });
        self.bindings.notify(key, &stored);
        Ok(true)
    }

    /// Guarded write without notification: validate, map, store.
    ///
    /// This is what custom setters call to keep the field's rules in force.
    pub fn store(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        match self.fields.get_mut(key) {
            Some(Field::Validated(prop)) => prop.set(value.into())?,
            Some(Field::Plain(slot)) => *slot = value.into(),
            None => return Err(ModelError::unknown_field(key)),
        }
        Ok(())
    }

    /// Every field as a plain value, in declaration order.
    ///
    /// A field with a failing custom getter falls back to its stored value
    /// (logged at `warn`), so [`Model::changes`] reflects the stored value too.
    pub fn fields(&self) -> IndexMap<String, Value> {
        self.fields
            .iter()
            .map(|(key, field)| {
                let value = match self.schema.accessor(key).and_then(|a| a.get) {
                    Some(get) => get(self).unwrap_or_else(|err| {
                        warn!(key = key.as_str(), error = %err, "custom getter failed, using stored value");
                        field.value().clone()
                    }),
                    None => field.value().clone(),
                };
                (key.clone(), value)
            })
            .collect()
    }

    /// Fields whose value differs from the last snapshot.
    pub fn changes(&self) -> IndexMap<String, Value> {
        self.fields()
            .into_iter()
            .filter(|(key, value)| self.originals.get(key) != Some(value))
            .collect()
    }

    pub fn originals(&self) -> &IndexMap<String, Value> {
        &self.originals
    }

    pub fn has_changes(&self) -> bool {
        self.changed
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Adopt the current values as the new baseline.
    pub fn establish_originals(&mut self) {
        self.originals = self.fields();
        self.changed = false;
        trace!(model = self.schema.name(), "originals established");
    }

    pub fn clear_changes(&mut self) {
        self.establish_originals();
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &IndexMap<String, ValidationError> {
        &self.errors
    }

    pub fn error(&self, key: &str) -> Option<&ValidationError> {
        self.errors.get(key)
    }

    /// Payload for the save transport, as shaped by the schema's hooks.
    pub fn data_for_saving(&self) -> serde_json::Value {
        self.schema.save_hooks().data_for_saving(self)
    }

    /// Persist through `transport`.
    ///
    /// Skips when nothing changed (unless `force`) or when no save URL is
    /// configured. The schema's `on_before_save` hook and any `beforesave`
    /// listener can veto.
    pub fn save<T>(&mut self, transport: &mut T, force: bool) -> SaveOutcome
    where
        T: SaveTransport + ?Sized,
    {
        if !self.changed && !force {
            debug!(model = self.schema.name(), "nothing to save");
            return SaveOutcome::Skipped(SkipReason::NoChanges);
        }
        let Some(url) = self.options.save_url().map(str::to_string) else {
            debug!(model = self.schema.name(), "no save url configured");
            return SaveOutcome::Skipped(SkipReason::NoSaveUrl);
        };

        let hooks = Arc::clone(self.schema.save_hooks());
        if !hooks.on_before_save(self) {
            debug!(model = self.schema.name(), "save vetoed by hook");
            return SaveOutcome::Vetoed;
        }
        let veto = Cell::new(false);
        self.events.fire(&Event::BeforeSave {
            model: self,
            veto: &veto,
        });
        if veto.get() {
            debug!(model = self.schema.name(), "save vetoed by listener");
            return SaveOutcome::Vetoed;
        }

        let payload = hooks.data_for_saving(self);
        match transport.send(&url, &payload) {
            Ok(response) => {
                hooks.on_save_complete(self, &response);
                self.saved_at = Some(Utc::now());
                if self.options.commit_on_save {
                    self.establish_originals();
                }
                hooks.on_after_save(self);
                self.events.fire(&Event::Save {
                    model: self,
                    response: &response,
                });
                debug!(model = self.schema.name(), id = %self.id, url = url.as_str(), "saved");
                SaveOutcome::Saved(response)
            }
            Err(error) => {
                warn!(model = self.schema.name(), url = url.as_str(), error = %error, "save failed");
                hooks.on_save_error(self, &error);
                SaveOutcome::Failed(error)
            }
        }
    }

    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        self.saved_at
    }

    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut Events {
        &mut self.events
    }

    /// Shorthand for `events_mut().on(..)`.
    pub fn on<F>(&mut self, name: impl Into<String>, listener: F) -> ListenerId
    where
        F: Fn(&Event<'_>) + 'static,
    {
        self.events.on(name, listener)
    }

    /// Push accepted values of `key` to `observer`.
    pub fn bind(&mut self, key: impl Into<String>, observer: Observer) -> bool {
        self.bindings.bind(key, observer)
    }

    pub fn unbind(&mut self, key: &str, observer: Option<&Observer>) -> bool {
        self.bindings.unbind(key, observer)
    }

    /// Fan `value` out to the observers of `key` without touching the field.
    pub fn notify(&mut self, key: &str, value: &Value) -> usize {
        self.bindings.notify(key, value)
    }

    pub fn bindings(&self) -> &BindingRegistry {
        &self.bindings
    }

    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut ModelOptions {
        &mut self.options
    }
}

/// A shared model can sit at the receiving end of a binding.
///
/// The model stays mutably borrowed for the whole of [`Model::set`],
/// including its fan-out. Any delivery that arrives in that window is
/// dropped, whatever its key. That ends a two-way binding cycle, but it also
/// means an observer of one field cannot write another field of the same
/// shared model; do that from outside the fan-out instead.
impl Settable for RefCell<Model> {
    fn set(&self, key: &str, value: Value) -> Result<()> {
        match self.try_borrow_mut() {
            Ok(mut model) => {
                model.set(key, value)?;
            }
            Err(_) => warn!(key, "model busy, skipping re-entrant write"),
        }
        Ok(())
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::rules::RuleSet;

    /// `Id` plus a short `Text` that may not be "beebe".
    pub fn memo_schema() -> Arc<ModelSchema> {
        ModelSchema::new("Memo")
            .field("Id", "")
            .field("Text", "")
            .rules(
                "Text",
                RuleSet::new()
                    .rule("maxLength", 15)
                    .check("content", |v| v != &Value::from("beebe")),
            )
            .build()
    }

    pub fn memo(id: i64, text: &str) -> Model {
        Model::new(
            memo_schema(),
            [("Id", Value::from(id)), ("Text", Value::from(text))],
            ModelOptions::default(),
        )
        .expect("memo schema is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{memo, memo_schema};
    use super::*;
    use crate::binding::PropertyBag;
    use crate::events::{field_change, CHANGE};
    use crate::rules::RuleSet;
    use std::rc::Rc;

    fn shout(model: &Model) -> Result<Value> {
        Ok(Value::from(model.raw("Text")?.to_string().to_uppercase()))
    }

    fn trimmed_text(model: &mut Model, value: Value) -> Result<()> {
        let text = value.to_string();
        model.store("Text", text.trim())
    }

    fn accessor_schema() -> Arc<ModelSchema> {
        ModelSchema::new("Memo")
            .field("Text", "")
            .rules("Text", RuleSet::new().rule("maxLength", 5))
            .getter("Shout", shout)
            .setter("Text", trimmed_text)
            .build()
    }

    #[test]
    fn test_new_merges_initial_over_defaults() {
        let model = memo(99, "Monkeys");
        assert_eq!(model.get("Id").unwrap(), Value::from(99));
        assert_eq!(model.get("Text").unwrap(), Value::from("Monkeys"));
        assert!(!model.has_changes());
        assert!(model.changes().is_empty());
        assert!(!model.has_errors());
    }

    #[test]
    fn test_new_rejects_unknown_initial_key() {
        let result = Model::new(
            memo_schema(),
            [("Title", Value::from("x"))],
            ModelOptions::default(),
        );
        assert!(matches!(result, Err(ModelError::UnknownField { key }) if key == "Title"));
    }

    #[test]
    fn test_new_rejects_unknown_rule() {
        let schema = ModelSchema::new("Bad")
            .field("Code", "")
            .rules("Code", RuleSet::new().rule("pattern", "^[A-Z]+$"))
            .build();
        let result = Model::from_schema(schema);
        assert!(matches!(result, Err(ModelError::UnknownRule { rule, .. }) if rule == "pattern"));
    }

    #[test]
    fn test_rules_wrap_only_declared_fields() {
        let model = memo(1, "a");
        assert!(model.field("Text").unwrap().is_validated());
        assert!(!model.field("Id").unwrap().is_validated());
    }

    #[test]
    fn test_instances_do_not_share_state() {
        let mut a = memo(1, "a");
        let b = memo(2, "b");
        a.set("Text", "changed").unwrap();
        a.set("Text", "a".repeat(16)).unwrap();

        assert_ne!(a.id(), b.id());
        assert!(!b.has_changes());
        assert!(!b.has_errors());
        assert_eq!(b.get("Text").unwrap(), Value::from("b"));
    }

    #[test]
    fn test_set_rejected_records_error() {
        let mut model = memo(99, "Monkeys");
        let accepted = model
            .set("Text", "taohudaotudaorubasntoduaouascdeusacoduague")
            .unwrap();

        assert!(!accepted);
        assert_eq!(model.get("Text").unwrap(), Value::from("Monkeys"));
        let err = model.error("Text").unwrap();
        assert!(err.is_length());
        assert_eq!(err.field(), "Text");
        assert!(!model.has_changes());
    }

    #[test]
    fn test_successful_set_clears_only_its_error() {
        let schema = ModelSchema::new("Pair")
            .field("A", "")
            .field("B", "")
            .rules("A", RuleSet::new().rule("maxLength", 2))
            .rules("B", RuleSet::new().rule("maxLength", 2))
            .build();
        let mut model = Model::from_schema(schema).unwrap();

        model.set("A", "long").unwrap();
        model.set("B", "long").unwrap();
        assert_eq!(model.errors().len(), 2);

        assert!(model.set("A", "ok").unwrap());
        assert!(model.error("A").is_none());
        assert!(model.error("B").is_some());
    }

    #[test]
    fn test_unknown_key_is_an_error_without_side_effects() {
        let mut model = memo(1, "a");
        let bag: Rc<PropertyBag> = Rc::default();
        model.bind("Nope", Observer::properties(&bag));

        assert!(matches!(model.get("Nope"), Err(ModelError::UnknownField { .. })));
        assert!(matches!(model.set("Nope", 1), Err(ModelError::UnknownField { .. })));
        assert!(!model.has_changes());
        assert!(!model.has_errors());
        assert!(bag.borrow().is_empty());
    }

    #[test]
    fn test_plain_field_assigns_directly() {
        let mut model = memo(1, "a");
        assert!(model.set("Id", "anything goes").unwrap());
        assert_eq!(model.get("Id").unwrap(), Value::from("anything goes"));
        assert!(model.is_changed());
    }

    #[test]
    fn test_changes_diff_against_originals() {
        let mut model = memo(1, "a");
        model.set("Text", "b").unwrap();
        assert_eq!(model.changes().get("Text"), Some(&Value::from("b")));
        assert_eq!(model.changes().len(), 1);

        // Restoring the original drops it from the diff but keeps the flag.
        model.set("Text", "a").unwrap();
        assert!(model.changes().is_empty());
        assert!(model.has_changes());

        model.clear_changes();
        assert!(!model.has_changes());
        assert_eq!(model.originals().get("Text"), Some(&Value::from("a")));
    }

    #[test]
    fn test_clear_changes_keeps_errors() {
        let mut model = memo(1, "a");
        model.set("Text", "beebe").unwrap();
        model.clear_changes();
        assert!(model.has_errors());
    }

    #[test]
    fn test_change_events_fire_in_order() {
        let mut model = memo(1, "a");
        let seen = Rc::new(RefCell::new(Vec::new()));

        let s = seen.clone();
        model.on(CHANGE, move |event| {
            if let Event::Change { key, value, .. } = event {
                s.borrow_mut().push(format!("change {key}={value}"));
            }
        });
        let s = seen.clone();
        model.on(field_change("Text"), move |event| {
            s.borrow_mut().push(format!("change:Text {}", event.value().unwrap()));
        });

        model.set("Text", "hello").unwrap();
        model.set("Text", "beebe").unwrap();

        assert_eq!(*seen.borrow(), vec!["change Text=hello", "change:Text hello"]);
    }

    #[test]
    fn test_listeners_see_updated_model() {
        let mut model = memo(1, "a");
        let seen = Rc::new(Cell::new(false));
        let s = seen.clone();
        model.on(CHANGE, move |event| {
            s.set(event.model().has_changes() && event.model().get("Text").is_ok());
        });
        model.set("Text", "b").unwrap();
        assert!(seen.get());
    }

    #[test]
    fn test_bound_observer_gets_stored_value() {
        let schema = ModelSchema::new("Toggle")
            .field("Status", "PAUSED")
            .rules(
                "Status",
                RuleSet::new()
                    .rule("type", vec!["string", "boolean"])
                    .map_value("true", "ACTIVE"),
            )
            .build();
        let mut model = Model::from_schema(schema).unwrap();
        let bag: Rc<PropertyBag> = Rc::default();
        model.bind("Status", Observer::properties(&bag));

        model.set("Status", true).unwrap();
        assert_eq!(bag.borrow().get("Status"), Some(&Value::from("ACTIVE")));
    }

    #[test]
    fn test_rejected_write_notifies_nobody() {
        let mut model = memo(1, "a");
        let bag: Rc<PropertyBag> = Rc::default();
        model.bind("Text", Observer::properties(&bag));
        let fired = Rc::new(Cell::new(0));
        let f = fired.clone();
        model.on(CHANGE, move |_| f.set(f.get() + 1));

        assert!(!model.set("Text", "beebe").unwrap());
        assert!(bag.borrow().is_empty());
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_custom_getter_and_setter() {
        let mut model = Model::from_schema(accessor_schema()).unwrap();

        assert!(model.set("Text", "  abc  ").unwrap());
        assert_eq!(model.get("Text").unwrap(), Value::from("abc"));
        assert_eq!(model.get("Shout").unwrap(), Value::from("ABC"));
    }

    #[test]
    fn test_custom_setter_validation_failure_is_recorded() {
        let mut model = Model::from_schema(accessor_schema()).unwrap();
        assert!(!model.set("Text", "far too long").unwrap());
        assert_eq!(model.error("Text").unwrap().rule(), "maxLength");
        assert_eq!(model.get("Text").unwrap(), Value::from(""));
    }

    #[test]
    fn test_store_does_not_notify_or_flag() {
        let mut model = memo(1, "a");
        let bag: Rc<PropertyBag> = Rc::default();
        model.bind("Text", Observer::properties(&bag));

        model.store("Text", "quiet").unwrap();
        assert_eq!(model.get("Text").unwrap(), Value::from("quiet"));
        assert!(!model.has_changes());
        assert!(bag.borrow().is_empty());

        let err = model.store("Text", "beebe").unwrap_err();
        assert!(matches!(err, ModelError::Invalid(_)));
    }

    #[test]
    fn test_data_for_saving_default_shape() {
        let model = memo(7, "hi");
        let data = model.data_for_saving();
        assert_eq!(data["model"]["Id"], 7);
        assert_eq!(data["model"]["Text"], "hi");
    }

    #[test]
    fn test_shared_model_as_target() {
        let model = Rc::new(RefCell::new(memo(1, "a")));
        let mut source = BindingRegistry::new();
        source.bind("Text", Observer::target(&model));

        source.notify("Text", &Value::from("pushed"));
        assert_eq!(model.borrow().get("Text").unwrap(), Value::from("pushed"));

        source.notify("Text", &Value::from("beebe"));
        assert_eq!(model.borrow().get("Text").unwrap(), Value::from("pushed"));
        assert!(model.borrow().has_errors());
    }

    fn failing_label(model: &Model) -> Result<Value> {
        model.raw("Missing")
    }

    #[test]
    fn test_fields_fall_back_when_getter_fails() {
        let schema = ModelSchema::new("Memo")
            .field("Label", "stored")
            .getter("Label", failing_label)
            .build();
        let mut model = Model::from_schema(schema).unwrap();

        assert!(model.get("Label").is_err());
        assert_eq!(model.fields()["Label"], Value::from("stored"));

        model.set("Label", "edited").unwrap();
        assert_eq!(model.changes()["Label"], Value::from("edited"));
    }

    #[test]
    fn test_unbind_stops_delivery() {
        let mut model = memo(1, "a");
        let bag: Rc<PropertyBag> = Rc::default();
        let other: Rc<PropertyBag> = Rc::default();
        let observer = Observer::properties(&bag);
        model.bind("Text", observer.clone());
        model.bind("Text", Observer::properties(&other));

        assert!(model.unbind("Text", Some(&observer)));
        model.set("Text", "b").unwrap();
        assert!(bag.borrow().is_empty());
        assert_eq!(other.borrow().get("Text"), Some(&Value::from("b")));

        assert!(model.unbind("Text", None));
        assert!(!model.unbind("Text", None));
        model.set("Text", "c").unwrap();
        assert_eq!(other.borrow().get("Text"), Some(&Value::from("b")));
    }

    #[test]
    fn test_notify_fans_out_without_writing() {
        let mut model = memo(1, "a");
        let bag: Rc<PropertyBag> = Rc::default();
        model.bind("Text", Observer::properties(&bag));

        assert_eq!(model.notify("Text", &Value::from("preview")), 1);
        assert_eq!(bag.borrow().get("Text"), Some(&Value::from("preview")));
        assert_eq!(model.get("Text").unwrap(), Value::from("a"));
        assert!(!model.has_changes());
        assert_eq!(model.notify("Id", &Value::from(2)), 0);
    }
}
