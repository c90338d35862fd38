//! Model schemas.
//!
//! A [`ModelSchema`] is the static, per-model-type declaration a concrete
//! model is built from: field defaults, per-field rule sets, custom accessors,
//! the rule engine and the save hooks. It is read-only once built and shared
//! by every instance through an `Arc`.
//!
//! ```ignore
//! let schema = ModelSchema::new("Campaign")
//!     .field("Name", "")
//!     .field("Budget", 0)
//!     .rules("Name", RuleSet::new().rule("type", "string").rule("minLength", 3))
//!     .rules("Budget", RuleSet::new().rule("type", "number").rule("min", 0));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::model::Model;
use crate::persist::{DefaultHooks, SaveHooks};
use crate::rules::{RuleEngine, RuleSet};
use crate::value::Value;

/// Custom getter: computes the value reported for a key.
pub type Getter = fn(&Model) -> Result<Value>;

/// Custom setter: writes a key. Use [`Model::store`] inside to keep validation.
pub type Setter = fn(&mut Model, Value) -> Result<()>;

/// Accessor overrides for one key. Either half may be absent.
#[derive(Clone, Copy, Default)]
pub struct Accessor {
    pub get: Option<Getter>,
    pub set: Option<Setter>,
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("get", &self.get.is_some())
            .field("set", &self.set.is_some())
            .finish()
    }
}

/// Declaration of a model type.
#[derive(Clone)]
pub struct ModelSchema {
    name: String,
    defaults: IndexMap<String, Value>,
    rules: IndexMap<String, RuleSet>,
    accessors: HashMap<String, Accessor>,
    engine: Arc<RuleEngine>,
    hooks: Arc<dyn SaveHooks>,
}

impl fmt::Debug for ModelSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSchema")
            .field("name", &self.name)
            .field("defaults", &self.defaults)
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .field("accessors", &self.accessors)
            .finish()
    }
}

impl ModelSchema {
    /// An empty schema using the built-in rule engine and default save hooks.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            defaults: IndexMap::new(),
            rules: IndexMap::new(),
            accessors: HashMap::new(),
            engine: RuleEngine::builtin(),
            hooks: Arc::new(DefaultHooks),
        }
    }

    /// Declare a field with its default value.
    pub fn field(mut self, key: impl Into<String>, default: impl Into<Value>) -> Self {
        self.defaults.insert(key.into(), default.into());
        self
    }

    /// Attach a rule set to a field.
    pub fn rules(mut self, key: impl Into<String>, rules: RuleSet) -> Self {
        self.rules.insert(key.into(), rules);
        self
    }

    /// Install a custom getter for `key`.
    pub fn getter(mut self, key: impl Into<String>, get: Getter) -> Self {
        self.accessors.entry(key.into()).or_default().get = Some(get);
        self
    }

    /// Install a custom setter for `key`.
    pub fn setter(mut self, key: impl Into<String>, set: Setter) -> Self {
        self.accessors.entry(key.into()).or_default().set = Some(set);
        self
    }

    /// Use a different rule engine (e.g. one with extra registered tests).
    pub fn engine(mut self, engine: Arc<RuleEngine>) -> Self {
        self.engine = engine;
        self
    }

    /// Override the persistence hooks.
    pub fn hooks(mut self, hooks: impl SaveHooks + 'static) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    /// Freeze the schema for sharing between instances.
    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field defaults in declaration order.
    pub fn defaults(&self) -> &IndexMap<String, Value> {
        &self.defaults
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.defaults.contains_key(key)
    }

    pub fn rules_for(&self, key: &str) -> Option<&RuleSet> {
        self.rules.get(key)
    }

    /// All declared rule sets, including any for undeclared keys.
    pub fn all_rules(&self) -> impl Iterator<Item = (&str, &RuleSet)> {
        self.rules.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn accessor(&self, key: &str) -> Option<&Accessor> {
        self.accessors.get(key)
    }

    pub fn rule_engine(&self) -> &Arc<RuleEngine> {
        &self.engine
    }

    pub fn save_hooks(&self) -> &Arc<dyn SaveHooks> {
        &self.hooks
    }
}
