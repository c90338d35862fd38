//! # Validation Rules
//!
//! A [`RuleSet`] is the ordered list of rules one field must satisfy before a
//! write is accepted. Each rule is either a literal constraint dispatched to a
//! named test in the [`RuleEngine`], or a predicate closure.
//!
//! | Rule | Argument | Passes when |
//! |------|----------|-------------|
//! | `type` | tag or list of tags | value's type tag is listed |
//! | `values` | list | value is a member (exact equality) |
//! | `minLength` | number | string/list length >= arg |
//! | `maxLength` | number | string/list length <= arg |
//! | `min` | number | number >= arg |
//! | `max` | number | number <= arg |
//!
//! A RuleSet may also carry a value map, applied after every rule passes:
//!
//! ```ignore
//! let status = RuleSet::new()
//!     .rule("type", vec!["string", "boolean"])
//!     .rule("values", vec![Value::from("PAUSED"), Value::from("ACTIVE"), true.into(), false.into()])
//!     .map_value("true", "ACTIVE")
//!     .map_value("false", "PAUSED");
//! ```

mod engine;

pub use engine::{Rejection, RuleEngine, RuleTest};

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// Predicate rule: receives the candidate value, returns whether it passes.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// One rule's specification.
#[derive(Clone)]
pub enum RuleSpec {
    /// Literal constraint handed to the named test, e.g. `maxLength: 15`
    Arg(Value),

    /// Custom check, e.g. `content: |v| v != "beebe"`
    Predicate(Predicate),
}

impl fmt::Debug for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSpec::Arg(v) => f.debug_tuple("Arg").field(v).finish(),
            RuleSpec::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Ordered rule-name → rule-spec mapping for a single field.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: IndexMap<String, RuleSpec>,
    value_map: IndexMap<String, Value>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a literal rule. Re-adding a name replaces it in place.
    pub fn rule(mut self, name: impl Into<String>, arg: impl Into<Value>) -> Self {
        self.rules.insert(name.into(), RuleSpec::Arg(arg.into()));
        self
    }

    /// Add a predicate rule.
    pub fn check<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.rules
            .insert(name.into(), RuleSpec::Predicate(Arc::new(predicate)));
        self
    }

    /// Map the canonical string form of an accepted value to a replacement.
    pub fn map_value(mut self, from: impl Into<String>, to: impl Into<Value>) -> Self {
        self.value_map.insert(from.into(), to.into());
        self
    }

    /// Rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSpec)> {
        self.rules.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn get(&self, name: &str) -> Option<&RuleSpec> {
        self.rules.get(name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn value_map(&self) -> &IndexMap<String, Value> {
        &self.value_map
    }

    /// Look up the replacement for `value`, if the value map has one.
    pub fn mapped(&self, value: &Value) -> Option<&Value> {
        if self.value_map.is_empty() {
            return None;
        }
        self.value_map.get(&value.canonical())
    }
}
