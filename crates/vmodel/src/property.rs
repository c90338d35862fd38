//! Validated properties.
//!
//! A [`ValidatedProperty`] owns one field's value together with its
//! [`RuleSet`]. The only way to change the value is [`ValidatedProperty::set`],
//! which validates the raw input and then applies the value map.

use std::sync::Arc;

use crate::error::{Result, ValidationError};
use crate::rules::{RuleEngine, RuleSet};
use crate::value::Value;

/// Guarded get/set wrapper enforcing a rule set around one field.
///
/// The stored value is either the unvalidated initial value or a value that
/// passed every rule (after mapping). Failures leave it untouched and are
/// returned to the caller; the property keeps no error state of its own.
#[derive(Debug, Clone)]
pub struct ValidatedProperty {
    key: String,
    value: Value,
    rules: RuleSet,
    engine: Arc<RuleEngine>,
}

impl ValidatedProperty {
    /// Wrap `initial` with `rules`.
    ///
    /// Fails with [`crate::ModelError::UnknownRule`] when a literal rule has no
    /// test in `engine`. The initial value itself is not validated.
    pub fn new(
        key: impl Into<String>,
        initial: Value,
        rules: RuleSet,
        engine: Arc<RuleEngine>,
    ) -> Result<Self> {
        let key = key.into();
        engine.check(&key, &rules)?;
        Ok(Self {
            key,
            value: initial,
            rules,
            engine,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> &Value {
        &self.value
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Check `value` against the rules without storing it.
    pub fn validate(&self, value: &Value) -> std::result::Result<(), ValidationError> {
        self.engine
            .validate(value, &self.rules)
            .map_err(|e| e.for_field(&self.key))
    }

    /// Validate the raw input, then store its mapped form.
    pub fn set(&mut self, value: Value) -> std::result::Result<(), ValidationError> {
        self.validate(&value)?;
        self.value = self.transform(value);
        Ok(())
    }

    /// Apply the value map: `true` → `"ACTIVE"` and the like.
    pub fn transform(&self, value: Value) -> Value {
        match self.rules.mapped(&value) {
            Some(mapped) => mapped.clone(),
            None => value,
        }
    }
}
