//! Rule evaluation.
//!
//! The engine owns an explicit table from rule name to test function. Literal
//! rules are dispatched through that table; names without a test fail closed.
//!
//! Evaluation stops at the first failing rule. Length tests report
//! [`ValidationError::Length`], everything else [`ValidationError::Rule`].

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

use super::{RuleSet, RuleSpec};
use crate::error::{ModelError, Result, RuleFailure, ValidationError};
use crate::value::Value;

/// A named test: receives the candidate value and the rule's argument.
pub type RuleTest = fn(value: &Value, arg: &Value) -> std::result::Result<(), Rejection>;

/// Why a test rejected a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Generic failure; the engine writes the message.
    Failed,
    /// Length bound violated, with a specific message.
    Length(String),
}

static BUILTIN: Lazy<Arc<RuleEngine>> = Lazy::new(|| Arc::new(RuleEngine::new()));

/// Evaluates a [`RuleSet`] against candidate values.
#[derive(Clone)]
pub struct RuleEngine {
    tests: HashMap<String, RuleTest>,
}

impl fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.tests.keys().collect();
        names.sort();
        f.debug_struct("RuleEngine").field("tests", &names).finish()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    /// An engine with the built-in tests registered.
    pub fn new() -> Self {
        let mut engine = Self::empty();
        engine
            .register("minLength", test_min_length)
            .register("maxLength", test_max_length)
            .register("min", test_min)
            .register("max", test_max)
            .register("type", test_type)
            .register("values", test_values);
        engine
    }

    /// An engine with no tests at all.
    pub fn empty() -> Self {
        Self {
            tests: HashMap::new(),
        }
    }

    /// The shared engine with the built-in tests.
    pub fn builtin() -> Arc<RuleEngine> {
        Arc::clone(&BUILTIN)
    }

    /// Register (or replace) a named test.
    pub fn register(&mut self, name: impl Into<String>, test: RuleTest) -> &mut Self {
        self.tests.insert(name.into(), test);
        self
    }

    pub fn has_test(&self, name: &str) -> bool {
        self.tests.contains_key(name)
    }

    /// Verify every literal rule in `rules` has a registered test.
    pub fn check(&self, field: &str, rules: &RuleSet) -> Result<()> {
        for (name, spec) in rules.iter() {
            if matches!(spec, RuleSpec::Arg(_)) && !self.has_test(name) {
                return Err(ModelError::UnknownRule {
                    field: field.to_string(),
                    rule: name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Run every rule in order against `value`, stopping at the first failure.
    ///
    /// The returned error has an empty field key; the caller stamps it.
    pub fn validate(
        &self,
        value: &Value,
        rules: &RuleSet,
    ) -> std::result::Result<(), ValidationError> {
        for (name, spec) in rules.iter() {
            let outcome = match spec {
                RuleSpec::Predicate(predicate) => {
                    if predicate(value) {
                        Ok(())
                    } else {
                        Err(Rejection::Failed)
                    }
                }
                RuleSpec::Arg(arg) => match self.tests.get(name) {
                    Some(test) => test(value, arg),
                    None => {
                        return Err(ValidationError::Rule(RuleFailure {
                            field: String::new(),
                            rule: name.to_string(),
                            value: value.clone(),
                            message: format!("No test registered for rule \"{}\"", name),
                        }));
                    }
                },
            };

            if let Err(rejection) = outcome {
                trace!(rule = name, %value, "rule rejected value");
                return Err(rejection_to_error(rejection, name, value));
            }
        }
        Ok(())
    }
}

fn rejection_to_error(rejection: Rejection, rule: &str, value: &Value) -> ValidationError {
    match rejection {
        Rejection::Failed => ValidationError::Rule(RuleFailure {
            field: String::new(),
            rule: rule.to_string(),
            value: value.clone(),
            message: format!("Failed test \"{}\" with \"{}\"", rule, value),
        }),
        Rejection::Length(message) => ValidationError::Length(RuleFailure {
            field: String::new(),
            rule: rule.to_string(),
            value: value.clone(),
            message,
        }),
    }
}

/// Length bound from a rule argument; only non-negative numbers qualify.
/// Kept fractional so `2.5` is not rounded down to `2`.
fn length_bound(arg: &Value) -> Option<f64> {
    arg.as_number().filter(|n| n.is_finite() && *n >= 0.0)
}

/// The max-length rule. Passes when the value's length is at most `arg`.
fn test_max_length(value: &Value, arg: &Value) -> std::result::Result<(), Rejection> {
    let Some(max) = length_bound(arg) else {
        return Err(Rejection::Failed);
    };
    match value.length() {
        Some(len) if len as f64 <= max => Ok(()),
        Some(_) => Err(Rejection::Length(format!(
            "Value \"{}\" exceeds the maximum length of {}",
            value, arg
        ))),
        None => Err(Rejection::Length(format!("Value \"{}\" has no length", value))),
    }
}

/// The min-length rule. Passes when the value's length is at least `arg`.
fn test_min_length(value: &Value, arg: &Value) -> std::result::Result<(), Rejection> {
    let Some(min) = length_bound(arg) else {
        return Err(Rejection::Failed);
    };
    match value.length() {
        Some(len) if len as f64 >= min => Ok(()),
        Some(_) => Err(Rejection::Length(format!(
            "Value \"{}\" does not meet the minimum length of {}",
            value, arg
        ))),
        None => Err(Rejection::Length(format!("Value \"{}\" has no length", value))),
    }
}

fn test_min(value: &Value, arg: &Value) -> std::result::Result<(), Rejection> {
    match (value.as_number(), arg.as_number()) {
        (Some(v), Some(min)) if v >= min => Ok(()),
        _ => Err(Rejection::Failed),
    }
}

fn test_max(value: &Value, arg: &Value) -> std::result::Result<(), Rejection> {
    match (value.as_number(), arg.as_number()) {
        (Some(v), Some(max)) if v <= max => Ok(()),
        _ => Err(Rejection::Failed),
    }
}

/// The type rule. `arg` is a single tag (`"string"`) or a list of tags.
fn test_type(value: &Value, arg: &Value) -> std::result::Result<(), Rejection> {
    let tag = value.type_of().name();
    let accepted = match arg {
        Value::String(t) => t == tag,
        Value::List(tags) => tags.iter().any(|t| t.as_str() == Some(tag)),
        _ => false,
    };
    if accepted {
        Ok(())
    } else {
        Err(Rejection::Failed)
    }
}

/// The values rule. `arg` is the list of accepted values.
fn test_values(value: &Value, arg: &Value) -> std::result::Result<(), Rejection> {
    match arg.as_list() {
        Some(accepted) if accepted.contains(value) => Ok(()),
        _ => Err(Rejection::Failed),
    }
}
