//! # vmodel Architecture
//!
//! vmodel is a **client-side data-model library**: field storage with change
//! tracking, declarative per-field validation, and value binding between
//! model fields and whatever wants to observe them (callbacks, other models,
//! UI input controls). It does no I/O of its own. Saving goes through a
//! transport the caller supplies, and UI controls are reached through a
//! small trait.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Model types (models/)                                      │
//! │  - A ModelSchema per type: defaults, rules, accessors       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Model (model.rs)                                           │
//! │  - get/set, originals + diff, error map                     │
//! │  - owns Events, BindingRegistry, ModelOptions               │
//! │  - save() through persist::SaveTransport                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  ValidatedProperty (property.rs)                            │
//! │  - one field's value + RuleSet; validate, then value-map    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  RuleEngine (rules/)                                        │
//! │  - rule name → test table; first failure wins               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Binding (`binding/`) sits beside the model: a model notifies its
//! [`BindingRegistry`] after every accepted write, and a [`BoundElement`]
//! feeds user edits on an input control into the same fan-out.
//!
//! ## Quick Tour
//!
//! ```ignore
//! use vmodel::{Campaign, ModelOptions, Value};
//!
//! let mut campaign = Campaign::new([("Budget", Value::from(100))], ModelOptions::default())?;
//! assert!(campaign.set("Budget", 250)?);
//! assert!(!campaign.set("Name", "ab")?);          // too short, recorded
//! assert!(campaign.error("Name").unwrap().is_length());
//! assert_eq!(campaign.changes()["Budget"], Value::from(250));
//! ```
//!
//! ## Threading
//!
//! Schemas and rule engines are `Send + Sync` and shared through `Arc`.
//! Models, events and bindings are single-threaded (`Rc`/`RefCell`), the way
//! UI-side state usually is.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`debug` for lifecycle, `trace` for
//! individual writes and deliveries, `warn` for dropped deliveries). It never
//! installs a subscriber.

pub mod binding;
pub mod config;
pub mod error;
pub mod events;
pub mod model;
pub mod models;
pub mod persist;
pub mod property;
pub mod rules;
pub mod schema;
pub mod value;

pub use binding::{BindingRegistry, BoundElement, InputElement, Observer, PropertyBag, Settable};
pub use config::ModelOptions;
pub use error::{ModelError, Result, RuleFailure, TransportError, ValidationError};
pub use events::{Event, Events, ListenerId};
pub use model::{Field, Model};
pub use models::Campaign;
pub use persist::{MemoryTransport, SaveHooks, SaveOutcome, SaveTransport, SkipReason};
pub use property::ValidatedProperty;
pub use rules::{RuleEngine, RuleSet, RuleSpec};
pub use schema::{Accessor, ModelSchema};
pub use value::{Value, ValueType};
