//! Advertising campaign.
//!
//! | Field | Default | Rules |
//! |-------|---------|-------|
//! | `Name` | `""` | string, 3..=45 chars |
//! | `MaxCpc` | `0` | number, >= 0 |
//! | `Budget` | `0` | number, >= 0 |
//! | `Status` | `"PAUSED"` | `PAUSED`, `ACTIVE`, `DELETED`, or a boolean mapped to `ACTIVE`/`PAUSED` |

use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::config::ModelOptions;
use crate::error::Result;
use crate::model::Model;
use crate::rules::RuleSet;
use crate::schema::ModelSchema;
use crate::value::Value;

pub const NAME: &str = "Name";
pub const MAX_CPC: &str = "MaxCpc";
pub const BUDGET: &str = "Budget";
pub const STATUS: &str = "Status";

pub const STATUS_PAUSED: &str = "PAUSED";
pub const STATUS_ACTIVE: &str = "ACTIVE";
pub const STATUS_DELETED: &str = "DELETED";

static SCHEMA: Lazy<Arc<ModelSchema>> = Lazy::new(|| {
    let non_negative = RuleSet::new().rule("type", "number").rule("min", 0);
    ModelSchema::new("Campaign")
        .field(NAME, "")
        .field(MAX_CPC, 0)
        .field(BUDGET, 0)
        .field(STATUS, STATUS_PAUSED)
        .rules(
            NAME,
            RuleSet::new()
                .rule("type", "string")
                .rule("minLength", 3)
                .rule("maxLength", 45),
        )
        .rules(MAX_CPC, non_negative.clone())
        .rules(BUDGET, non_negative)
        .rules(
            STATUS,
            RuleSet::new()
                .rule("type", vec!["string", "boolean"])
                .rule(
                    "values",
                    vec![
                        Value::from(STATUS_PAUSED),
                        Value::from(STATUS_ACTIVE),
                        Value::from(STATUS_DELETED),
                        Value::from(true),
                        Value::from(false),
                    ],
                )
                .map_value("true", STATUS_ACTIVE)
                .map_value("false", STATUS_PAUSED),
        )
        .build()
});

/// Constructors for campaign models. The model itself is a plain [`Model`].
pub struct Campaign;

impl Campaign {
    pub fn schema() -> Arc<ModelSchema> {
        Arc::clone(&SCHEMA)
    }

    pub fn new<'k, I>(initial: I, options: ModelOptions) -> Result<Model>
    where
        I: IntoIterator<Item = (&'k str, Value)>,
    {
        Model::new(Self::schema(), initial, options)
    }

    pub fn blank() -> Result<Model> {
        Model::from_schema(Self::schema())
    }
}
