use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use serde_json::json;
use vmodel::events::{BEFORE_SAVE, SAVE};
use vmodel::{
    Campaign, MemoryTransport, Model, ModelError, ModelOptions, ModelSchema, RuleSet, SaveHooks,
    SaveOutcome, SkipReason, TransportError, Value,
};

fn campaign_with_budget(budget: i64) -> Model {
    Campaign::new(
        [("Name", Value::from("Spring Sale")), ("Budget", Value::from(budget))],
        ModelOptions::with_save_url("/api/campaigns"),
    )
    .unwrap()
}

#[test]
fn fresh_model_has_no_changes() {
    let mut campaign = campaign_with_budget(100);
    assert!(!campaign.has_changes());
    assert!(campaign.changes().is_empty());

    campaign.set("MaxCpc", 2).unwrap();
    campaign.establish_originals();
    assert!(!campaign.has_changes());
    assert!(campaign.changes().is_empty());
}

#[test]
fn budget_change_diff() {
    let mut campaign = campaign_with_budget(100);
    assert!(campaign.set("Budget", 250).unwrap());

    let changes = campaign.changes();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes["Budget"], Value::from(250));

    campaign.clear_changes();
    assert!(campaign.changes().is_empty());
    assert_eq!(campaign.get("Budget").unwrap(), Value::from(250));
}

#[test]
fn max_length_gate() {
    let schema = ModelSchema::new("Note")
        .field("Text", "")
        .rules("Text", RuleSet::new().rule("maxLength", 15))
        .build();
    let mut note = Model::from_schema(schema).unwrap();

    assert!(!note.set("Text", "a".repeat(16)).unwrap());
    assert_eq!(note.get("Text").unwrap(), Value::from(""));
    assert!(note.error("Text").unwrap().is_length());

    assert!(note.set("Text", "short").unwrap());
    assert!(note.error("Text").is_none());
    assert_eq!(note.get("Text").unwrap(), Value::from("short"));
}

#[test]
fn status_value_map() {
    let mut campaign = Campaign::blank().unwrap();
    assert!(campaign.set("Status", true).unwrap());
    assert_eq!(campaign.get("Status").unwrap(), Value::from("ACTIVE"));
    assert_eq!(campaign.changes()["Status"], Value::from("ACTIVE"));
}

#[test]
fn unknown_key_leaves_state_alone() {
    let mut campaign = campaign_with_budget(100);
    let before = campaign.fields();

    let err = campaign.set("DailyCap", 5).unwrap_err();
    assert_eq!(err.to_string(), "Model does not have the property DailyCap");
    assert!(matches!(
        campaign.get("DailyCap"),
        Err(ModelError::UnknownField { .. })
    ));
    assert_eq!(campaign.fields(), before);
    assert!(!campaign.has_changes());
    assert!(!campaign.has_errors());
}

#[test]
fn unknown_rule_fails_construction() {
    let schema = ModelSchema::new("Broken")
        .field("Code", "")
        .rules("Code", RuleSet::new().rule("type", "string").rule("regex", "^x"))
        .build();
    let err = Model::from_schema(schema).unwrap_err();
    assert!(matches!(err, ModelError::UnknownRule { ref field, ref rule } if field == "Code" && rule == "regex"));
}

#[test]
fn errors_serialize_for_display() {
    let mut campaign = Campaign::blank().unwrap();
    campaign.set("Name", "ab").unwrap();
    campaign.set("Budget", -5).unwrap();

    let errors = serde_json::to_value(campaign.errors()).unwrap();
    assert_eq!(errors["Name"]["kind"], "length");
    assert_eq!(errors["Budget"]["kind"], "rule");
    assert_eq!(errors["Budget"]["rule"], "min");
}

// --- saving ---

#[test]
fn save_skips_without_changes() {
    let mut campaign = campaign_with_budget(100);
    let mut transport = MemoryTransport::new();

    let outcome = campaign.save(&mut transport, false);
    assert_eq!(outcome, SaveOutcome::Skipped(SkipReason::NoChanges));
    assert!(transport.sent().is_empty());
}

#[test]
fn forced_save_goes_out_without_changes() {
    let mut campaign = campaign_with_budget(100);
    let mut transport = MemoryTransport::new();

    assert!(campaign.save(&mut transport, true).is_saved());
    assert_eq!(transport.sent().len(), 1);
}

#[test]
fn save_skips_without_url() {
    let mut campaign = Campaign::blank().unwrap();
    campaign.set("Budget", 10).unwrap();
    let mut transport = MemoryTransport::new();

    let outcome = campaign.save(&mut transport, false);
    assert_eq!(outcome, SaveOutcome::Skipped(SkipReason::NoSaveUrl));
    assert!(campaign.has_changes());
}

#[test]
fn successful_save_commits_originals() {
    let mut campaign = campaign_with_budget(100);
    campaign.set("Budget", 250).unwrap();
    let mut transport = MemoryTransport::replying(json!({"ok": true}));

    let saved = Rc::new(Cell::new(false));
    let s = saved.clone();
    campaign.on(SAVE, move |event| s.set(!event.model().has_changes()));

    let outcome = campaign.save(&mut transport, false);
    assert_eq!(outcome, SaveOutcome::Saved(json!({"ok": true})));
    assert!(saved.get());
    assert!(!campaign.has_changes());
    assert!(campaign.changes().is_empty());
    assert!(campaign.saved_at().is_some());

    let sent = transport.last().unwrap();
    assert_eq!(sent.url, "/api/campaigns");
    assert_eq!(sent.payload["model"]["Budget"], 250);
    assert_eq!(sent.payload["model"]["Status"], "PAUSED");
}

#[test]
fn commit_on_save_can_be_disabled() {
    let mut options = ModelOptions::with_save_url("/api/campaigns");
    options.commit_on_save = false;
    let mut campaign = Campaign::new([], options).unwrap();
    campaign.set("Budget", 5).unwrap();

    assert!(campaign.save(&mut MemoryTransport::new(), false).is_saved());
    assert!(campaign.has_changes());
}

#[test]
fn listener_can_veto_save() {
    let mut campaign = campaign_with_budget(100);
    campaign.set("Budget", 250).unwrap();
    campaign.on(BEFORE_SAVE, |event| {
        if event.model().get("Budget").unwrap() == Value::from(250) {
            event.veto();
        }
    });
    let mut transport = MemoryTransport::new();

    assert_eq!(campaign.save(&mut transport, false), SaveOutcome::Vetoed);
    assert!(transport.sent().is_empty());
    assert!(campaign.has_changes());
}

type AuditLog = Arc<Mutex<Vec<String>>>;

struct AuditHooks {
    log: AuditLog,
}

impl AuditHooks {
    fn record(&self, entry: impl Into<String>) {
        self.log.lock().unwrap().push(entry.into());
    }
}

impl SaveHooks for AuditHooks {
    fn data_for_saving(&self, model: &Model) -> serde_json::Value {
        json!({ "campaign": model.changes() })
    }

    fn on_before_save(&self, model: &Model) -> bool {
        self.record("before");
        !model.has_errors()
    }

    fn on_after_save(&self, _model: &Model) {
        self.record("after");
    }

    fn on_save_complete(&self, model: &mut Model, response: &serde_json::Value) {
        self.record("complete");
        if let Some(name) = response["Name"].as_str() {
            model.store("Name", name).unwrap();
        }
    }

    fn on_save_error(&self, _model: &Model, error: &TransportError) {
        self.record(format!("error: {}", error.message));
    }
}

fn audited(log: &AuditLog, name: &str) -> Model {
    let schema = ModelSchema::new("Audited")
        .field("Name", "")
        .rules("Name", RuleSet::new().rule("minLength", 3))
        .hooks(AuditHooks { log: log.clone() })
        .build();
    Model::new(
        schema,
        [("Name", Value::from(name))],
        ModelOptions::with_save_url("/audit"),
    )
    .unwrap()
}

#[test]
fn hook_veto_and_custom_payload() {
    let log = AuditLog::default();
    let mut model = audited(&log, "");

    model.set("Name", "ab").unwrap();
    assert_eq!(
        model.save(&mut MemoryTransport::new(), true),
        SaveOutcome::Vetoed
    );

    model.set("Name", "abc").unwrap();
    let mut transport = MemoryTransport::replying(json!({"Name": "ABC"}));
    assert!(model.save(&mut transport, false).is_saved());
    assert_eq!(
        transport.last().unwrap().payload,
        json!({"campaign": {"Name": "abc"}})
    );
    assert_eq!(model.get("Name").unwrap(), Value::from("ABC"));
    assert_eq!(
        *log.lock().unwrap(),
        vec!["before", "before", "complete", "after"]
    );
}

#[test]
fn transport_failure_reports_through_hook() {
    let log = AuditLog::default();
    let mut model = audited(&log, "abc");
    model.set("Name", "abcd").unwrap();

    let events = Rc::new(RefCell::new(Vec::new()));
    let e = events.clone();
    model.on(SAVE, move |_| e.borrow_mut().push("save"));

    let error = TransportError::new("offline").with_status(503);
    let mut transport = MemoryTransport::failing(error.clone());
    assert_eq!(model.save(&mut transport, false), SaveOutcome::Failed(error));

    assert!(model.has_changes());
    assert!(model.saved_at().is_none());
    assert!(events.borrow().is_empty());
    assert_eq!(*log.lock().unwrap(), vec!["before", "error: offline"]);
}
