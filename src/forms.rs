//! Schema-driven input collection for the create/edit flows.
//!
//! Field definitions are data (`FieldSpec`), not interpolated markup, so
//! required-field validation is unit-testable without a rendering surface.
//! The `Prompt` trait is the seam between the flows and whatever collects the
//! input — the terminal implementation lives in `console`, and
//! `ScriptedPrompt` stands in for it in tests.

use std::collections::{HashMap, VecDeque};

use thiserror::Error;

/// Raw confirmed values, keyed by field id. Not yet validated.
pub type FormValues = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text input.
    Text,
    /// Multi-line text input.
    Textarea,
    /// One choice from a fixed option list; the value is the option's value.
    Select(Vec<SelectOption>),
    /// `YYYY-MM-DDTHH:MM` entry, seconds optional.
    DateTime,
    /// Boolean toggle; the value is "1" when set, "0" otherwise.
    Checkbox,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Unique key within one form.
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub placeholder: &'static str,
    pub required: bool,
    /// Pre-fill for edit flows.
    pub initial_value: Option<String>,
}

impl FieldSpec {
    pub fn new(id: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            id,
            label,
            kind,
            placeholder: "",
            required: false,
            initial_value: None,
        }
    }

    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn initial(mut self, value: impl Into<String>) -> Self {
        self.initial_value = Some(value.into());
        self
    }
}

/// Modal-style user interaction surface.
pub trait Prompt {
    /// Presents one input per field and returns the entered values on confirm.
    /// `None` is the cancellation sentinel — distinguishable from a confirm
    /// with empty values, and always treated by callers as a no-op. Returned
    /// values are raw; `required` enforcement is the caller's job.
    fn form(&mut self, title: &str, fields: &[FieldSpec]) -> Option<FormValues>;

    /// Explicit gate for destructive actions. Declining is a normal
    /// cancellation, not an error.
    fn confirm(&mut self, title: &str, text: &str) -> bool;

    fn info(&mut self, title: &str, text: &str);

    fn error(&mut self, title: &str, text: &str);
}

/// A `required` field confirmed with a whitespace-only or missing value.
#[derive(Debug, Error)]
#[error("{label} cannot be empty")]
pub struct MissingField {
    pub label: &'static str,
}

/// Checks every `required` field for a trimmed non-empty value. Runs before
/// any network call, on both the add and the edit paths.
pub fn validate_required(fields: &[FieldSpec], values: &FormValues) -> Result<(), MissingField> {
    for field in fields.iter().filter(|f| f.required) {
        let missing = values
            .get(field.id)
            .map_or(true, |value| value.trim().is_empty());
        if missing {
            return Err(MissingField { label: field.label });
        }
    }
    Ok(())
}

/// Trimmed value for `id`, empty string when the field is absent.
pub fn trimmed(values: &FormValues, id: &str) -> String {
    values.get(id).map(|v| v.trim().to_string()).unwrap_or_default()
}

// ═══════════════════════════════════════════════════════════
// ScriptedPrompt — test double
// ═══════════════════════════════════════════════════════════

/// Scripted `Prompt` for tests: queued form submissions and confirmations,
/// recorded notifications. An exhausted queue answers cancel/decline.
#[derive(Default)]
pub struct ScriptedPrompt {
    forms: VecDeque<Option<FormValues>>,
    confirms: VecDeque<bool>,
    pub infos: Vec<String>,
    pub errors: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a confirmed form submission.
    pub fn submit(mut self, values: &[(&str, &str)]) -> Self {
        let values = values
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.forms.push_back(Some(values));
        self
    }

    /// Queues a cancelled form.
    pub fn cancel(mut self) -> Self {
        self.forms.push_back(None);
        self
    }

    pub fn answer_confirm(mut self, yes: bool) -> Self {
        self.confirms.push_back(yes);
        self
    }
}

impl Prompt for ScriptedPrompt {
    fn form(&mut self, _title: &str, _fields: &[FieldSpec]) -> Option<FormValues> {
        self.forms.pop_front().unwrap_or(None)
    }

    fn confirm(&mut self, _title: &str, _text: &str) -> bool {
        self.confirms.pop_front().unwrap_or(false)
    }

    fn info(&mut self, title: &str, text: &str) {
        self.infos.push(format!("{title}: {text}"));
    }

    fn error(&mut self, _title: &str, text: &str) {
        self.errors.push(text.to_string());
    }
}
