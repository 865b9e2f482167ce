//! Dashboard form state
//!
//! A form is an action URL plus named field values. Required fields are
//! checked locally before anything is sent.

use crate::api::paths;

pub const MINUTES_FIELD: &str = "meeting_minutes";
pub const ATTENDEE_FIELD: &str = "attendee_username";

pub const START_LABEL: &str = "Start Meeting";
pub const END_LABEL: &str = "End Meeting";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub action: String,
    fields: Vec<(String, String)>,
    required: Vec<String>,
    /// Set when a submit was blocked by local validation.
    pub was_validated: bool,
}

impl FormState {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            fields: Vec::new(),
            required: Vec::new(),
            was_validated: false,
        }
    }

    /// Declare a required field, created empty.
    pub fn with_required(mut self, name: &str) -> Self {
        self.required.push(name.to_string());
        self.set_field(name, "");
        self
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(field, _)| field == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Names of required fields that are empty.
    pub fn missing_required(&self) -> Vec<String> {
        self.required
            .iter()
            .filter(|name| self.field(name).is_none_or(str::is_empty))
            .cloned()
            .collect()
    }

    /// Validation gate run before every submit.
    ///
    /// On failure the form is flagged and the missing names are returned; on
    /// success the flag is cleared.
    pub fn check_validity(&mut self) -> Result<(), Vec<String>> {
        let missing = self.missing_required();
        if missing.is_empty() {
            self.was_validated = false;
            Ok(())
        } else {
            self.was_validated = true;
            Err(missing)
        }
    }

    pub fn minutes(meeting_id: u64) -> Self {
        Self::new(paths::minutes(meeting_id, None)).with_required(MINUTES_FIELD)
    }

    pub fn add_attendee(meeting_id: u64) -> Self {
        Self::new(paths::add_attendee(meeting_id)).with_required(ATTENDEE_FIELD)
    }
}

/// The start/end form together with its submit button label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusForm {
    pub form: FormState,
    pub button_label: String,
}

impl StatusForm {
    pub fn start(meeting_id: u64) -> Self {
        Self {
            form: FormState::new(paths::start_meeting(meeting_id)),
            button_label: START_LABEL.to_string(),
        }
    }

    pub fn end(meeting_id: u64) -> Self {
        Self {
            form: FormState::new(paths::end_meeting(meeting_id)),
            button_label: END_LABEL.to_string(),
        }
    }

    pub fn starts_meeting(&self) -> bool {
        self.form.action.contains(paths::START_ACTION_MARKER)
    }
}
