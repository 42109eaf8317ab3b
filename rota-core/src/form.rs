//! Duty creation form state.
//!
//! Validation is presence-only: a field is invalid exactly when it is empty.
//! Whitespace counts as a value.
//! The form never talks to the network itself. [`DutyForm::submit`] hands out
//! the request body when the form is complete, and the caller reports the
//! server's answer back through [`DutyForm::finish`].

use std::collections::BTreeMap;

use crate::crew::{Conductor, Driver, Vehicle};
use crate::duty::NewDuty;

pub const SUCCESS_MESSAGE: &str = "Duty successfully added!";
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

/// Input fields of the duty form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    Date,
    StartTime,
    Vehicle,
    Duration,
    Driver,
    Conductor,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Date,
        FormField::StartTime,
        FormField::Vehicle,
        FormField::Duration,
        FormField::Driver,
        FormField::Conductor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Date => "Date",
            FormField::StartTime => "Start time",
            FormField::Vehicle => "Vehicle",
            FormField::Duration => "Duration",
            FormField::Driver => "Driver",
            FormField::Conductor => "Conductor",
        }
    }

    pub fn required_message(self) -> &'static str {
        match self {
            FormField::Date => "Date is required",
            FormField::StartTime => "Start time is required",
            FormField::Vehicle => "Vehicle ID is required",
            FormField::Duration => "Duration is required",
            FormField::Driver => "Driver ID is required",
            FormField::Conductor => "Conductor ID is required",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Date => "YYYY-MM-DD",
            FormField::StartTime => "HH:MM",
            FormField::Vehicle => "Select a vehicle",
            FormField::Duration => "Enter duration (in hours)",
            FormField::Driver => "Select a driver",
            FormField::Conductor => "Select a conductor",
        }
    }

    /// Whether the value is picked from reference data rather than typed.
    pub fn is_selection(self) -> bool {
        matches!(
            self,
            FormField::Vehicle | FormField::Driver | FormField::Conductor
        )
    }
}

/// Banner shown above the form after a submission round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Error(String),
}

/// Server answer to a creation request, as seen by the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Rejected { message: Option<String> },
}

/// One entry of a selection input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Reference lists backing the selection inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceData {
    pub vehicles: Vec<Vehicle>,
    pub drivers: Vec<Driver>,
    pub conductors: Vec<Conductor>,
}

impl ReferenceData {
    /// Options for a selection field; empty for typed fields.
    pub fn options(&self, field: FormField) -> Vec<SelectOption> {
        match field {
            FormField::Vehicle => self
                .vehicles
                .iter()
                .map(|v| SelectOption {
                    value: v.id.clone(),
                    label: v.label().to_string(),
                })
                .collect(),
            FormField::Driver => self
                .drivers
                .iter()
                .map(|d| SelectOption {
                    value: d.id.clone(),
                    label: d.name.clone(),
                })
                .collect(),
            FormField::Conductor => self
                .conductors
                .iter()
                .map(|c| SelectOption {
                    value: c.id.clone(),
                    label: c.name.clone(),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Human-readable label for a selected id.
    pub fn label_for(&self, field: FormField, value: &str) -> Option<String> {
        self.options(field)
            .into_iter()
            .find(|o| o.value == value)
            .map(|o| o.label)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DutyForm {
    values: NewDuty,
    errors: BTreeMap<FormField, &'static str>,
    banner: Option<Banner>,
    pending: bool,
}

impl DutyForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FormField) -> &str {
        self.values.field(field)
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.values.field_mut(field) = value.into();
    }

    pub fn push_char(&mut self, field: FormField, c: char) {
        self.values.field_mut(field).push(c);
    }

    pub fn pop_char(&mut self, field: FormField) {
        self.values.field_mut(field).pop();
    }

    pub fn values(&self) -> &NewDuty {
        &self.values
    }

    pub fn error(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn invalid_fields(&self) -> Vec<FormField> {
        self.errors.keys().copied().collect()
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// A submission has been handed out and not yet finished.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Validates the form and returns the body for exactly one creation
    /// request, or `None` when a field is blank or a request is in flight.
    pub fn submit(&mut self) -> Option<NewDuty> {
        if self.pending {
            return None;
        }

        self.errors = FormField::ALL
            .into_iter()
            .filter(|f| self.values.field(*f).is_empty())
            .map(|f| (f, f.required_message()))
            .collect();

        if !self.errors.is_empty() {
            if matches!(self.banner, Some(Banner::Error(_))) {
                self.banner = None;
            }
            return None;
        }

        self.pending = true;
        Some(self.values.clone())
    }

    /// Applies the server's answer to the last submission.
    pub fn finish(&mut self, outcome: SubmitOutcome) {
        self.pending = false;
        self.errors.clear();
        match outcome {
            SubmitOutcome::Created => {
                self.values = NewDuty::default();
                self.banner = Some(Banner::Success(SUCCESS_MESSAGE.to_string()));
            }
            SubmitOutcome::Rejected { message } => {
                let message = message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
                self.banner = Some(Banner::Error(message));
            }
        }
    }
}
