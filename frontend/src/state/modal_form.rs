use serde_json::{Map, Value};
use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    future::Future,
    time::Duration,
};

use crate::{
    api::{ApiError, Envelope},
    utils::timer::with_timeout,
};

/// Ordered field values of one form session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(Vec<(String, String)>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Missing fields read as empty.
    pub fn get(&self, name: &str) -> &str {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// JSON object body with trimmed string values.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .0
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.trim().to_string())))
            .collect();
        Value::Object(map)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub max_len: Option<usize>,
    pub initial: &'static str,
}

impl FieldRule {
    pub const fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            required: false,
            max_len: None,
            initial: "",
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn max_len(mut self, len: usize) -> Self {
        self.max_len = Some(len);
        self
    }

    pub const fn initial(mut self, value: &'static str) -> Self {
        self.initial = value;
        self
    }

    fn check(&self, value: &str) -> Option<String> {
        let value = value.trim();
        if self.required && value.is_empty() {
            return Some(format!("请输入{}", self.label));
        }
        match self.max_len {
            Some(max) if value.chars().count() > max => {
                Some(format!("{}不能超过{}个字符", self.label, max))
            }
            _ => None,
        }
    }
}

pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSchema {
    fields: Vec<FieldRule>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldRule>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    /// Values of a fresh create session.
    pub fn defaults(&self) -> FormValues {
        self.fields
            .iter()
            .fold(FormValues::new(), |values, rule| {
                values.with(rule.name, rule.initial)
            })
    }

    pub fn validate(&self, values: &FormValues) -> Result<(), FieldErrors> {
        let errors: FieldErrors = self
            .fields
            .iter()
            .filter_map(|rule| {
                rule.check(values.get(rule.name))
                    .map(|msg| (rule.name.to_string(), msg))
            })
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Closed,
    Open,
    Submitting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Closed; carries the service payload, if any.
    Saved(Option<Value>),
    Invalid(FieldErrors),
    Failed(ApiError),
    TimedOut(ApiError),
    /// The session was closed or replaced while the request was in flight.
    Discarded,
}

#[derive(Debug, Clone)]
struct FormSession {
    token: u64,
    mode: FormMode,
    values: FormValues,
    submitting: bool,
    field_errors: FieldErrors,
    error: Option<ApiError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    pub phase: FormPhase,
    pub mode: Option<FormMode>,
    pub values: FormValues,
    pub field_errors: FieldErrors,
    pub error: Option<ApiError>,
    pub session: u64,
}

/// Create/edit workflow behind a modal dialog.
///
/// `Closed -> Open -> Submitting -> Closed | Open`. At most one session is
/// live; each gets a fresh token so a late submit result for a closed or
/// replaced session is dropped.
pub struct ModalFormController {
    schema: FormSchema,
    timeout: Duration,
    session: RefCell<Option<FormSession>>,
    next_token: Cell<u64>,
}

impl ModalFormController {
    pub fn new(schema: FormSchema, timeout: Duration) -> Self {
        Self {
            schema,
            timeout,
            session: RefCell::new(None),
            next_token: Cell::new(0),
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn open_create(&self) {
        self.open(FormMode::Create, self.schema.defaults());
    }

    /// Starts a session seeded with `seed`; a live session is closed first.
    pub fn open(&self, mode: FormMode, seed: FormValues) {
        let token = self.next_token.get().wrapping_add(1);
        self.next_token.set(token);
        let mut values = self.schema.defaults();
        for (name, value) in seed.iter() {
            values.set(name, value);
        }
        let previous = self.session.replace(Some(FormSession {
            token,
            mode,
            values,
            submitting: false,
            field_errors: FieldErrors::new(),
            error: None,
        }));
        if let Some(previous) = previous {
            log::debug!("form session {} replaced by {}", previous.token, token);
        }
    }

    pub fn close(&self) {
        if let Some(session) = self.session.take() {
            log::debug!("form session {} closed", session.token);
        }
    }

    pub fn phase(&self) -> FormPhase {
        match self.session.borrow().as_ref() {
            None => FormPhase::Closed,
            Some(session) if session.submitting => FormPhase::Submitting,
            Some(_) => FormPhase::Open,
        }
    }

    pub fn set_field(&self, name: &str, value: impl Into<String>) {
        if let Some(session) = self.session.borrow_mut().as_mut() {
            session.values.set(name, value);
            session.field_errors.remove(name);
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        match self.session.borrow().as_ref() {
            None => FormSnapshot {
                phase: FormPhase::Closed,
                mode: None,
                values: FormValues::new(),
                field_errors: FieldErrors::new(),
                error: None,
                session: self.next_token.get(),
            },
            Some(session) => FormSnapshot {
                phase: if session.submitting {
                    FormPhase::Submitting
                } else {
                    FormPhase::Open
                },
                mode: Some(session.mode),
                values: session.values.clone(),
                field_errors: session.field_errors.clone(),
                error: session.error.clone(),
                session: session.token,
            },
        }
    }

    /// Validates `values`, then runs `send` under the submit timeout.
    ///
    /// `send` receives the session mode and the validated values. Nothing is
    /// sent unless the form is `Open`.
    pub async fn submit<F, Fut>(&self, values: FormValues, send: F) -> SubmitOutcome
    where
        F: FnOnce(FormMode, FormValues) -> Fut,
        Fut: Future<Output = Result<Envelope<Value>, ApiError>>,
    {
        let (token, mode) = {
            let mut guard = self.session.borrow_mut();
            let Some(session) = guard.as_mut() else {
                log::debug!("submit ignored: form is closed");
                return SubmitOutcome::Discarded;
            };
            if session.submitting {
                log::debug!("submit ignored: session {} already submitting", session.token);
                return SubmitOutcome::Discarded;
            }
            session.values = values.clone();
            session.error = None;
            if let Err(errors) = self.schema.validate(&values) {
                session.field_errors = errors.clone();
                return SubmitOutcome::Invalid(errors);
            }
            session.field_errors.clear();
            session.submitting = true;
            (session.token, session.mode)
        };

        let result = with_timeout(self.timeout, send(mode, values)).await;

        let mut guard = self.session.borrow_mut();
        let session = match guard.as_mut() {
            Some(session) if session.token == token => session,
            _ => {
                log::debug!("discarding submit result of stale session {}", token);
                return SubmitOutcome::Discarded;
            }
        };
        session.submitting = false;
        match result {
            Err(elapsed) => {
                let err = ApiError::timeout(elapsed.as_millis());
                log::warn!("form submit timed out after {} ms", elapsed.as_millis());
                session.error = Some(err.clone());
                SubmitOutcome::TimedOut(err)
            }
            Ok(Err(err)) => {
                session.error = Some(err.clone());
                SubmitOutcome::Failed(err)
            }
            Ok(Ok(envelope)) => match envelope.into_result() {
                Ok(data) => {
                    *guard = None;
                    SubmitOutcome::Saved(data)
                }
                Err(err) => {
                    session.error = Some(err.clone());
                    SubmitOutcome::Failed(err)
                }
            },
        }
    }
}
