//! Contact form submission pipeline.
//!
//! `Idle -> Validating -> (Rejected | Configuring) -> Submitting -> (Succeeded | Failed) -> Idle`
//!
//! Validation and the configuration lookup are pure; the network call sits
//! behind [`FormTransport`] and every DOM effect behind [`ContactFormView`],
//! so the whole flow runs against fakes in tests. Every error is caught here
//! and turned into a single notification; nothing propagates past `submit`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::str::FromStr;

use crate::config::{ProviderConfig, SiteConfig};
use crate::notification::{NotificationEvent, Notifier, Severity};
use crate::validation::{validate_field, FieldError, FieldErrorDisplay, FieldName, FormField};

pub const REJECTED_MESSAGE: &str = "Please fix the errors in the form";
pub const SUCCESS_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";
pub const PROVIDER_FAILURE_FALLBACK: &str = "Failed to send email";

/// Backend the form posts to, chosen with the `email-method` radio group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubmissionMethod {
    #[default]
    #[serde(rename = "web3forms")]
    Web3Forms,
}

impl SubmissionMethod {
    pub const ALL: [SubmissionMethod; 1] = [SubmissionMethod::Web3Forms];

    /// Value of the radio input
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionMethod::Web3Forms => "web3forms",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SubmissionMethod::Web3Forms => "Web3Forms",
        }
    }
}

impl fmt::Display for SubmissionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for SubmissionMethod {
    type Err = SubmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "web3forms" => Ok(SubmissionMethod::Web3Forms),
            other => Err(SubmissionError::Configuration(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Rejected,
    Configuring,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    /// One or more fields failed; the user corrects them and resubmits
    #[error("{} field(s) failed validation", .0.len())]
    Validation(Vec<FieldError>),
    /// The selected provider has no real credential; carries its display name
    #[error("{0} is not configured")]
    Configuration(String),
    /// Connection failure, non-2xx status or an unreadable response
    #[error("Transport error: {0}")]
    Transport(String),
    /// The provider answered but reported failure
    #[error("Provider error: {0}")]
    Logic(String),
}

impl SubmissionError {
    /// The notification shown for this error
    pub fn notification(&self, fallback_contact: &str) -> NotificationEvent {
        match self {
            SubmissionError::Validation(_) => NotificationEvent::new(REJECTED_MESSAGE, Severity::Error),
            SubmissionError::Configuration(name) => NotificationEvent::new(
                format!(
                    "{name} is not configured yet. Please check the setup guide by clicking the \"📧 Email Setup Guide\" button."
                ),
                Severity::Warning,
            ),
            SubmissionError::Transport(_) | SubmissionError::Logic(_) => NotificationEvent::new(
                format!(
                    "Failed to send message. Please try again or contact me directly at {fallback_contact}"
                ),
                Severity::Error,
            ),
        }
    }
}

/// JSON body returned by the provider. Read leniently: `success` counts when
/// it is truthy in the JavaScript sense and `message` only when it is a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderResponse {
    #[serde(default, deserialize_with = "truthy")]
    pub success: bool,
    #[serde(default, deserialize_with = "string_only")]
    pub message: Option<String>,
}

fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    })
}

fn string_only<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

impl ProviderResponse {
    pub fn into_result(self) -> Result<(), SubmissionError> {
        if self.success {
            Ok(())
        } else {
            Err(SubmissionError::Logic(
                self.message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| PROVIDER_FAILURE_FALLBACK.to_string()),
            ))
        }
    }
}

/// Everything needed for the single outbound POST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub endpoint: String,
    pub fields: Vec<(String, String)>,
}

impl SubmissionPayload {
    /// Copies every form entry except the honeypot and appends the credential
    pub fn build(entries: &[(String, String)], provider: &ProviderConfig, config: &SiteConfig) -> Self {
        let mut fields: Vec<(String, String)> = entries
            .iter()
            .filter(|(name, _)| *name != config.honeypot_field)
            .cloned()
            .collect();
        fields.push((config.credential_field.clone(), provider.access_key.clone()));
        Self {
            endpoint: provider.endpoint.clone(),
            fields,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// `action`/`method` attributes the form carries for a submission method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormAction {
    pub action: String,
    pub method: &'static str,
}

impl FormAction {
    pub fn for_method(method: SubmissionMethod, config: &SiteConfig) -> Self {
        Self {
            action: config.provider(method).endpoint.clone(),
            method: "POST",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitButtonState {
    Ready,
    Busy,
}

impl SubmitButtonState {
    pub fn label(&self) -> &'static str {
        match self {
            SubmitButtonState::Ready => "Send Message",
            SubmitButtonState::Busy => "Sending...",
        }
    }

    pub fn spinner_hidden(&self) -> bool {
        matches!(self, SubmitButtonState::Ready)
    }

    pub fn disabled(&self) -> bool {
        matches!(self, SubmitButtonState::Busy)
    }
}

/// The contact form as the pipeline sees it
pub trait ContactFormView {
    /// Current value of a field, `None` when the control is missing
    fn field_value(&self, field: FieldName) -> Option<String>;
    fn render_field_error(&mut self, field: FieldName, display: &FieldErrorDisplay);
    fn render_submit_button(&mut self, state: SubmitButtonState);
    /// All named entries of the form, in document order
    fn entries(&self) -> Vec<(String, String)>;
    fn reset(&mut self);
}

/// The single network effect of the pipeline
pub trait FormTransport {
    fn post(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<ProviderResponse, SubmissionError>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Sent,
    Rejected(SubmissionError),
    Failed(SubmissionError),
}

/// Validates one field and renders the result next to it.
/// A missing control counts as valid.
pub fn validate_and_render<V: ContactFormView>(view: &mut V, field: FieldName) -> Result<(), FieldError> {
    let Some(value) = view.field_value(field) else {
        return Ok(());
    };
    let result = validate_field(&FormField::new(field, value));
    view.render_field_error(field, &FieldErrorDisplay::for_result(&result));
    result
}

/// Validates every required field, collecting all failures
pub fn validate_form<V: ContactFormView>(view: &mut V) -> Result<(), SubmissionError> {
    let errors: Vec<FieldError> = FieldName::REQUIRED
        .iter()
        .filter_map(|&field| validate_and_render(view, field).err())
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(SubmissionError::Validation(errors))
    }
}

/// Resolves the selected method to a usable provider. No selection means the default method.
pub fn resolve_provider<'a>(
    config: &'a SiteConfig,
    selected: Option<&str>,
) -> Result<&'a ProviderConfig, SubmissionError> {
    let method = match selected {
        Some(value) => value.parse::<SubmissionMethod>()?,
        None => SubmissionMethod::default(),
    };
    let provider = config.provider(method);
    if provider.is_configured() {
        Ok(provider)
    } else {
        Err(SubmissionError::Configuration(method.display_name().to_string()))
    }
}

pub struct ContactPipeline<'a> {
    config: &'a SiteConfig,
    state: SubmissionState,
    transitions: Vec<SubmissionState>,
}

impl<'a> ContactPipeline<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            config,
            state: SubmissionState::Idle,
            transitions: Vec::new(),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Every state entered so far, in order
    pub fn transitions(&self) -> &[SubmissionState] {
        &self.transitions
    }

    fn enter(&mut self, next: SubmissionState) {
        tracing::debug!(from = ?self.state, to = ?next, "submission state changed");
        self.state = next;
        self.transitions.push(next);
    }

    fn reject<N: Notifier>(&mut self, notifier: &mut N, error: SubmissionError) -> SubmissionOutcome {
        tracing::warn!(%error, "submission rejected");
        self.enter(SubmissionState::Rejected);
        notifier.notify(self.notification(&error));
        self.enter(SubmissionState::Idle);
        SubmissionOutcome::Rejected(error)
    }

    fn notification(&self, error: &SubmissionError) -> NotificationEvent {
        error
            .notification(&self.config.fallback_contact)
            .with_ttl(self.config.toast_ttl_ms)
    }

    /// Runs one submission attempt to completion.
    ///
    /// Suspends only while the transport call is in flight. The submit button
    /// stays disabled for that time, which is the only guard against a second
    /// attempt.
    pub async fn submit<V, N, T>(
        &mut self,
        selected: Option<&str>,
        view: &mut V,
        notifier: &mut N,
        transport: &T,
    ) -> SubmissionOutcome
    where
        V: ContactFormView,
        N: Notifier,
        T: FormTransport,
    {
        self.enter(SubmissionState::Validating);
        if let Err(error) = validate_form(view) {
            return self.reject(notifier, error);
        }

        self.enter(SubmissionState::Configuring);
        let provider = match resolve_provider(self.config, selected) {
            Ok(provider) => provider,
            Err(error) => return self.reject(notifier, error),
        };
        let payload = SubmissionPayload::build(&view.entries(), provider, self.config);

        self.enter(SubmissionState::Submitting);
        view.render_submit_button(SubmitButtonState::Busy);
        let result = match transport.post(&payload).await {
            Ok(response) => response.into_result(),
            Err(error) => Err(error),
        };

        let outcome = match result {
            Ok(()) => {
                self.enter(SubmissionState::Succeeded);
                notifier.notify(
                    NotificationEvent::new(SUCCESS_MESSAGE, Severity::Success)
                        .with_ttl(self.config.toast_ttl_ms),
                );
                view.reset();
                SubmissionOutcome::Sent
            }
            Err(error) => {
                tracing::warn!(%error, "form submission failed");
                self.enter(SubmissionState::Failed);
                notifier.notify(self.notification(&error));
                SubmissionOutcome::Failed(error)
            }
        };

        view.render_submit_button(SubmitButtonState::Ready);
        self.enter(SubmissionState::Idle);
        outcome
    }
}
