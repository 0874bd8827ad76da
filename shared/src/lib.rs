//! Target-independent behavior of the portfolio page.
//!
//! Everything here is plain Rust: state machines, validators and projections
//! from state to the classes and styles the page applies. The `frontend`
//! crate binds these to the DOM.

pub mod animation;
pub mod config;
pub mod filter;
pub mod keyboard;
pub mod navigation;
pub mod notification;
pub mod submission;
pub mod theme;
pub mod validation;

pub use config::{ConfigError, ProviderConfig, SiteConfig};
pub use notification::{NotificationCenter, NotificationEvent, Notifier, Severity};
pub use submission::{
    ContactFormView, ContactPipeline, FormTransport, ProviderResponse, SubmissionError,
    SubmissionMethod, SubmissionOutcome, SubmissionPayload, SubmissionState,
};
pub use theme::{PreferenceStore, ThemePreference, ThemeStore};
pub use validation::{FieldError, FieldName, FormField};
