//! Core of the Sigil credential form, shared with sigil-ui
//!
//! Everything in this crate is DOM-free: the UI crate holds these
//! controllers and renders the view models they produce.

pub mod auth;
pub mod button;
pub mod config;
pub mod field;
pub mod form;
pub mod logging;
pub mod login;
pub mod validation;

pub use auth::{
    AuthenticatedUser, CredentialCheck, CredentialRecord, Navigator, NotificationKind, Notifier,
    Role, SessionStore, StaticCredentials,
};
pub use button::{ActionButton, ButtonActivation, ButtonType, ButtonVariant, ButtonView};
pub use config::{ConfigError, SigilConfig};
pub use field::{FieldEvent, FieldKind, FieldView, InputField, InputVariant, InteractionState};
pub use form::{FieldValue, FormState, FormValues, SubmitRejected};
pub use login::{Collaborators, LoginFlow, LoginOutcome, LoginPhase};
pub use validation::{FieldDescriptor, ValidationRule, ValidationSchema};

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Field '{field}' expects a {expected} value")]
    ValueKindMismatch {
        field: String,
        expected: &'static str,
    },

    #[error("Duplicate form field: {0}")]
    DuplicateField(String),

    #[error("Field '{field}' is declared as {declared:?} but rendered as {rendered:?}")]
    VariantMismatch {
        field: String,
        declared: FieldKind,
        rendered: FieldKind,
    },

    #[error("Invalid validation pattern for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
