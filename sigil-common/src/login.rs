//! Login flow: two validated fields, one submit control, injected collaborators
//!
//! editing -> (validating) -> submitting -> success | failure -> editing.
//! A credential mismatch is a whole-form failure: it is reported through the
//! notifier and never attached to a field.

use crate::auth::{
    AuthenticatedUser, CredentialCheck, Navigator, NotificationKind, Notifier, SessionStore,
};
use crate::button::{ActionButton, ButtonType};
use crate::config::LoginConfig;
use crate::field::{InputField, InputVariant, PasswordOptions, TextOptions};
use crate::form::{FormState, SubmitRejected};
use crate::validation::{login_schema, PASSWORD_FIELD, USERNAME_FIELD};
use crate::{Error, Result};
use futures::future::{self, LocalBoxFuture};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{info, warn};

/// External services the flow delegates to
#[derive(Clone)]
pub struct Collaborators {
    pub credentials: Rc<dyn CredentialCheck>,
    pub session: Rc<dyn SessionStore>,
    pub navigator: Rc<dyn Navigator>,
    pub notifier: Rc<dyn Notifier>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginPhase {
    Editing,
    Submitting,
    Succeeded(AuthenticatedUser),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success(AuthenticatedUser),
    /// Credential mismatch; the form stays editable
    Failure,
}

pub struct LoginFlow {
    form: FormState,
    username: InputField,
    password: InputField,
    collaborators: Collaborators,
    config: LoginConfig,
    /// User of the most recent resolved submit; `None` after a failure
    signed_in: Rc<RefCell<Option<AuthenticatedUser>>>,
}

impl LoginFlow {
    pub fn new(collaborators: Collaborators, config: LoginConfig) -> Result<Self> {
        let schema = login_schema()?;
        let descriptor = |name: &str| {
            schema
                .field(name)
                .ok_or_else(|| Error::UnknownField(name.to_string()))
        };

        let username = InputField::for_descriptor(
            descriptor(USERNAME_FIELD)?,
            InputVariant::Text(TextOptions {
                placeholder: "Enter your username".to_string(),
                ..Default::default()
            }),
        )?
        .with_label("Username");

        let password = InputField::for_descriptor(
            descriptor(PASSWORD_FIELD)?,
            InputVariant::Password(PasswordOptions {
                text: TextOptions {
                    placeholder: "Enter your password".to_string(),
                    ..Default::default()
                },
                ..Default::default()
            }),
        )?
        .with_label("Password");

        Ok(Self {
            form: FormState::new(schema),
            username,
            password,
            collaborators,
            config,
            signed_in: Rc::new(RefCell::new(None)),
        })
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn phase(&self) -> LoginPhase {
        if self.form.is_submitting() {
            return LoginPhase::Submitting;
        }
        match self.signed_in.borrow().as_ref() {
            Some(user) => LoginPhase::Succeeded(user.clone()),
            None => LoginPhase::Editing,
        }
    }

    pub fn username_field(&self) -> InputField {
        self.username.clone()
    }

    pub fn password_field(&self) -> InputField {
        self.password.clone()
    }

    /// Submit control; disabled until the form is valid, loading while submitting
    pub fn submit_button(&self) -> ActionButton {
        ActionButton::labeled("Login")
            .with_type(ButtonType::Submit)
            .class("mt-4")
            .loading(self.form.is_submitting())
            .disabled(!self.form.is_valid())
    }

    /// Runs the credential check and, on success, hands off to the session,
    /// notification and navigation collaborators.
    pub fn submit(&self) -> std::result::Result<LocalBoxFuture<'static, LoginOutcome>, SubmitRejected> {
        let collaborators = self.collaborators.clone();
        let config = self.config.clone();
        let signed_in = self.signed_in.clone();

        self.form.submit(move |values| {
            let username = values.text(USERNAME_FIELD).unwrap_or_default();
            let password = values.text(PASSWORD_FIELD).unwrap_or_default();

            let outcome = match collaborators.credentials.check(username, password) {
                Some(user) => {
                    info!(username = %user.username, role = %user.role, "login succeeded");
                    collaborators.session.set_user(user.clone());
                    collaborators
                        .notifier
                        .notify(NotificationKind::Success, &config.success_message);
                    collaborators.navigator.navigate_to(&config.success_route);
                    *signed_in.borrow_mut() = Some(user.clone());
                    LoginOutcome::Success(user)
                }
                None => {
                    warn!(username, "login failed: credential mismatch");
                    *signed_in.borrow_mut() = None;
                    collaborators
                        .notifier
                        .notify(NotificationKind::Error, &config.failure_message);
                    LoginOutcome::Failure
                }
            };

            future::ready(outcome)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticCredentials;
    use crate::field::{FieldView, InputType};

    struct Noop;

    impl SessionStore for Noop {
        fn set_user(&self, _user: AuthenticatedUser) {}
    }

    impl Navigator for Noop {
        fn navigate_to(&self, _path: &str) {}
    }

    impl Notifier for Noop {
        fn notify(&self, _kind: NotificationKind, _message: &str) {}
    }

    fn flow() -> LoginFlow {
        let noop = Rc::new(Noop);
        LoginFlow::new(
            Collaborators {
                credentials: Rc::new(StaticCredentials::builtin()),
                session: noop.clone(),
                navigator: noop.clone(),
                notifier: noop,
            },
            LoginConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_initial_phase_and_button() {
        let flow = flow();
        assert_eq!(flow.phase(), LoginPhase::Editing);
        let button = flow.submit_button();
        assert!(button.is_disabled());
        assert_eq!(button.render().class, "btn btn-primary btn-hover mt-4 btn-disabled");
    }

    #[test]
    fn test_button_enables_when_valid() {
        let flow = flow();
        flow.form().set_field_value(USERNAME_FIELD, "admin").unwrap();
        flow.form().set_field_value(PASSWORD_FIELD, "Admin123.").unwrap();
        assert!(!flow.submit_button().is_disabled());
    }

    #[test]
    fn test_field_descriptors() {
        let flow = flow();
        let password = flow.password_field().render(&"".into(), None);
        match password.control {
            FieldView::TextLike(view) => {
                assert_eq!(view.input_type, InputType::Password);
                assert_eq!(view.placeholder, "Enter your password");
            }
            other => panic!("unexpected view {:?}", other),
        }
        assert_eq!(flow.username_field().props().name, USERNAME_FIELD);

        let schema = login_schema().unwrap();
        for field in [flow.username_field(), flow.password_field()] {
            let descriptor = schema.field(&field.props().name).unwrap();
            assert_eq!(field.kind(), descriptor.kind);
            assert_eq!(field.props().required, descriptor.required);
        }
    }

    #[tokio::test]
    async fn test_phase_transitions() {
        let flow = flow();
        flow.form().set_field_value(USERNAME_FIELD, "editor").unwrap();
        flow.form().set_field_value(PASSWORD_FIELD, "Editor123.").unwrap();

        let pending = flow.submit().unwrap();
        assert_eq!(flow.phase(), LoginPhase::Submitting);

        let outcome = pending.await;
        assert!(matches!(outcome, LoginOutcome::Success(ref u) if u.username == "editor"));
        assert!(matches!(flow.phase(), LoginPhase::Succeeded(_)));
    }
}
