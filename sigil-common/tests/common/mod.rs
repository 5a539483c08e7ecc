//! Common test utilities and helpers

#![allow(dead_code)]

use sigil_common::auth::{
    AuthenticatedUser, CredentialCheck, Navigator, NotificationKind, Notifier, SessionStore,
    StaticCredentials,
};
use sigil_common::config::LoginConfig;
use sigil_common::login::{Collaborators, LoginFlow};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Credential check that counts its invocations
pub struct CountingCredentials {
    inner: StaticCredentials,
    pub calls: Cell<usize>,
}

impl CredentialCheck for CountingCredentials {
    fn check(&self, username: &str, password: &str) -> Option<AuthenticatedUser> {
        self.calls.set(self.calls.get() + 1);
        self.inner.check(username, password)
    }
}

/// Records every call made to the session, navigation and notification collaborators
#[derive(Default)]
pub struct Recorder {
    pub users: RefCell<Vec<AuthenticatedUser>>,
    pub routes: RefCell<Vec<String>>,
    pub notifications: RefCell<Vec<(NotificationKind, String)>>,
}

impl SessionStore for Recorder {
    fn set_user(&self, user: AuthenticatedUser) {
        self.users.borrow_mut().push(user);
    }
}

impl Navigator for Recorder {
    fn navigate_to(&self, path: &str) {
        self.routes.borrow_mut().push(path.to_string());
    }
}

impl Notifier for Recorder {
    fn notify(&self, kind: NotificationKind, message: &str) {
        self.notifications
            .borrow_mut()
            .push((kind, message.to_string()));
    }
}

/// Test environment setup
pub struct TestEnv {
    pub flow: LoginFlow,
    pub credentials: Rc<CountingCredentials>,
    pub recorder: Rc<Recorder>,
}

impl TestEnv {
    pub fn new() -> Self {
        let credentials = Rc::new(CountingCredentials {
            inner: StaticCredentials::builtin(),
            calls: Cell::new(0),
        });
        let recorder = Rc::new(Recorder::default());

        let flow = LoginFlow::new(
            Collaborators {
                credentials: credentials.clone(),
                session: recorder.clone(),
                navigator: recorder.clone(),
                notifier: recorder.clone(),
            },
            LoginConfig::default(),
        )
        .expect("Failed to build login flow");

        TestEnv {
            flow,
            credentials,
            recorder,
        }
    }

    pub fn fill(&self, username: &str, password: &str) {
        let form = self.flow.form();
        form.set_field_value("username", username)
            .expect("username field");
        form.set_field_value("password", password)
            .expect("password field");
    }
}
