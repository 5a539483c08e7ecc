//! Login flow tests
//! End-to-end scenarios over the flow, the form state and the collaborators

mod common;

use common::TestEnv;
use sigil_common::auth::{AuthenticatedUser, CredentialCheck, NotificationKind, Role, StaticCredentials};
use sigil_common::form::SubmitRejected;
use sigil_common::login::{LoginOutcome, LoginPhase};
use sigil_common::validation::{PASSWORD_FIELD, PASSWORD_NEEDS_UPPERCASE, USERNAME_FIELD};

#[tokio::test]
async fn test_admin_login_succeeds() {
    let env = TestEnv::new();
    env.fill("admin", "Admin123.");

    let outcome = env.flow.submit().expect("submit accepted").await;

    let admin = AuthenticatedUser {
        username: "admin".to_string(),
        role: Role::Admin,
    };
    assert_eq!(outcome, LoginOutcome::Success(admin.clone()));
    assert_eq!(*env.recorder.users.borrow(), vec![admin]);
    assert_eq!(*env.recorder.routes.borrow(), vec!["/dashboard".to_string()]);
    assert_eq!(
        *env.recorder.notifications.borrow(),
        vec![(NotificationKind::Success, "Logged in successfully".to_string())]
    );
    assert_eq!(env.credentials.calls.get(), 1);
    assert!(!env.flow.form().is_submitting());
}

#[tokio::test]
async fn test_mismatch_notifies_and_stays_editing() {
    let env = TestEnv::new();
    // passes the schema, matches no record
    env.fill("admin", "Wrong123.");

    let outcome = env.flow.submit().expect("submit accepted").await;

    assert_eq!(outcome, LoginOutcome::Failure);
    assert_eq!(env.flow.phase(), LoginPhase::Editing);
    assert!(env.recorder.routes.borrow().is_empty());
    assert!(env.recorder.users.borrow().is_empty());
    assert_eq!(
        *env.recorder.notifications.borrow(),
        vec![(NotificationKind::Error, "Invalid username or password".to_string())]
    );
    // whole-form failure: no field error is attached
    assert_eq!(env.flow.form().error(USERNAME_FIELD), None);
    assert_eq!(env.flow.form().error(PASSWORD_FIELD), None);
}

#[tokio::test]
async fn test_wrong_password_never_reaches_check() {
    let env = TestEnv::new();
    env.fill("admin", "wrong");
    assert_eq!(StaticCredentials::builtin().check("admin", "wrong"), None);

    assert_eq!(env.flow.submit().err(), Some(SubmitRejected::Invalid));
    assert_eq!(env.credentials.calls.get(), 0);
    assert!(env.recorder.routes.borrow().is_empty());
    assert!(env.flow.submit_button().is_disabled());
}

#[tokio::test]
async fn test_second_submit_while_submitting_is_rejected() {
    let env = TestEnv::new();
    env.fill("editor", "Editor123.");

    let first = env.flow.submit().expect("first submit accepted");
    assert_eq!(env.flow.phase(), LoginPhase::Submitting);
    assert!(env.flow.submit_button().render().disabled);

    assert_eq!(env.flow.submit().err(), Some(SubmitRejected::InProgress));
    assert_eq!(env.credentials.calls.get(), 1);

    first.await;
    assert_eq!(env.credentials.calls.get(), 1);
    assert_eq!(env.recorder.routes.borrow().len(), 1);
    assert_eq!(env.recorder.users.borrow().len(), 1);
}

#[tokio::test]
async fn test_retry_after_failure() {
    let env = TestEnv::new();
    env.fill("editor", "Admin123.");
    assert_eq!(env.flow.submit().unwrap().await, LoginOutcome::Failure);

    env.fill("editor", "Editor123.");
    let outcome = env.flow.submit().unwrap().await;
    assert!(matches!(outcome, LoginOutcome::Success(ref u) if u.role == Role::Editor));
    assert_eq!(env.credentials.calls.get(), 2);
}

#[tokio::test]
async fn test_failure_after_success_returns_to_editing() {
    let env = TestEnv::new();
    env.fill("admin", "Admin123.");
    assert!(matches!(env.flow.submit().unwrap().await, LoginOutcome::Success(_)));
    assert!(matches!(env.flow.phase(), LoginPhase::Succeeded(_)));

    env.fill("admin", "Wrong123.");
    assert_eq!(env.flow.submit().unwrap().await, LoginOutcome::Failure);
    assert_eq!(env.flow.phase(), LoginPhase::Editing);
}

#[tokio::test]
async fn test_dropped_submission_releases_form() {
    let env = TestEnv::new();
    env.fill("admin", "Admin123.");

    let pending = env.flow.submit().unwrap();
    drop(pending);
    assert!(!env.flow.form().is_submitting());
    assert!(env.flow.submit().is_ok());
}

#[test]
fn test_lowercase_password_reports_uppercase_rule() {
    let env = TestEnv::new();
    env.fill("admin", "alllowercase1!");
    assert_eq!(
        env.flow.form().error(PASSWORD_FIELD).as_deref(),
        Some(PASSWORD_NEEDS_UPPERCASE)
    );
}
