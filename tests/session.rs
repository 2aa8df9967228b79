mod common;

use drill_terminal::session::{LoginForm, SessionStore, SignupForm};

use common::FakeApi;

#[test]
fn login_with_empty_fields_is_rejected_without_a_call() {
    let api = FakeApi::accepting();
    let mut session = SessionStore::new();

    assert!(!session.login(&api, "", "secret"));
    assert!(!session.login(&api, "john@example.com", "   "));

    assert!(!session.is_authenticated());
    assert!(session.user().is_none());
    assert_eq!(api.calls(), 0);
}

#[test]
fn login_success_then_logout() {
    let api = FakeApi::accepting();
    let mut session = SessionStore::new();

    assert!(session.login(&api, "  john.doe@example.com ", "secret"));
    assert!(session.is_authenticated());
    let user = session.user().expect("user after login");
    assert_eq!(user.email, "john.doe@example.com");
    assert_eq!(user.name, "John Doe");

    session.logout();
    assert!(!session.is_authenticated());
    assert!(session.user().is_none());
}

#[test]
fn rejected_login_leaves_session_untouched() {
    let api = FakeApi::rejecting();
    let mut session = SessionStore::new();

    assert!(!session.login(&api, "john@example.com", "wrong"));
    assert!(!session.is_authenticated());
    assert_eq!(api.calls(), 1);
}

#[test]
fn signup_requires_name_email_and_password() {
    let api = FakeApi::accepting();
    let mut session = SessionStore::new();
    let form = SignupForm {
        name: "Jane Smith".to_string(),
        email: String::new(),
        password: "secret".to_string(),
        position: "Winger".to_string(),
        team: "Hawks FC".to_string(),
    };

    assert!(!session.signup(&api, &form));
    assert!(!session.is_authenticated());
    assert_eq!(api.calls(), 0);
}

#[test]
fn signup_keeps_form_identity() {
    let api = FakeApi::accepting();
    let mut session = SessionStore::new();
    let form = SignupForm {
        name: "Jane Smith".to_string(),
        email: "jane@example.com".to_string(),
        password: "secret".to_string(),
        position: String::new(),
        team: String::new(),
    };

    assert!(session.signup(&api, &form));
    let user = session.user().expect("user after signup");
    assert_eq!(user.name, "Jane Smith");
    assert_eq!(user.email, "jane@example.com");
    assert_eq!(user.initials(), "JS");
}

#[test]
fn passwords_are_sent_as_typed() {
    let login = LoginForm {
        email: " john@example.com ".to_string(),
        password: " pw ".to_string(),
    };
    let creds = login.validate().expect("valid login");
    assert_eq!(creds.email, "john@example.com");
    assert_eq!(creds.password, " pw ");

    let signup = SignupForm {
        name: "Jane Roe".to_string(),
        email: "jane@example.com".to_string(),
        password: "\tpass phrase ".to_string(),
        ..SignupForm::default()
    };
    let registration = signup.validate().expect("valid signup");
    assert_eq!(registration.password, "\tpass phrase ");
}

#[test]
fn blank_password_is_still_missing() {
    let login = LoginForm {
        email: "john@example.com".to_string(),
        password: " \t ".to_string(),
    };
    assert!(login.validate().is_err());

    let signup = SignupForm {
        name: "Jane Roe".to_string(),
        email: "jane@example.com".to_string(),
        password: "   ".to_string(),
        ..SignupForm::default()
    };
    assert!(signup.validate().is_err());
}
