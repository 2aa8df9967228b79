mod common;

use drill_terminal::config::AppConfig;
use drill_terminal::http_api::{parse_login_response, parse_register_response};
use drill_terminal::session::Registration;

use common::read_fixture;

fn registration() -> Registration {
    Registration {
        name: "New Player".to_string(),
        email: "typed@example.com".to_string(),
        password: "secret".to_string(),
        position: "Winger".to_string(),
        team: "Hawks FC".to_string(),
    }
}

#[test]
fn login_fixture_carries_full_identity() {
    let user = parse_login_response(&read_fixture("login_response.json")).expect("valid login");
    assert_eq!(user.id, "42");
    assert_eq!(user.email, "jane.smith@example.com");
    assert_eq!(user.name, "Jane Smith");
    assert_eq!(user.position, "Midfielder");
    assert_eq!(user.team, "Lions United");
}

#[test]
fn login_with_only_email_derives_a_name() {
    let raw = r#"{ "response": { "email": "mike_chen@example.com" } }"#;
    let user = parse_login_response(raw).expect("valid login");
    assert_eq!(user.email, "mike_chen@example.com");
    assert_eq!(user.name, "Mike Chen");
    assert!(user.team.is_empty());
}

#[test]
fn login_without_email_is_an_error() {
    assert!(parse_login_response(r#"{ "response": {} }"#).is_err());
    assert!(parse_login_response(r#"{ "message": "ok" }"#).is_err());
    assert!(parse_login_response("<html>").is_err());
}

#[test]
fn register_prefers_service_email_and_keeps_form_fields() {
    let user = parse_register_response(&read_fixture("register_response.json"), &registration())
        .expect("valid register");
    assert_eq!(user.email, "new.player@example.com");
    assert_eq!(user.name, "New Player");
    assert_eq!(user.position, "Winger");
    assert_eq!(user.team, "Hawks FC");
}

#[test]
fn register_falls_back_to_form_email() {
    let user = parse_register_response("{}", &registration()).expect("valid register");
    assert_eq!(user.email, "typed@example.com");
}

#[test]
fn endpoints_join_base_and_path() {
    let config = AppConfig {
        api_base: "http://drills.local:3000".to_string(),
        ..AppConfig::default()
    };
    assert_eq!(config.endpoint("analyze"), "http://drills.local:3000/analyze");
    assert_eq!(config.endpoint("/login"), "http://drills.local:3000/login");
}
