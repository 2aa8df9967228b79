use anyhow::{Context, Result, bail};
use reqwest::blocking::multipart::Form;
use reqwest::blocking::Response;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use serde_json::json;

use crate::config::AppConfig;
use crate::http_client::{http_client, upload_client};
use crate::remote::DrillApi;
use crate::report::{AnalysisReport, parse_analysis_json};
use crate::session::{Credentials, Registration, User};
use crate::upload::DrillSubmission;

const CLIENT_AGENT: &str = "drill_terminal/0.1";

pub struct HttpDrillApi {
    config: AppConfig,
}

impl HttpDrillApi {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}

impl DrillApi for HttpDrillApi {
    fn login(&self, creds: &Credentials) -> Result<User> {
        let client = http_client()?;
        let resp = client
            .post(self.config.endpoint("login"))
            .header(USER_AGENT, CLIENT_AGENT)
            .json(&json!({
                "email": creds.email,
                "password": creds.password,
            }))
            .send()
            .context("login request failed")?;
        let body = success_body(resp)?;
        parse_login_response(&body)
    }

    fn register(&self, registration: &Registration) -> Result<User> {
        let client = http_client()?;
        let resp = client
            .post(self.config.endpoint("register"))
            .header(USER_AGENT, CLIENT_AGENT)
            .json(&json!({
                "email": registration.email,
                "password": registration.password,
                "fullName": registration.name,
            }))
            .send()
            .context("register request failed")?;
        let body = success_body(resp)?;
        parse_register_response(&body, registration)
    }

    fn analyze(&self, drill: &DrillSubmission) -> Result<Option<AnalysisReport>> {
        let client = upload_client(self.config.analyze_timeout)?;
        let mut form = Form::new()
            .file("video", &drill.path)
            .with_context(|| format!("failed reading {}", drill.path.display()))?;
        if let Some(title) = drill.meta.title.as_deref() {
            form = form.text("title", title.to_string());
        }
        if let Some(category) = drill.meta.category {
            form = form.text("category", category.label());
        }
        if let Some(difficulty) = drill.meta.difficulty {
            form = form.text("difficulty", difficulty.label());
        }

        let resp = client
            .post(self.config.endpoint("analyze"))
            .header(USER_AGENT, CLIENT_AGENT)
            .multipart(form)
            .send()
            .context("analyze request failed")?;
        let body = success_body(resp)?;
        parse_analysis_json(&body)
    }
}

fn success_body(resp: Response) -> Result<String> {
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        bail!("http {}: {}", status, body);
    }
    Ok(body)
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    response: Option<IdentityFragment>,
}

#[derive(Debug, Default, Deserialize)]
struct IdentityFragment {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default, alias = "fullName")]
    name: Option<String>,
    #[serde(default)]
    position: Option<String>,
    #[serde(default)]
    team: Option<String>,
}

/// `/login` answers `{ "response": { "email": ... } }`; anything beyond the email is optional.
pub fn parse_login_response(raw: &str) -> Result<User> {
    let parsed: LoginResponse = serde_json::from_str(raw).context("invalid login response")?;
    let Some(identity) = parsed.response else {
        bail!("login response carried no identity");
    };
    let Some(email) = identity.email.as_deref().filter(|e| !e.trim().is_empty()) else {
        bail!("login response carried no email");
    };
    let mut user = User::from_email(email);
    apply_fragment(&mut user, identity);
    Ok(user)
}

/// `/register` answers `{ "email": ... }`; name, position and team come from the form.
pub fn parse_register_response(raw: &str, registration: &Registration) -> Result<User> {
    let identity: IdentityFragment =
        serde_json::from_str(raw).context("invalid register response")?;
    let email = identity
        .email
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or(&registration.email)
        .to_string();
    let mut user = User {
        id: email.clone(),
        name: registration.name.clone(),
        email,
        position: registration.position.clone(),
        team: registration.team.clone(),
    };
    apply_fragment(&mut user, identity);
    Ok(user)
}

fn apply_fragment(user: &mut User, identity: IdentityFragment) {
    if let Some(id) = identity.id {
        user.id = match id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
    }
    if let Some(name) = identity.name.filter(|v| !v.trim().is_empty()) {
        user.name = name;
    }
    if let Some(position) = identity.position.filter(|v| !v.trim().is_empty()) {
        user.position = position;
    }
    if let Some(team) = identity.team.filter(|v| !v.trim().is_empty()) {
        user.team = team;
    }
}
