use crate::form::{FormError, non_empty};
use crate::remote::DrillApi;

pub const POSITIONS: [&str; 6] = [
    "Goalkeeper",
    "Defender",
    "Midfielder",
    "Forward",
    "Striker",
    "Winger",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub position: String,
    pub team: String,
}

impl User {
    /// Identity built from nothing but an email, which is all `/login` hands back.
    pub fn from_email(email: &str) -> Self {
        let email = email.trim();
        Self {
            id: email.to_string(),
            name: name_from_email(email),
            email: email.to_string(),
            position: String::new(),
            team: String::new(),
        }
    }

    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub position: String,
    pub team: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Blank-only passwords count as empty, but a valid password is sent exactly as typed.
    pub fn validate(&self) -> Result<Credentials, FormError> {
        let (Some(email), Some(_)) = (non_empty(&self.email), non_empty(&self.password)) else {
            return Err(FormError::MissingCredentials);
        };
        Ok(Credentials {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub position: String,
    pub team: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<Registration, FormError> {
        let (Some(name), Some(email), Some(_)) = (
            non_empty(&self.name),
            non_empty(&self.email),
            non_empty(&self.password),
        ) else {
            return Err(FormError::MissingSignupFields);
        };
        Ok(Registration {
            name: name.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
            position: self.position.trim().to_string(),
            team: self.team.trim().to_string(),
        })
    }

    pub fn cycle_position(&mut self) {
        self.position = next_position(&self.position).to_string();
    }
}

/// Holds the one authenticated identity. `adopt` and `logout` are the only writers.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    user: Option<User>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn login(&mut self, api: &dyn DrillApi, email: &str, password: &str) -> bool {
        let form = LoginForm {
            email: email.to_string(),
            password: password.to_string(),
        };
        let Ok(creds) = form.validate() else {
            return false;
        };
        match api.login(&creds) {
            Ok(user) => {
                self.adopt(user);
                true
            }
            Err(_) => false,
        }
    }

    pub fn signup(&mut self, api: &dyn DrillApi, form: &SignupForm) -> bool {
        let Ok(registration) = form.validate() else {
            return false;
        };
        match api.register(&registration) {
            Ok(user) => {
                self.adopt(user);
                true
            }
            Err(_) => false,
        }
    }

    pub fn adopt(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn logout(&mut self) {
        self.user = None;
    }
}

pub fn next_position(current: &str) -> &'static str {
    match POSITIONS.iter().position(|p| *p == current) {
        Some(idx) => POSITIONS[(idx + 1) % POSITIONS.len()],
        None => POSITIONS[0],
    }
}

pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .collect::<String>()
        .to_uppercase()
}

fn name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    local
        .split(['.', '_', '-', '+'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
