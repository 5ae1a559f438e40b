//! Credential verification.
//!
//! [`authorize`] is the hook an authentication layer calls on login. Bad
//! input, an unknown email and a wrong password all produce `Ok(None)` so the
//! caller cannot tell which factor failed; the concrete [`Rejection`] is only
//! recorded on the `auth.authorize` span. A failing user lookup is the one
//! case surfaced as an error.

pub mod password;
pub mod store;

pub use store::UserStore;

use crate::models::User;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use tracing::{Span, error, instrument, warn};

pub const MIN_PASSWORD_LENGTH: usize = 6;

pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

/// Length is measured in UTF-16 code units, so a character outside the
/// Basic Multilingual Plane counts twice.
pub fn valid_password(password: &str) -> bool {
    password.encode_utf16().count() >= MIN_PASSWORD_LENGTH
}

#[derive(Deserialize)]
struct RawCredentials {
    email: String,
    password: String,
}

/// Credentials that passed shape validation.
pub struct Credentials {
    email: String,
    password: SecretString,
}

impl Credentials {
    /// Validate an untrusted credentials object.
    #[must_use]
    pub fn parse(value: &Value) -> Option<Self> {
        let raw = RawCredentials::deserialize(value).ok()?;

        if !valid_email(&raw.email) || !valid_password(&raw.password) {
            return None;
        }

        Some(Self {
            email: raw.email,
            password: SecretString::from(raw.password),
        })
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Why a login attempt was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MalformedCredentials,
    UnknownUser,
    PasswordMismatch,
}

impl Rejection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MalformedCredentials => "malformed_credentials",
            Self::UnknownUser => "unknown_user",
            Self::PasswordMismatch => "password_mismatch",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Failed to fetch user.")]
    FetchUser(#[source] sqlx::Error),
}

/// Return the user when `credentials` match a stored account, `None` otherwise.
///
/// # Errors
/// Returns [`AuthError::FetchUser`] when the user lookup itself fails.
#[instrument(name = "auth.authorize", skip_all, fields(auth.outcome = tracing::field::Empty))]
pub async fn authorize<S>(store: &S, credentials: &Value) -> Result<Option<User>, AuthError>
where
    S: UserStore + ?Sized,
{
    let span = Span::current();

    match check(store, credentials).await? {
        Ok(user) => {
            span.record("auth.outcome", "success");
            Ok(Some(user))
        }
        Err(rejection) => {
            span.record("auth.outcome", rejection.as_str());
            Ok(None)
        }
    }
}

/// Like [`authorize`], but keeps the rejection reason.
///
/// # Errors
/// Returns [`AuthError::FetchUser`] when the user lookup itself fails.
pub async fn check<S>(store: &S, credentials: &Value) -> Result<Result<User, Rejection>, AuthError>
where
    S: UserStore + ?Sized,
{
    let Some(credentials) = Credentials::parse(credentials) else {
        return Ok(Err(Rejection::MalformedCredentials));
    };

    let user = match store.find_user_by_email(credentials.email()).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(Err(Rejection::UnknownUser)),
        Err(err) => {
            error!("Failed to fetch user: {}", err);
            return Err(AuthError::FetchUser(err));
        }
    };

    match password::verify(
        credentials.password.expose_secret().to_string(),
        user.password.clone(),
    )
    .await
    {
        Ok(true) => Ok(Ok(user)),
        Ok(false) => Ok(Err(Rejection::PasswordMismatch)),
        Err(err) => {
            warn!("Stored password hash could not be checked: {}", err);
            Ok(Err(Rejection::PasswordMismatch))
        }
    }
}
