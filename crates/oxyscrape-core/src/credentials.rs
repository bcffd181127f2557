use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::ScrapeError;

/// API username/password pair, presented as HTTP Basic on every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ScrapeError> {
        let username = username.into();
        let password = password.into();

        if username.is_empty() {
            return Err(ScrapeError::invalid("username must not be empty"));
        }
        if password.is_empty() {
            return Err(ScrapeError::invalid("password must not be empty"));
        }

        Ok(Self { username, password })
    }

    /// Read credentials from environment variables.
    ///
    /// - `OXYLABS_USERNAME` (required)
    /// - `OXYLABS_PASSWORD` (required)
    pub fn from_env() -> Result<Self, ScrapeError> {
        let username = std::env::var("OXYLABS_USERNAME")
            .map_err(|_| ScrapeError::invalid("OXYLABS_USERNAME not set"))?;
        let password = std::env::var("OXYLABS_PASSWORD")
            .map_err(|_| ScrapeError::invalid("OXYLABS_PASSWORD not set"))?;
        Self::new(username, password)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// `Basic <base64(username:password)>`
    pub fn authorization_header(&self) -> String {
        let token = BASE64.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {token}")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
