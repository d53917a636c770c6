//! Types for the users API requests and responses.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::time::Duration;

/// Environment variable holding the backend base address.
pub const API_URL_ENV: &str = "USERS_API_URL";

/// Configuration for connecting to the users service.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Base URL of the service (e.g., "http://localhost:8080")
    ///
    /// May be empty. Requests then fail individually with `InvalidUrl`.
    pub base_url: String,
    /// Override for the `User-Agent` header
    pub user_agent: Option<String>,
    /// Request timeout; `None` leaves it to the transport
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a config with just the base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: None,
            timeout: None,
        }
    }

    /// Read the base URL from `USERS_API_URL`.
    ///
    /// There is no fallback address: an unset variable yields an empty base.
    pub fn from_env() -> Self {
        Self::new(std::env::var(API_URL_ENV).unwrap_or_default())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

// =============================================================================
// Resource Types
// =============================================================================

/// Server-assigned user identifier.
///
/// Opaque to the client. The service may hand out numbers or strings, and
/// the value is echoed back unchanged in request paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Numeric(n) => write!(f, "{}", n),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        UserId::Numeric(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId::Text(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        UserId::Text(id)
    }
}

/// A user record as returned by the service.
///
/// The identifier is serialized as `ID` on the wire. A missing or null
/// `name`/`email` reads as an empty string so one odd record does not
/// spoil the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "ID")]
    pub id: UserId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl User {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Request body for create and update.
///
/// Never carries an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
}

impl UserPayload {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
