//! HTTP client for the users service.

use crate::api::UserApi;
use crate::error::{ClientError, Result};
use crate::types::{ClientConfig, User, UserId, UserPayload};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, warn};
use url::Url;

/// Client for the remote users resource.
///
/// Construction does not require a usable base URL. A missing or malformed
/// address is reported by each request as [`ClientError::InvalidUrl`], so a
/// misconfigured client degrades to "every request fails" rather than
/// refusing to start.
///
/// No retries are attempted and no timeout is set unless the config asks
/// for one.
///
/// # Example
///
/// ```ignore
/// use users_client::{ClientConfig, UserApi, UsersClient};
///
/// let client = UsersClient::new(ClientConfig::new("http://localhost:8080"))?;
/// let users = client.list_users().await?;
/// println!("Found {} users", users.len());
/// ```
#[derive(Debug, Clone)]
pub struct UsersClient {
    http: Client,
    base_url: String,
}

impl UsersClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            warn!("No users API base URL configured, requests will fail");
        }

        let user_agent = config
            .user_agent
            .unwrap_or_else(|| format!("users-client/{}", env!("CARGO_PKG_VERSION")));

        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self { http, base_url })
    }

    /// Get the normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build `{base}/users` or `{base}/users/{id}`.
    ///
    /// The id is percent-encoded as a single path segment.
    fn endpoint(&self, id: Option<&str>) -> Result<Url> {
        if self.base_url.is_empty() {
            return Err(ClientError::InvalidUrl("base URL is not configured".into()));
        }

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ClientError::InvalidUrl(self.base_url.clone()))?;
            segments.pop_if_empty().push("users");
            if let Some(id) = id {
                segments.push(id);
            }
        }

        Ok(url)
    }

    /// Send a request and turn any non-2xx answer into an error.
    async fn send(request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ClientError::ServerUnreachable(e.to_string())
            } else {
                ClientError::Request(e)
            }
        })?;

        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

#[async_trait]
impl UserApi for UsersClient {
    async fn list_users(&self) -> Result<Vec<User>> {
        let url = self.endpoint(None)?;
        debug!(url = %url, "Fetching all users");

        let response = Self::send(self.http.get(url)).await?;
        let users: Vec<User> = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse user list: {}", e))
        })?;

        debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    async fn get_user(&self, id: &str) -> Result<serde_json::Value> {
        let url = self.endpoint(Some(id))?;
        debug!(url = %url, user_id = %id, "Fetching user");

        let response = Self::send(self.http.get(url)).await.map_err(|e| {
            if e.is_not_found() {
                debug!(user_id = %id, "User not found");
            }
            e
        })?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse user record: {}", e)))
    }

    async fn create_user(&self, payload: &UserPayload) -> Result<()> {
        let url = self.endpoint(None)?;
        debug!(url = %url, name = %payload.name, "Creating user");

        Self::send(self.http.post(url).json(payload)).await?;
        Ok(())
    }

    async fn update_user(&self, id: &UserId, payload: &UserPayload) -> Result<()> {
        let url = self.endpoint(Some(&id.to_string()))?;
        debug!(url = %url, user_id = %id, "Updating user");

        Self::send(self.http.put(url).json(payload)).await?;
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> Result<()> {
        let url = self.endpoint(Some(&id.to_string()))?;
        debug!(url = %url, user_id = %id, "Deleting user");

        Self::send(self.http.delete(url)).await?;
        Ok(())
    }
}
