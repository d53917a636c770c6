//! Transport-independent view of the users service.

use crate::error::Result;
use crate::types::{User, UserId, UserPayload};
use async_trait::async_trait;

/// The five operations the users service exposes.
///
/// `UsersClient` is the HTTP implementation. Anything driving the service
/// (state containers, tests) should depend on this trait instead.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Fetch the full collection, in server order.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Fetch one record as the service sent it. `id` is passed through
    /// unvalidated.
    ///
    /// The body is not required to fit [`User`]; extra or null fields are
    /// kept as-is.
    async fn get_user(&self, id: &str) -> Result<serde_json::Value>;

    /// Create a record. The response body is ignored.
    async fn create_user(&self, payload: &UserPayload) -> Result<()>;

    /// Replace a record. The response body is ignored.
    async fn update_user(&self, id: &UserId, payload: &UserPayload) -> Result<()>;

    /// Delete a record. The response body is ignored.
    async fn delete_user(&self, id: &UserId) -> Result<()>;
}
