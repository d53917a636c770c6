//! Users REST Client
//!
//! HTTP client library for the remote "users" resource.
//!
//! # Endpoints
//!
//! - `GET /users` - full collection, in server order
//! - `GET /users/{id}` - single record
//! - `POST /users` - create from `{name, email}`
//! - `PUT /users/{id}` - replace with `{name, email}`
//! - `DELETE /users/{id}` - remove
//!
//! Records come back with an uppercase `ID` field while create/update
//! bodies carry only `name` and `email`. The identifier travels in the path.
//!
//! # Example
//!
//! ```ignore
//! use users_client::{ClientConfig, UserApi, UserPayload, UsersClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = UsersClient::new(ClientConfig::from_env())?;
//!
//!     client
//!         .create_user(&UserPayload::new("Ann", "a@x.com"))
//!         .await?;
//!
//!     for user in client.list_users().await? {
//!         println!("{} {} <{}>", user.id, user.name, user.email);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod api;
mod client;
mod error;
mod types;

pub use api::UserApi;
pub use client::UsersClient;
pub use error::{ClientError, Result};
pub use types::{ClientConfig, User, UserId, UserPayload, API_URL_ENV};
