//! User Manager
//!
//! Client-side state and synchronization for the remote users resource.
//!
//! This crate provides:
//! - A single state container (form, edit target, search query, user collection)
//! - Create/update/delete with a full collection refresh after every success
//! - Single-record lookup
//! - A non-blocking notification stream for the presentation layer
//!
//! # Architecture
//!
//! `users-manager` knows nothing about rendering or HTTP. The service is
//! reached through the [`users_client::UserApi`] trait, and everything the
//! user should see comes out of [`Notifications`].
//!
//! # Example
//!
//! ```ignore
//! use users_client::{ClientConfig, UsersClient};
//! use users_manager::{NotificationKind, UserManager};
//!
//! let (manager, mut notifications) = UserManager::new(UsersClient::new(ClientConfig::from_env())?);
//! manager.initialize().await.ok();
//!
//! if let Some(user) = manager.users().await.first() {
//!     manager.start_edit(user).await;
//! }
//! manager.set_email("new@x.com").await;
//! manager.submit().await.ok();
//!
//! while let Some(n) = notifications.try_recv() {
//!     if n.kind == NotificationKind::Error {
//!         eprintln!("{}", n.message);
//!     }
//! }
//! ```

mod error;
mod manager;
pub mod notify;
mod state;

pub use error::{ManagerError, Result};
pub use manager::{RefreshHandle, UserManager};
pub use notify::{Notification, NotificationKind, Notifications};
pub use state::{FormMode, FormState, ManagerState};
