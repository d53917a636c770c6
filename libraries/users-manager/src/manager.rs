//! User manager: local state plus synchronization with the users service.
//!
//! # Sequencing
//!
//! A successful mutation (`submit`, `delete`) runs in two steps:
//!
//! 1. the request is awaited, the success notification is queued and local
//!    state is updated;
//! 2. a full refresh is spawned on the runtime and handed back as a
//!    [`RefreshHandle`].
//!
//! The refresh always starts after the notification is queued. Awaiting the
//! handle is optional; dropping it detaches the task without cancelling it.
//!
//! # Concurrent refreshes
//!
//! Nothing is de-duplicated or cancelled. Each refresh overwrites the
//! collection with whatever its own response contained, in arrival order,
//! so the last response to land wins even if its request was sent first.
//! Every refresh is numbered; applying a response older than one already
//! applied is logged and counted in [`UserManager::stale_applies`].

use crate::error::{ManagerError, Result};
use crate::notify::{self, Notifications, Notifier};
use crate::state::{FormMode, FormState, ManagerState};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use users_client::{User, UserApi, UserId};

/// Follow-up refresh spawned by a successful mutation.
#[derive(Debug)]
pub struct RefreshHandle {
    handle: JoinHandle<Result<usize>>,
}

impl RefreshHandle {
    /// Wait for the refresh to finish.
    ///
    /// Returns the size of the new collection.
    pub async fn wait(self) -> Result<usize> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(ManagerError::RefreshTask(e.to_string())),
        }
    }

    /// Let the refresh run to completion unobserved.
    pub fn detach(self) {}
}

struct Inner<A> {
    api: A,
    state: RwLock<ManagerState>,
    notifier: Notifier,
    initialized: AtomicBool,
    refresh_issued: AtomicU64,
    refresh_applied: AtomicU64,
    stale_applies: AtomicU64,
}

/// Owns the form, edit target, search query and user collection, and
/// drives the users service on their behalf.
///
/// Cloning is cheap; clones share the same state and notification channel.
///
/// # Example
///
/// ```ignore
/// use users_client::{ClientConfig, UsersClient};
/// use users_manager::UserManager;
///
/// let client = UsersClient::new(ClientConfig::from_env())?;
/// let (manager, mut notifications) = UserManager::new(client);
///
/// manager.initialize().await.ok();
///
/// manager.set_name("Ann").await;
/// manager.set_email("a@x.com").await;
/// if let Ok(refresh) = manager.submit().await {
///     refresh.wait().await.ok();
/// }
///
/// for n in notifications.drain() {
///     println!("{:?}: {}", n.kind, n.message);
/// }
/// ```
pub struct UserManager<A> {
    inner: Arc<Inner<A>>,
}

impl<A> Clone for UserManager<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: UserApi + 'static> UserManager<A> {
    /// Create a manager and the notification stream it feeds.
    pub fn new(api: A) -> (Self, Notifications) {
        let (notifier, notifications) = Notifier::channel();

        let manager = Self {
            inner: Arc::new(Inner {
                api,
                state: RwLock::new(ManagerState::default()),
                notifier,
                initialized: AtomicBool::new(false),
                refresh_issued: AtomicU64::new(0),
                refresh_applied: AtomicU64::new(0),
                stale_applies: AtomicU64::new(0),
            }),
        };

        (manager, notifications)
    }

    /// The service implementation in use.
    pub fn api(&self) -> &A {
        &self.inner.api
    }

    // =========================================================================
    // Local state
    // =========================================================================

    /// Copy of the whole state.
    pub async fn snapshot(&self) -> ManagerState {
        self.inner.state.read().await.clone()
    }

    pub async fn users(&self) -> Vec<User> {
        self.inner.state.read().await.users.clone()
    }

    pub async fn form(&self) -> FormState {
        self.inner.state.read().await.form.clone()
    }

    pub async fn edit_target(&self) -> Option<UserId> {
        self.inner.state.read().await.edit_target.clone()
    }

    pub async fn search_query(&self) -> String {
        self.inner.state.read().await.search_query.clone()
    }

    pub async fn mode(&self) -> FormMode {
        self.inner.state.read().await.mode()
    }

    pub async fn set_name(&self, name: impl Into<String>) {
        self.inner.state.write().await.form.name = name.into();
    }

    pub async fn set_email(&self, email: impl Into<String>) {
        self.inner.state.write().await.form.email = email.into();
    }

    pub async fn set_search_query(&self, query: impl Into<String>) {
        self.inner.state.write().await.search_query = query.into();
    }

    /// Load a user into the form and switch to update mode.
    ///
    /// Purely local; nothing is requested.
    pub async fn start_edit(&self, user: &User) {
        let mut state = self.inner.state.write().await;
        state.form = FormState::new(user.name.clone(), user.email.clone());
        state.edit_target = Some(user.id.clone());
        debug!(user_id = %user.id, "Editing user");
    }

    /// How many refresh responses were applied after a newer one.
    pub fn stale_applies(&self) -> u64 {
        self.inner.stale_applies.load(Ordering::SeqCst)
    }

    // =========================================================================
    // Remote operations
    // =========================================================================

    /// First activation: load the collection once.
    ///
    /// Later calls do nothing.
    pub async fn initialize(&self) -> Result<()> {
        if self.inner.initialized.swap(true, Ordering::SeqCst) {
            debug!("Already initialized");
            return Ok(());
        }

        info!("Loading initial user collection");
        self.refresh_all().await.map(|_| ())
    }

    /// Replace the collection with the server's current list.
    ///
    /// On failure the old snapshot is kept and "Fetch failed" is queued.
    pub async fn refresh_all(&self) -> Result<usize> {
        let seq = self.inner.refresh_issued.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(seq, "Refreshing user collection");

        match self.inner.api.list_users().await {
            Ok(users) => {
                let count = users.len();
                let mut state = self.inner.state.write().await;

                let newest = self.inner.refresh_applied.fetch_max(seq, Ordering::SeqCst);
                if newest > seq {
                    self.inner.stale_applies.fetch_add(1, Ordering::SeqCst);
                    warn!(
                        seq,
                        newest, "Refresh response arrived after a newer one, overwriting anyway"
                    );
                }

                state.users = users;
                drop(state);

                debug!(seq, count, "User collection replaced");
                Ok(count)
            }
            Err(e) => {
                debug!(seq, error = %e, "Refresh failed");
                self.inner.notifier.error(notify::FETCH_FAILED);
                Err(e.into())
            }
        }
    }

    /// Look up the user named by the search query and show the record.
    ///
    /// The record is shown exactly as the service returned it, pretty-printed,
    /// including fields the client does not model. Informational only: no
    /// state changes either way.
    pub async fn fetch_one(&self) -> Result<serde_json::Value> {
        let query = self.search_query().await;
        if query.is_empty() {
            self.inner.notifier.error(notify::ENTER_ID);
            return Err(ManagerError::MissingInput(notify::ENTER_ID));
        }

        match self.inner.api.get_user(&query).await {
            Ok(record) => {
                let shown =
                    serde_json::to_string_pretty(&record).unwrap_or_else(|_| record.to_string());
                self.inner.notifier.info(shown);
                Ok(record)
            }
            Err(e) => {
                debug!(query = %query, error = %e, "Lookup failed");
                self.inner.notifier.error(notify::USER_NOT_FOUND);
                Err(e.into())
            }
        }
    }

    /// Create or update from the form, depending on the edit target.
    ///
    /// On failure the form and edit target are left exactly as they were,
    /// so the user can retry.
    pub async fn submit(&self) -> Result<RefreshHandle> {
        let (form, target) = {
            let state = self.inner.state.read().await;
            (state.form.clone(), state.edit_target.clone())
        };

        if !form.is_complete() {
            self.inner.notifier.error(notify::NAME_AND_EMAIL_REQUIRED);
            return Err(ManagerError::MissingInput(notify::NAME_AND_EMAIL_REQUIRED));
        }

        let payload = form.to_payload();

        match target {
            Some(id) => {
                if let Err(e) = self.inner.api.update_user(&id, &payload).await {
                    debug!(user_id = %id, error = %e, "Update failed");
                    self.inner.notifier.error(notify::UPDATE_FAILED);
                    return Err(e.into());
                }

                self.inner.notifier.success(notify::USER_UPDATED);
                {
                    let mut state = self.inner.state.write().await;
                    state.edit_target = None;
                    state.form.clear();
                }
                info!(user_id = %id, "User updated");
            }
            None => {
                if let Err(e) = self.inner.api.create_user(&payload).await {
                    debug!(error = %e, "Create failed");
                    self.inner.notifier.error(notify::ADD_FAILED);
                    return Err(e.into());
                }

                self.inner.notifier.success(notify::USER_ADDED);
                self.inner.state.write().await.form.clear();
                info!(name = %payload.name, "User added");
            }
        }

        Ok(self.spawn_refresh())
    }

    /// Delete a user, then refresh.
    ///
    /// The collection is not touched on failure, so the row stays visible.
    pub async fn delete(&self, id: &UserId) -> Result<RefreshHandle> {
        if let Err(e) = self.inner.api.delete_user(id).await {
            debug!(user_id = %id, error = %e, "Delete failed");
            self.inner.notifier.error(notify::DELETE_FAILED);
            return Err(e.into());
        }

        self.inner.notifier.success(notify::USER_DELETED);
        info!(user_id = %id, "User deleted");

        Ok(self.spawn_refresh())
    }

    fn spawn_refresh(&self) -> RefreshHandle {
        let manager = self.clone();
        RefreshHandle {
            handle: tokio::spawn(async move { manager.refresh_all().await }),
        }
    }
}
