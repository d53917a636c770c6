//! Shared test helpers for user manager tests

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use users_client::{ClientError, User, UserApi, UserId, UserPayload};

/// Which service call to sabotage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(dead_code)]
pub enum Op {
    List,
    Get,
    Create,
    Update,
    Delete,
}

/// In-memory users service with numeric ids and per-operation failures.
pub struct FakeService {
    users: Mutex<Vec<User>>,
    next_id: AtomicU64,
    failing: Mutex<HashSet<Op>>,
    requests: AtomicUsize,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
}

#[allow(dead_code)]
impl FakeService {
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    pub fn with_users(users: Vec<User>) -> Self {
        let next_id = users
            .iter()
            .filter_map(|u| match u.id {
                UserId::Numeric(n) => Some(n),
                UserId::Text(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            users: Mutex::new(users),
            next_id: AtomicU64::new(next_id),
            failing: Mutex::new(HashSet::new()),
            requests: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
        }
    }

    /// Seed `count` users with ids 1..=count.
    pub fn seeded(count: u64) -> Self {
        Self::with_users(
            (1..=count)
                .map(|i| User::new(i, format!("User {}", i), format!("user{}@x.com", i)))
                .collect(),
        )
    }

    pub fn fail(&self, op: Op) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn heal(&self, op: Op) {
        self.failing.lock().unwrap().remove(&op);
    }

    /// Server-side truth, bypassing the request counters.
    pub fn stored(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    fn check(&self, op: Op) -> users_client::Result<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.failing.lock().unwrap().contains(&op) {
            Err(ClientError::ServerError {
                status: 500,
                message: format!("{:?} sabotaged", op),
            })
        } else {
            Ok(())
        }
    }

    fn not_found(id: impl std::fmt::Display) -> ClientError {
        ClientError::ServerError {
            status: 404,
            message: format!("no user {}", id),
        }
    }
}

#[async_trait]
impl UserApi for FakeService {
    async fn list_users(&self) -> users_client::Result<Vec<User>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check(Op::List)?;
        Ok(self.stored())
    }

    async fn get_user(&self, id: &str) -> users_client::Result<serde_json::Value> {
        self.check(Op::Get)?;
        let user = self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id.to_string() == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))?;
        Ok(serde_json::to_value(user).unwrap())
    }

    async fn create_user(&self, payload: &UserPayload) -> users_client::Result<()> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        // Let concurrent callers interleave here
        tokio::task::yield_now().await;
        self.check(Op::Create)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.users.lock().unwrap().push(User::new(
            id,
            payload.name.clone(),
            payload.email.clone(),
        ));
        Ok(())
    }

    async fn update_user(&self, id: &UserId, payload: &UserPayload) -> users_client::Result<()> {
        tokio::task::yield_now().await;
        self.check(Op::Update)?;
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        user.name = payload.name.clone();
        user.email = payload.email.clone();
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> users_client::Result<()> {
        tokio::task::yield_now().await;
        self.check(Op::Delete)?;
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| &u.id != id);
        if users.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}
