//! Local state owned by the user manager

use serde::{Deserialize, Serialize};
use users_client::{User, UserId, UserPayload};

/// Name/email inputs bound to the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub name: String,
    pub email: String,
}

impl FormState {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Both fields present. Only emptiness is checked.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty()
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
    }

    pub fn to_payload(&self) -> UserPayload {
        UserPayload::new(self.name.clone(), self.email.clone())
    }
}

/// Whether submitting the form creates or updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormMode {
    Create,
    Update,
}

impl FormMode {
    pub fn heading(self) -> &'static str {
        match self {
            FormMode::Create => "Add User",
            FormMode::Update => "Edit User",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            FormMode::Create => "Add (POST)",
            FormMode::Update => "Update (PUT)",
        }
    }
}

/// Everything the manager owns, in one place.
///
/// `users` is the last collection snapshot. It is only ever replaced whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagerState {
    pub form: FormState,
    pub edit_target: Option<UserId>,
    pub search_query: String,
    pub users: Vec<User>,
}

impl ManagerState {
    /// Mode is derived from the edit target and nothing else.
    pub fn mode(&self) -> FormMode {
        if self.edit_target.is_some() {
            FormMode::Update
        } else {
            FormMode::Create
        }
    }

    pub fn find_user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }
}
