/// Text rendering of manager state and notifications
use users_client::User;
use users_manager::{ManagerState, Notification, NotificationKind};

pub fn render(state: &ManagerState) -> String {
    let mode = state.mode();

    let mut out = format!(
        "== User Management ==\n\n\
         -- {} --\n  Name : {}\n  Email: {}\n  [{}]\n\n\
         -- Get Single User --\n  ID: {}\n\n\
         -- All Users (GET) --\n",
        mode.heading(),
        state.form.name,
        state.form.email,
        mode.submit_label(),
        state.search_query,
    );
    out.push_str(&render_users(&state.users));

    out
}

pub fn render_users(users: &[User]) -> String {
    if users.is_empty() {
        return "  (none)\n".to_string();
    }

    let width = users
        .iter()
        .map(|u| u.id.to_string().len())
        .max()
        .unwrap_or(0);

    users
        .iter()
        .map(|u| format!("  {:>width$}  {} - {}\n", u.id, u.name, u.email, width = width))
        .collect()
}

pub fn render_notification(notification: &Notification) -> String {
    match notification.kind {
        NotificationKind::Success => format!("[ok] {}", notification.message),
        NotificationKind::Error => format!("[error] {}", notification.message),
        NotificationKind::Info => notification.message.clone(),
    }
}
