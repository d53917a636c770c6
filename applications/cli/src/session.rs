/// Drives a user manager from the terminal
use crate::commands::{Command, HELP};
use crate::view;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;
use users_client::{User, UserApi};
use users_manager::{NotificationKind, Notifications, RefreshHandle, UserManager};

/// Look up a row of the current snapshot by its displayed id.
pub async fn find_listed<A: UserApi + 'static>(manager: &UserManager<A>, raw: &str) -> Option<User> {
    manager
        .users()
        .await
        .into_iter()
        .find(|u| u.id.to_string() == raw)
}

/// Print everything queued. Returns true if any of it was an error.
pub fn print_notifications(notifications: &mut Notifications) -> bool {
    let mut failed = false;
    for notification in notifications.drain() {
        failed |= notification.kind == NotificationKind::Error;
        println!("{}", view::render_notification(&notification));
    }
    failed
}

/// Wait for a follow-up refresh so the next render shows fresh data.
///
/// A failed refresh has already queued its own notification.
pub async fn settle(refresh: Option<RefreshHandle>) {
    if let Some(refresh) = refresh {
        if let Err(e) = refresh.wait().await {
            debug!(error = %e, "Follow-up refresh failed");
        }
    }
}

/// Run one command. Returns the follow-up refresh, if the command started one.
async fn execute<A: UserApi + 'static>(
    manager: &UserManager<A>,
    command: Command,
) -> Option<RefreshHandle> {
    match command {
        Command::List => {
            print!("{}", view::render(&manager.snapshot().await));
            None
        }
        Command::Refresh => {
            manager.refresh_all().await.ok();
            None
        }
        Command::Name(name) => {
            manager.set_name(name).await;
            None
        }
        Command::Email(email) => {
            manager.set_email(email).await;
            None
        }
        Command::Submit => manager.submit().await.ok(),
        Command::Edit(raw) => {
            match find_listed(manager, &raw).await {
                Some(user) => manager.start_edit(&user).await,
                None => println!("No listed user with ID {}", raw),
            }
            None
        }
        Command::Delete(raw) => match find_listed(manager, &raw).await {
            Some(user) => manager.delete(&user.id).await.ok(),
            None => {
                println!("No listed user with ID {}", raw);
                None
            }
        },
        Command::Search(query) => {
            manager.set_search_query(query).await;
            None
        }
        Command::Get => {
            manager.fetch_one().await.ok();
            None
        }
        Command::Help => {
            println!("{}", HELP);
            None
        }
        Command::Quit => None,
    }
}

/// Read commands from stdin until `quit` or end of input.
pub async fn run_interactive<A: UserApi + 'static>(
    manager: UserManager<A>,
    mut notifications: Notifications,
) -> anyhow::Result<()> {
    manager.initialize().await.ok();
    print_notifications(&mut notifications);
    print!("{}", view::render(&manager.snapshot().await));
    println!("Type 'help' for commands.");

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(message) => {
                if !message.is_empty() {
                    println!("{}", message);
                }
                continue;
            }
        };

        let redraw = matches!(
            command,
            Command::Refresh | Command::Submit | Command::Edit(_) | Command::Delete(_)
        );

        settle(execute(&manager, command).await).await;
        print_notifications(&mut notifications);

        if redraw {
            print!("{}", view::render(&manager.snapshot().await));
        }
    }

    Ok(())
}
