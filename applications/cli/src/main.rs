/// users-cli - terminal front end for the users service
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use users_client::UsersClient;
use users_manager::UserManager;

mod commands;
mod config;
mod session;
mod view;

use config::CliConfig;
use session::{find_listed, print_notifications, settle};

#[derive(Parser)]
#[command(name = "users-cli")]
#[command(about = "Create, list, edit and delete users on a remote service", long_about = None)]
struct Cli {
    /// Base URL of the users service (overrides USERS_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Configuration file path
    #[arg(short, long, global = true, env = "USERS_CLI_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session (default)
    Interactive,
    /// List all users
    List,
    /// Show a single user
    Get {
        /// User ID
        id: String,
    },
    /// Create a new user
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
    },
    /// Replace a user's name and email
    Update {
        /// User ID
        id: String,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
    },
    /// Delete a user
    Delete {
        /// User ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr, stdout is the UI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "users_cli=info,users_manager=info,users_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?.with_url_override(cli.api_url);
    tracing::debug!(url = %config.api.url, "Configuration loaded");

    let client = UsersClient::new(config.client_config())?;
    let (manager, mut notifications) = UserManager::new(client);

    let ok = match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            session::run_interactive(manager, notifications).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::List => {
            let ok = manager.refresh_all().await.is_ok();
            if ok {
                print!("{}", view::render_users(&manager.users().await));
            }
            ok
        }
        Commands::Get { id } => {
            manager.set_search_query(id).await;
            manager.fetch_one().await.is_ok()
        }
        Commands::Add { name, email } => {
            manager.set_name(name).await;
            manager.set_email(email).await;
            match manager.submit().await {
                Ok(refresh) => {
                    settle(Some(refresh)).await;
                    true
                }
                Err(_) => false,
            }
        }
        Commands::Update { id, name, email } => {
            manager.initialize().await.ok();
            match find_listed(&manager, &id).await {
                Some(user) => {
                    manager.start_edit(&user).await;
                    manager.set_name(name).await;
                    manager.set_email(email).await;
                    match manager.submit().await {
                        Ok(refresh) => {
                            settle(Some(refresh)).await;
                            true
                        }
                        Err(_) => false,
                    }
                }
                None => {
                    println!("No listed user with ID {}", id);
                    false
                }
            }
        }
        Commands::Delete { id } => {
            manager.initialize().await.ok();
            match find_listed(&manager, &id).await {
                Some(user) => match manager.delete(&user.id).await {
                    Ok(refresh) => {
                        settle(Some(refresh)).await;
                        true
                    }
                    Err(_) => false,
                },
                None => {
                    println!("No listed user with ID {}", id);
                    false
                }
            }
        }
    };

    let failed = print_notifications(&mut notifications);

    Ok(if ok && !failed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
