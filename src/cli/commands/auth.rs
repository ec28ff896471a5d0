use clap::Subcommand;
use serde_json::json;

use crate::cli::config::open_accessor;
use crate::cli::utils::*;
use crate::cli::{ErrorReported, OutputFormat};
use crate::client::{sign_in, Credentials, HttpLoginClient};
use crate::config::config;
use crate::error::SessionError;
use crate::session::{perform_logout, ConflictWarning, LoginTarget};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to the platform")]
    Login {
        #[arg(help = "Account email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
        #[arg(long, help = "Sign in as Super Admin / Super Moderator")]
        admin: bool,
        #[arg(long, help = "Sign out of a conflicting session before logging in")]
        resolve_conflict: bool,
    },

    #[command(about = "Logout of the active session")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Show current user information")]
    Whoami,

    #[command(about = "Check whether another session blocks a login")]
    Conflicts {
        #[arg(long, help = "Check the Super Admin / Super Moderator login")]
        admin: bool,
    },

    #[command(about = "Sign out of the session blocking a login")]
    Resolve {
        #[arg(long, help = "Resolve for the Super Admin / Super Moderator login")]
        admin: bool,
    },
}

fn target(admin: bool) -> LoginTarget {
    if admin {
        LoginTarget::Elevated
    } else {
        LoginTarget::Normal
    }
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, password, admin, resolve_conflict } => {
            let password = match password {
                Some(password) => password,
                None => rpassword::prompt_password("Password: ")?,
            };
            let credentials = Credentials { email, password };
            let client = HttpLoginClient::new(&config().api)?;
            let mut accessor = open_accessor()?;

            match sign_in(&mut accessor, &client, target(admin), &credentials, resolve_conflict).await {
                Ok(user) => output_success(
                    &output_format,
                    &format!("Logged in as {} ({})", user.display_name(), user.role),
                    Some(json!({ "user": user })),
                ),
                Err(SessionError::Conflict(conflict_type)) => {
                    let check = accessor.check_login_conflict(target(admin));
                    output_conflict(&output_format, &check)?;
                    let message = format!(
                        "{} session is active; rerun with --resolve-conflict to sign it out",
                        conflict_type.label()
                    );
                    match output_format {
                        OutputFormat::Json => Err(ErrorReported(message).into()),
                        OutputFormat::Text => Err(anyhow::anyhow!(message)),
                    }
                }
                Err(e) => match output_format {
                    OutputFormat::Json => {
                        output_error(&output_format, &e.to_string(), Some(e.error_code()))?;
                        Err(ErrorReported(e.to_string()).into())
                    }
                    OutputFormat::Text => Err(e.into()),
                },
            }
        }
        AuthCommands::Logout => {
            let mut accessor = open_accessor()?;
            let result = perform_logout(&mut accessor, &config().routes);

            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Text => match result.session_type {
                    Some(session_type) if result.success => {
                        println!("✓ Logged out of {} session", session_type.label());
                        println!("Redirect: {}", result.redirect_path);
                    }
                    Some(session_type) => {
                        println!("Logout of {} session failed; all sessions cleared", session_type.label());
                        println!("Redirect: {}", result.redirect_path);
                    }
                    None => println!("Not signed in"),
                },
            }
            Ok(())
        }
        AuthCommands::Status | AuthCommands::Whoami => {
            let accessor = open_accessor()?;
            output_current_session(&output_format, accessor.current_session())
        }
        AuthCommands::Conflicts { admin } => {
            let accessor = open_accessor()?;
            output_conflict(&output_format, &accessor.check_login_conflict(target(admin)))
        }
        AuthCommands::Resolve { admin } => {
            let mut accessor = open_accessor()?;
            let check = accessor.check_login_conflict(target(admin));

            match ConflictWarning::from_check(&check) {
                Some(warning) => {
                    let mut resolved = false;
                    warning.confirm(&mut accessor, || resolved = true)?;
                    output_success(
                        &output_format,
                        &format!("Signed out of {} session", warning.label()),
                        Some(json!({ "resolved": resolved, "conflictType": warning.conflict_type })),
                    )
                }
                None => output_success(
                    &output_format,
                    "No conflicting session",
                    Some(json!({ "resolved": false })),
                ),
            }
        }
    }
}
