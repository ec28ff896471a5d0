use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::session::{ConflictCheck, ConflictWarning};
use crate::types::{SessionType, UserRecord};

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(body)) = (data, response.as_object_mut()) {
                body.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output the active session, or its absence
pub fn output_current_session(
    output_format: &OutputFormat,
    current: Option<(SessionType, UserRecord)>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let body = match current {
                Some((session_type, user)) => json!({
                    "sessionType": session_type,
                    "user": user
                }),
                None => json!({
                    "sessionType": null,
                    "user": null
                }),
            };
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => match current {
            Some((session_type, user)) => {
                println!("Session: {}", session_type.label());
                println!("User: {}", user.display_name());
                println!("Role: {}", user.role);
                if let Some(email) = &user.email {
                    println!("Email: {}", email);
                }
            }
            None => println!("Not signed in"),
        },
    }
    Ok(())
}

/// Output a conflict check result
pub fn output_conflict(output_format: &OutputFormat, check: &ConflictCheck) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(check)?);
        }
        OutputFormat::Text => match ConflictWarning::from_check(check) {
            Some(warning) => {
                println!("⚠ {} session active", warning.label());
                println!("{}", warning.message());
            }
            None => println!("No conflicting session"),
        },
    }
    Ok(())
}
