use clap::Subcommand;
use serde_json::json;

use crate::cli::config::{get_config_dir, init_session_store, session_store_path};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum InitCommands {
    #[command(about = "Initialize configuration directory and session store")]
    Config,
}

pub async fn handle(cmd: InitCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        InitCommands::Config => {
            let config_dir = get_config_dir()?;
            let created = init_session_store()?;
            let store = session_store_path()?;

            let message = if created {
                format!("Initialized configuration in {}", config_dir.display())
            } else {
                format!("Configuration already present in {}", config_dir.display())
            };
            output_success(
                &output_format,
                &message,
                Some(json!({
                    "config_dir": config_dir,
                    "session_store": store,
                    "created": created
                })),
            )
        }
    }
}
