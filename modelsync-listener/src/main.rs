mod host;
mod listener;
mod notify;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use modelsync_core::LoadRequest;
use tracing::info;

use host::FileHost;
use listener::NotificationListener;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Listen for load_model notifications and replay them locally
    Listen {
        /// Coordination service endpoint
        #[arg(long, default_value = "ws://localhost:3000")]
        endpoint: String,
        /// Directory the default host writes decoded models into
        #[arg(long, default_value = "models")]
        out_dir: String,
    },
    /// Push one load_model notification to the next listener that connects
    Notify {
        /// Path to the JSON model document
        #[arg(long)]
        file: String,
        /// Model display name
        #[arg(long)]
        name: String,
        /// Host-specific format tag
        #[arg(long, default_value = "bedrock")]
        format: String,
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let command = args.command.unwrap_or(Commands::Listen {
        endpoint: "ws://localhost:3000".to_string(),
        out_dir: "models".to_string(),
    });

    match command {
        Commands::Listen { endpoint, out_dir } => {
            info!("Starting modelsync listener...");
            let host = Arc::new(FileHost::new(&out_dir)?);
            let listener = NotificationListener::connect(&endpoint, host).await?;

            tokio::select! {
                result = listener.run() => result,
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutting down");
                    Ok(())
                }
            }
        }
        Commands::Notify {
            file,
            name,
            format,
            port,
        } => {
            let model = tokio::fs::read_to_string(&file).await?;
            // Reject unreadable documents before pushing them at a listener.
            serde_json::from_str::<serde_json::Value>(&model)?;
            let request = LoadRequest {
                name,
                model,
                format,
            };
            notify::push_once(port, request).await
        }
    }
}
