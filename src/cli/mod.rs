pub mod commands;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "lists-api")]
#[command(about = "Lists API - REST service for user-owned lists")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Address to bind (overrides LISTS_API_HOST)")]
        host: Option<String>,
        #[arg(long, help = "Port to listen on (overrides LISTS_API_PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Print a bearer token for a user id, signed with the configured secret")]
    Token {
        #[arg(long, help = "Principal id to embed in the token")]
        user: Uuid,
        #[arg(long, help = "Token lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
        hours: Option<u64>,
    },
}

pub async fn run(cli: Cli, mut config: AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { host: None, port: None }) {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            commands::serve::handle(config).await
        }
        Commands::Token { user, hours } => commands::token::handle(&config, user, hours),
    }
}
