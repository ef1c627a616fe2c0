use anyhow::{Context, Result};
use clap::Parser;
use std::env;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Public base URL shareable link URLs are built from.
    pub service_url: String,
    /// Base URL of the file-transfer tier.
    pub fileserver_url: String,
    /// Bearer token identifying the administrator.
    pub admin_token: String,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Admin gateway for share and upload links")]
pub struct Args {
    /// Host to bind to (overrides LINK_GATEWAY_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides LINK_GATEWAY_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides LINK_GATEWAY_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Public service base URL (overrides LINK_GATEWAY_SERVICE_URL)
    #[arg(long)]
    pub service_url: Option<String>,

    /// Fileserver base URL (overrides LINK_GATEWAY_FILESERVER_URL)
    #[arg(long)]
    pub fileserver_url: Option<String>,

    /// Administrator bearer token (overrides LINK_GATEWAY_ADMIN_TOKEN)
    #[arg(long)]
    pub admin_token: Option<String>,

    /// Run migrations and exit
    #[arg(long)]
    pub migrate: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        // Parse CLI once
        let args = Args::parse();

        // --- Environment fallback ---
        let env_host = env::var("LINK_GATEWAY_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match env::var("LINK_GATEWAY_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing LINK_GATEWAY_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => 3000,
            Err(err) => return Err(err).context("reading LINK_GATEWAY_PORT"),
        };
        let env_db = env::var("LINK_GATEWAY_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://./data/link_gateway.db".into());
        let env_service =
            env::var("LINK_GATEWAY_SERVICE_URL").unwrap_or_else(|_| "http://localhost:3000".into());
        let env_fileserver = env::var("LINK_GATEWAY_FILESERVER_URL")
            .unwrap_or_else(|_| "http://localhost:8082".into());
        let env_admin_token = env::var("LINK_GATEWAY_ADMIN_TOKEN").ok();

        // --- Merge ---
        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            database_url: args.database_url.unwrap_or(env_db),
            service_url: args.service_url.unwrap_or(env_service),
            fileserver_url: args.fileserver_url.unwrap_or(env_fileserver),
            // The admin credential has no safe default.
            admin_token: args
                .admin_token
                .or(env_admin_token)
                .context("admin token not configured: set LINK_GATEWAY_ADMIN_TOKEN")?,
        };

        Ok((cfg, args.migrate))
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
