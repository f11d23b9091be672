//! CLI probe for the accounts API
//!
//! Drives each accounts operation once against a configured server and
//! prints the classified result. Useful for checking a self-hosted server
//! or a captured token without a device.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use warden_api::{
    AccountsApiRepository, ApiConfig, ApiResult, PasswordHintRequest, RegisterRequest,
    SharedConnectivity, StaticTokenService,
};
use warden_core::CipherString;

#[derive(Parser)]
#[command(name = "accounts-probe")]
#[command(about = "Warden accounts API probe", long_about = None)]
struct Cli {
    /// JSON config file (base_url, request_timeout_secs, device_type, user_agent)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Server base URL, overrides the config file
    #[arg(short, long, global = true)]
    base_url: Option<String>,

    /// Bearer token for authenticated endpoints
    #[arg(short, long, global = true, env = "WARDEN_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new account
    Register {
        /// Account email
        #[arg(long)]
        email: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Master password hash (base64)
        #[arg(long)]
        master_password_hash: String,

        /// Master password hint
        #[arg(long)]
        hint: Option<String>,

        /// Encrypted user key as a cipher string
        #[arg(long)]
        key: String,
    },

    /// Request the master password hint email
    PasswordHint {
        /// Account email
        #[arg(long)]
        email: String,
    },

    /// Show the account revision date
    RevisionDate,

    /// Show the account profile
    Profile,

    /// Show the account key pair
    Keys,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.base_url)?;
    info!("Using server {}", config.base_url);

    let tokens = match cli.token {
        Some(token) => StaticTokenService::with_token(token),
        None => StaticTokenService::logged_out(),
    };
    let repo = AccountsApiRepository::from_config(
        &config,
        Arc::new(SharedConnectivity::new(true)),
        Arc::new(tokens),
    )?;

    match cli.command {
        Commands::Register {
            email,
            name,
            master_password_hash,
            hint,
            key,
        } => {
            let key: CipherString = key.parse()?;
            let request = RegisterRequest {
                name,
                email,
                master_password_hash,
                master_password_hint: hint,
                key,
                keys: None,
            };
            report("register", repo.register(&request).await, |_| {
                "registered".to_string()
            })
        }
        Commands::PasswordHint { email } => report(
            "password_hint",
            repo.password_hint(&PasswordHintRequest { email }).await,
            |_| "hint sent".to_string(),
        ),
        Commands::RevisionDate => report("revision_date", repo.revision_date().await, |date| {
            match date {
                Some(date) => date.to_rfc3339(),
                None => "never revised".to_string(),
            }
        }),
        Commands::Profile => report("profile", repo.profile().await, |profile| {
            serde_json::to_string_pretty(profile).unwrap_or_else(|e| e.to_string())
        }),
        Commands::Keys => report("keys", repo.keys().await, |keys| {
            serde_json::to_string_pretty(keys).unwrap_or_else(|e| e.to_string())
        }),
    }
}

fn load_config(path: Option<&std::path::Path>, base_url: Option<String>) -> anyhow::Result<ApiConfig> {
    let mut config = match path {
        Some(path) => ApiConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => ApiConfig::default(),
    };
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    config.validate()?;
    Ok(config)
}

fn report<T>(
    operation: &str,
    result: ApiResult<T>,
    describe: impl FnOnce(&T) -> String,
) -> anyhow::Result<()> {
    match result {
        ApiResult::Success {
            payload,
            status_code,
        } => {
            info!("{} succeeded with status {}", operation, status_code.as_u16());
            println!("{}", describe(&payload));
            Ok(())
        }
        ApiResult::Failure(failure) => {
            warn!("{} failed: {}", operation, failure);
            for (field, messages) in failure.validation_errors() {
                for message in messages {
                    warn!("  {}: {}", field, message);
                }
            }
            Err(failure.into())
        }
    }
}
