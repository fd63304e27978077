//! CLI module for the LSCS portal
//!
//! - `serve`: run the portal HTTP server
//! - `keys`: request, list and revoke API keys as a member
//! - `member` / `committees`: member directory lookups

pub mod keys;
pub mod member;
pub mod serve;

use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::lscs::{LscsClient, SessionCredentials};

/// LSCS member portal - API key requests and member lookups
#[derive(Parser)]
#[command(name = "lscs-portal")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the portal HTTP server
    Serve,

    /// Manage API keys
    Keys(keys::KeysArgs),

    /// Look up a member
    Member(member::MemberArgs),

    /// List committees
    Committees(CredentialArgs),
}

/// Credentials forwarded to the core API
#[derive(Args, Clone, Default)]
pub struct CredentialArgs {
    /// Portal session id (the `session_id` cookie)
    #[arg(long, global = true)]
    pub session: Option<String>,

    /// Bearer token; falls back to `upstream.api_token` from config
    #[arg(long, global = true)]
    pub token: Option<String>,
}

impl CredentialArgs {
    fn credentials(&self, config: &AppConfig) -> SessionCredentials {
        let mut credentials = SessionCredentials::new();
        if let Some(session) = &self.session {
            credentials = credentials.with_session(session.clone());
        }
        if let Some(token) = self.token.as_ref().or(config.upstream.api_token.as_ref()) {
            credentials = credentials.with_bearer(token.clone());
        }
        credentials
    }
}

/// Load configuration and build a client bound to the given credentials
fn connect(args: &CredentialArgs) -> anyhow::Result<LscsClient> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    let credentials = args.credentials(&config);
    if credentials.is_empty() {
        anyhow::bail!("No credentials: pass --session or --token, or set APP__UPSTREAM__API_TOKEN");
    }

    Ok(LscsClient::from_config(&config.upstream)?.with_credentials(credentials))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// List committees
pub async fn committees(args: CredentialArgs) -> anyhow::Result<()> {
    use crate::domain::MemberDirectory;

    let client = connect(&args)?;
    print_json(&client.get_committees().await?)
}
