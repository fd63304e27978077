//! Keys command - request, list and revoke API keys from the terminal

use std::sync::Arc;

use clap::{Args, Subcommand};

use super::{connect, print_json, CredentialArgs};
use crate::domain::api_key::{ApiKeyId, IssuedKey, KeyRequest};
use crate::domain::RequesterContext;
use crate::infrastructure::api_key::KeyRequestService;

#[derive(Args)]
pub struct KeysArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    #[command(subcommand)]
    pub command: KeysCommand,
}

#[derive(Subcommand)]
pub enum KeysCommand {
    /// Request a new key. The secret is printed once.
    Request(RequestArgs),

    /// List issued keys
    List,

    /// Revoke a key by id
    Revoke {
        id: ApiKeyId,
    },
}

#[derive(Args)]
pub struct RequestArgs {
    /// Project name shown in the key listing
    #[arg(long)]
    pub project: Option<String>,

    /// Allowed origin (required for production keys)
    #[arg(long)]
    pub origin: Option<String>,

    /// Development key, origin must be http://localhost...
    #[arg(long)]
    pub dev: bool,

    /// Admin key, no origin restriction
    #[arg(long)]
    pub admin: bool,
}

impl From<RequestArgs> for KeyRequest {
    fn from(args: RequestArgs) -> Self {
        KeyRequest {
            project: args.project,
            allowed_origin: args.origin,
            is_dev: args.dev,
            is_admin: args.admin,
        }
    }
}

/// Status line for stderr; the secret itself goes to stdout alone
fn issued_notice(issued: &IssuedKey) -> String {
    format!(
        "Issued {} key {}. Store it now, it will not be shown again.",
        issued.key_class(),
        issued.api_key_id
    )
}

pub async fn run(args: KeysArgs) -> anyhow::Result<()> {
    let client = connect(&args.credentials)?;
    let requester = client.get_requester_context().await?;
    let service = KeyRequestService::new(Arc::new(client));

    match args.command {
        KeysCommand::Request(request) => {
            let issued = service.submit(&requester, request.into()).await?;
            eprintln!("{}", issued_notice(&issued));
            println!("{}", issued.secret.expose());
            Ok(())
        }
        KeysCommand::List => print_json(&service.list(&requester).await?),
        KeysCommand::Revoke { id } => {
            service.revoke(&requester, id).await?;
            println!("Revoked API key {}", id);
            Ok(())
        }
    }
}
