//! Member command - directory lookups against the core API

use clap::{Args, Subcommand};

use super::{connect, print_json, CredentialArgs};
use crate::domain::MemberDirectory;

#[derive(Args)]
pub struct MemberArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    #[command(subcommand)]
    pub command: MemberCommand,
}

#[derive(Subcommand)]
pub enum MemberCommand {
    /// Look up by DLSU email
    ByEmail { email: String },

    /// Look up by DLSU ID number
    ById { id: i64 },
}

pub async fn run(args: MemberArgs) -> anyhow::Result<()> {
    let client = connect(&args.credentials)?;

    let member = match args.command {
        MemberCommand::ByEmail { email } => client.find_member_by_email(&email).await?,
        MemberCommand::ById { id } => client.find_member_by_id(id).await?,
    };

    print_json(&member)
}
