use clap::Parser;
use lscs_portal::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Keys(args) => cli::keys::run(args).await,
        Command::Member(args) => cli::member::run(args).await,
        Command::Committees(args) => cli::committees(args).await,
    }
}
