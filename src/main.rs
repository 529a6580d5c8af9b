// src/main.rs
use anyhow::Result;
use clap::Parser;

use mmpipe::client::Client;
use mmpipe::{follow, netrc, NETRC_MACHINE};

#[derive(Parser)]
#[command(
    name = "mmpipe",
    version,
    about = "Pipe stdin into a Mattermost channel"
)]
struct Cli {
    /// Mattermost server URL (e.g. https://chat.example.com)
    server_url: String,

    /// Channel slug to post into
    channel: String,

    /// Team name (required when the account belongs to several teams)
    #[arg(long)]
    team: Option<String>,

    /// Keep updating a single message instead of posting one per line
    #[arg(long)]
    update: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Credentials come from ~/.netrc; nothing touches the network until
    // they have been read.
    let creds = netrc::user_credentials(NETRC_MACHINE)?;

    let mut client = Client::new(&cli.server_url);
    client.login(&creds)?;

    let channel_id = client.channel_id(&cli.channel, cli.team.as_deref())?;

    let stdin = std::io::stdin();
    follow::follow(stdin.lock(), &mut client, &channel_id, cli.update)?;
    Ok(())
}
