use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "carousel-bot")]
#[command(author, version, about = "Telegram bot that publishes photo carousels to a channel", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot in normal mode
    Run {
        /// Use webhook mode instead of long polling (requires WEBHOOK_URL)
        #[arg(long)]
        webhook: bool,
    },

    /// Check that the bot is an administrator of CHANNEL_ID and exit
    CheckChannel,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
