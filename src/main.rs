//! Luna - A chat bot resolving free-text messages into commands.
//!
//! This is the main entry point for the Luna bot. Luna reads chat messages, finds the
//! command they call and extracts its arguments from free text, then replies with the
//! outcome of the command.
//!
//! # Features
//!
//! - **Alias Calling**: Messages starting with the configured alias call the bot
//! - **Aliasless Channels**: Channels where commands can be written directly
//! - **Keyword Arguments**: `luna ban bob reason: spamming links days: 7`
//! - **Module Gates**: Restricted commands only run for authorised members
//! - **YAML Configuration**: Simple configuration file format with environment variable support
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings:
//!
//! ```yaml
//! alias: "luna"
//! bot_id: "luna"
//! aliasless_channels: ["luna"]
//! excluded_channels: ["announcements"]
//! moderators: ["alice"]
//! ```
//!
//! # Environment Variable Overrides
//!
//! Override any configuration value using environment variables with the `LUNA_` prefix:
//!
//! ```bash
//! export LUNA_ALIAS="moon"
//! export LUNA_MAXIMUM_VOLUME=150
//! ```
//!
//! # Usage
//!
//! ```bash
//! luna --config config.yaml --channel general --author alice
//! ```
//!
//! Each line typed on standard input is a message. Prefix a line with `#<channel>` to
//! post it in another channel.
//!
//! # Bot Commands
//!
//! - `luna help [module]` - List the modules, or the commands of one module
//! - `luna ban <user> [days] [reason]` - Ban a member (moderators only)
//! - `luna volume <volume>` - Set the playback volume
//! - `luna playback` - Show the playback state
//!
//! # Architecture
//!
//! - [`bot`] - Main bot logic processing each message in its own task
//! - [`commands`] - Command resolution, argument extraction and built-in modules
//! - [`config`] - YAML configuration file structures and loading with environment variable support
//! - [`transport`] - Message types and the console client
//! - [`utils`] - Text helpers
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)
//!   - Set to `debug` for verbose output, including every extracted argument
//!   - Set to `warn` or `error` for minimal logging

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod bot;
mod commands;
mod config;
mod transport;
mod utils;

/// Command-line arguments for the Luna bot.
///
/// # Examples
///
/// ```bash
/// luna --config config.yaml --channel luna --author alice
/// ```
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// See the [`config`] module for the expected format.
    #[arg(short, long)]
    config: String,

    /// Channel the console messages are posted in.
    #[arg(long, default_value = "general")]
    channel: String,

    /// Author id the console messages are posted as.
    ///
    /// List it under `moderators` in the configuration to use moderation commands.
    #[arg(short, long, default_value = "user")]
    author: String,
}

/// Main entry point for the Luna bot.
///
/// 1. **Logging Setup**: Configures the logger with `info` level by default
///    (can be overridden with the `RUST_LOG` environment variable)
/// 2. **Argument Parsing**: Parses command-line arguments using `clap`
/// 3. **Configuration Loading**: Reads the YAML configuration file and environment overrides
/// 4. **Bot Execution**: Processes messages until standard input is closed
///
/// Errors are logged and end the process without panicking.
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting luna {}...", env!("CARGO_PKG_VERSION"));

    // Parse command line arguments
    let args = Args::parse();

    let config: Config = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    // Launch bot
    let bot = match Bot::new(config, args) {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to initialize bot: {}", e);
            return;
        }
    };

    if let Err(e) = bot.start().await {
        error!("Bot stopped: {}", e);
    }
}
