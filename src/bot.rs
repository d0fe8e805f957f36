//! Bot module wiring the command engine to a transport.
//!
//! This module provides the main [`Bot`] implementation that connects the
//! [`ConsoleClient`] with the [`Commander`]. Every incoming message is processed
//! in its own task, so a slow handler never holds up the next message.
//!
//! # Command Processing Flow
//!
//! ```text
//! Message → Resolve Command → Validate → Execute → Format → Send Response
//! ```
//!
//! # Example
//!
//! ```no_run
//! # use luna::bot::Bot;
//! # use luna::config::Config;
//! # use luna::Args;
//! # async fn run() -> Result<(), anyhow::Error> {
//! let config = Config::load("config.yaml")?;
//! let args = Args::parse();
//!
//! // Create and start the bot
//! let bot = Bot::new(config, args)?;
//! bot.start().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use log::{debug, info};
use tokio::task::JoinHandle;

use crate::{
    Args,
    commands::{CommandParseError, CommandResult, Commander, format_reply, load_modules},
    config::Config,
    transport::{Author, ConsoleClient, Message},
};

/// Everything the task processing one message needs.
struct MessageContext {
    /// The received message
    message: Message,
    /// Client used to send the reply
    console: Arc<ConsoleClient>,
    /// Command engine
    commander: Arc<Commander>,
}

/// Main bot instance.
///
/// Both components are read-only after construction and wrapped in `Arc` to be
/// shared with the per-message tasks. Commands keeping state, like `volume`,
/// synchronise it themselves.
pub struct Bot {
    /// Transport reading messages and writing replies
    console: Arc<ConsoleClient>,
    /// Command engine holding the catalog of built-in modules
    commander: Arc<Commander>,
}

impl Bot {
    /// Creates a new bot from its configuration and command-line arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot serve any message, i.e. when
    /// the alias is empty and no channel is aliasless.
    pub fn new(config: Config, args: Args) -> Result<Self, anyhow::Error> {
        if config.alias.trim().is_empty() && config.aliasless_channels.is_empty() {
            anyhow::bail!("an alias or at least one aliasless channel is required");
        }

        let catalog = load_modules(&config);
        let commander = Arc::new(Commander::new(&config, catalog));

        let author = Author::new(&args.author, &args.author);
        let console = Arc::new(ConsoleClient::new(&args.channel, author));

        info!("bot ready, call it with '{}'", config.alias);

        Ok(Bot { console, commander })
    }

    /// Processes messages until the transport closes.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails to read messages.
    pub async fn start(self) -> Result<(), anyhow::Error> {
        let console = Arc::clone(&self.console);
        let commander = Arc::clone(&self.commander);

        // Create message handler closure
        let on_message = move |message: Message| {
            let ctx = MessageContext {
                message,
                console: Arc::clone(&console),
                commander: Arc::clone(&commander),
            };
            Self::handle_message(ctx)
        };

        self.console.sync(on_message).await
    }

    /// Processes one message in a new task and sends the reply, if any.
    fn handle_message(ctx: MessageContext) -> JoinHandle<()> {
        tokio::spawn(async move {
            let Some(reply) = Self::reply_to(&ctx.commander, &ctx.message) else {
                return;
            };

            ctx.console.send_reply(&ctx.message.channel, &reply).await;
        })
    }

    /// Computes the reply to a message, `None` when the bot must stay silent.
    fn reply_to(commander: &Commander, message: &Message) -> Option<String> {
        let context = match commander.parse(message) {
            Ok(context) => context,
            Err(e) => match e {
                // Return silently if the message is not for the bot
                CommandParseError::NotForBot => {
                    debug!("ignoring message from {}", message.author.id);
                    return None;
                }
                // Send error message if the command is invalid
                CommandParseError::InvalidCommand(reply) => {
                    return Some(format_reply(&CommandResult::warning(reply)));
                }
            },
        };

        let result = commander.execute(context);
        Some(format_reply(&result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> Config {
        Config {
            alias: "luna".to_string(),
            bot_id: "luna".to_string(),
            aliasless_channels: vec![],
            excluded_channels: vec![],
            moderators: vec!["alice".to_string()],
            maximum_volume: 200,
            echo: false,
        }
    }

    fn create_test_args() -> Args {
        Args {
            config: "config.yaml".to_string(),
            channel: "general".to_string(),
            author: "alice".to_string(),
        }
    }

    fn create_test_commander() -> Commander {
        let config = create_test_config();
        Commander::new(&config, load_modules(&config))
    }

    fn message(content: &str, author: &str) -> Message {
        Message::new(content, "general", Author::new(author, author))
    }

    #[test]
    fn test_new_requires_a_way_to_be_called() {
        let mut config = create_test_config();
        config.alias = " ".to_string();
        assert!(Bot::new(config, create_test_args()).is_err());

        let mut config = create_test_config();
        config.alias = String::new();
        config.aliasless_channels = vec!["luna".to_string()];
        assert!(Bot::new(config, create_test_args()).is_ok());
    }

    #[test]
    fn test_reply_to_command() {
        let commander = create_test_commander();

        let reply = Bot::reply_to(&commander, &message("luna ban bob", "alice"));

        assert_eq!(reply, Some("❗ bob has been banned indefinitely.".to_string()));
    }

    #[test]
    fn test_reply_to_invalid_command_is_a_warning() {
        let commander = create_test_commander();

        let reply = Bot::reply_to(&commander, &message("luna dance", "alice")).unwrap();

        assert!(reply.starts_with("⚠️ Unknown command."));
    }

    #[test]
    fn test_reply_to_silent_messages() {
        let commander = create_test_commander();

        assert_eq!(Bot::reply_to(&commander, &message("hello", "alice")), None);
        assert_eq!(Bot::reply_to(&commander, &message("luna ban bob", "bob")), None);
        assert_eq!(Bot::reply_to(&commander, &message("luna help", "luna")), None);
    }

    #[tokio::test]
    async fn test_handle_message_completes() {
        let ctx = MessageContext {
            message: message("hello", "alice"),
            console: Arc::new(ConsoleClient::new("general", Author::new("alice", "alice"))),
            commander: Arc::new(create_test_commander()),
        };

        assert!(Bot::handle_message(ctx).await.is_ok());
    }
}
