//! Chat transport integration for the bot.
//!
//! This module defines the [`Message`] handed to the command engine and the
//! [`console::ConsoleClient`], a line-oriented transport reading messages from
//! standard input and writing replies to standard output.
//!
//! # Examples
//!
//! ```no_run
//! use luna::transport::{Author, ConsoleClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let author = Author::new("alice", "Alice");
//! let client = ConsoleClient::new("general", author);
//!
//! client
//!     .sync(|message| tokio::spawn(async move { println!("{}", message.content) }))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod console;

pub use crate::transport::console::ConsoleClient;

/// Author of a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// Unique id of the account
    pub id: String,
    /// Display name of the account
    pub name: String,
    /// Whether the account is a bot
    pub bot: bool,
}

impl Author {
    /// Creates a human author.
    pub fn new(id: &str, name: &str) -> Self {
        Author {
            id: id.to_owned(),
            name: name.to_owned(),
            bot: false,
        }
    }
}

/// A chat message as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Raw text of the message
    pub content: String,
    /// Name of the channel the message was posted in
    pub channel: String,
    /// Author of the message
    pub author: Author,
}

impl Message {
    /// Creates a message posted by `author` in `channel`.
    pub fn new(content: &str, channel: &str, author: Author) -> Self {
        Message {
            content: content.to_owned(),
            channel: channel.to_owned(),
            author,
        }
    }
}
