//! Console transport.
//!
//! Every line read from standard input is a message posted by the configured
//! author. A line starting with `#<channel> ` is posted in that channel instead
//! of the default one, which makes it easy to try aliasless or excluded
//! channels from a terminal.

use anyhow::Result;
use futures::future::join_all;
use log::{debug, error, info};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout},
    sync::Mutex,
    task::JoinHandle,
};

use crate::transport::{Author, Message};

/// Line-oriented client standing in for a chat platform connection.
pub struct ConsoleClient {
    /// Channel used for lines without a `#<channel>` prefix
    channel: String,
    /// Author of every message read from the console
    author: Author,
    /// Shared output so concurrent replies do not interleave
    output: Mutex<Stdout>,
}

impl ConsoleClient {
    /// Creates a console client posting as `author` in `channel`.
    pub fn new(channel: &str, author: Author) -> Self {
        ConsoleClient {
            channel: channel.to_owned(),
            author,
            output: Mutex::new(tokio::io::stdout()),
        }
    }

    /// Reads standard input until it is closed, calling `on_message` per line.
    ///
    /// The callback returns the handle of the task processing the message;
    /// once the input is exhausted, the method waits for the pending tasks so
    /// that every reply is written before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if standard input cannot be read.
    pub async fn sync<F>(&self, on_message: F) -> Result<()>
    where
        F: Fn(Message) -> JoinHandle<()>,
    {
        info!(
            "listening on standard input as {} in #{}",
            self.author.id, self.channel
        );

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut pending: Vec<JoinHandle<()>> = Vec::new();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let message = self.parse_line(&line);
            debug!("received message {:?}", message);

            pending.retain(|handle| !handle.is_finished());
            pending.push(on_message(message));
        }

        info!("standard input closed, waiting for {} pending messages", pending.len());
        join_all(pending).await;

        Ok(())
    }

    /// Writes a reply to standard output, prefixed with its channel.
    ///
    /// Write failures are logged and otherwise ignored.
    pub async fn send_reply(&self, channel: &str, reply: &str) {
        if reply.is_empty() {
            return;
        }

        let line = format!("[#{}] {}\n", channel, reply);
        let mut output = self.output.lock().await;
        if let Err(e) = output.write_all(line.as_bytes()).await {
            error!("failed to write reply: {}", e);
            return;
        }
        if let Err(e) = output.flush().await {
            error!("failed to flush reply: {}", e);
        }
    }

    /// Builds the message for one console line.
    fn parse_line(&self, line: &str) -> Message {
        if let Some(rest) = line.strip_prefix('#') {
            if let Some((channel, content)) = rest.split_once(' ') {
                if !channel.is_empty() {
                    return Message::new(content, channel, self.author.clone());
                }
            }
        }

        Message::new(line, &self.channel, self.author.clone())
    }
}
