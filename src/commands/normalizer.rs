//! Message filtering and normalization.
//!
//! The [`Normalizer`] decides whether a message concerns the bot at all and,
//! if it does, turns its content into the canonical form the matcher and the
//! extractor work on.

use log::debug;

use crate::{
    commands::SEPARATOR,
    config::Config,
    transport::Message,
    utils::{normalise_spaces, remove_first_word, sanitise_name},
};

/// Filters and normalizes incoming messages.
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// Alias calling the bot, lower-cased
    alias: String,
    /// Author id of the bot itself
    bot_id: String,
    /// Channels where the alias is optional
    aliasless_channels: Vec<String>,
    /// Sanitised names of the channels where the bot stays silent
    excluded_channels: Vec<String>,
}

impl Normalizer {
    /// Creates a normalizer from the bot configuration.
    pub fn new(config: &Config) -> Self {
        Normalizer {
            alias: config.alias.to_lowercase(),
            bot_id: config.bot_id.clone(),
            aliasless_channels: config.aliasless_channels.clone(),
            excluded_channels: config
                .excluded_channels
                .iter()
                .map(|channel| sanitise_name(channel))
                .collect(),
        }
    }

    /// Returns `false` for messages the bot must never answer.
    ///
    /// These are messages written by the bot itself, by another bot, or in an
    /// excluded channel.
    pub fn accepts(&self, message: &Message) -> bool {
        if message.author.bot || message.author.id == self.bot_id {
            return false;
        }

        let channel = sanitise_name(&message.channel);
        !self.excluded_channels.contains(&channel)
    }

    /// Normalizes the content of a message.
    ///
    /// Whitespace runs are collapsed, the alias is stripped, and keyword spans
    /// are repaired. Returns `None` when the message does not call the bot:
    /// it neither starts with the alias nor was posted in an aliasless channel.
    ///
    /// The result may be empty, e.g. when the message is only the alias.
    pub fn normalize(&self, message: &Message) -> Option<String> {
        let content = normalise_spaces(&message.content);

        let is_calling_bot = self.is_calling_bot(&content);
        let in_aliasless_channel = self.aliasless_channels.contains(&message.channel);

        if !is_calling_bot && !in_aliasless_channel {
            return None;
        }

        let content = match is_calling_bot {
            true => remove_first_word(&content),
            false => content,
        };

        let normalized = repair_keyword_spans(&content);
        debug!("normalized {:?} into {:?}", message.content, normalized);

        Some(normalized)
    }

    /// Returns `true` if the content starts with the alias, ignoring case.
    ///
    /// The whole first word is stripped afterwards, so punctuation glued to
    /// the alias (`Luna, help`) goes with it.
    fn is_calling_bot(&self, content: &str) -> bool {
        !self.alias.is_empty() && content.to_lowercase().starts_with(&self.alias)
    }
}

/// Separates keywords glued to their value.
///
/// A word holding a separator anywhere but at its end, such as `reason:spam`,
/// is split after each separator (`reason: spam`), so that every keyword is a
/// word of its own. Running the repair twice yields the same text.
pub fn repair_keyword_spans(text: &str) -> String {
    let mut words: Vec<&str> = Vec::new();

    for word in text.split(' ') {
        let glued = word
            .find(SEPARATOR)
            .is_some_and(|position| position + SEPARATOR.len_utf8() < word.len());

        if !glued {
            words.push(word);
            continue;
        }

        // `split_inclusive` keeps each separator at the end of its keyword
        words.extend(word.split_inclusive(SEPARATOR));
    }

    words.join(" ")
}
