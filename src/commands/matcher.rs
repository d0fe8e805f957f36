//! Command matching.
//!
//! Resolves the leading word of a normalized message to a command of the
//! catalog.

use log::debug;

use crate::{
    commands::{Catalog, CommandDescriptor},
    utils::{first_word, remove_first_word},
};

/// A command selected for a message, with the text left for its arguments.
#[derive(Debug)]
pub struct Matched<'a> {
    /// The selected command
    pub descriptor: &'a CommandDescriptor,
    /// Text following the command keyword, or the whole text for singletons
    pub remainder: String,
}

/// Selects the first command of the catalog called by the normalized text.
///
/// The first word, lower-cased, is compared with each identifier and alias in
/// catalog order. Singleton commands match unconditionally, so they act as a
/// fallback for text that no earlier keyword command claims.
///
/// Returns `None` when no command matches.
pub fn match_command<'a>(catalog: &'a Catalog, text: &str) -> Option<Matched<'a>> {
    let keyword = first_word(text);

    let descriptor = catalog.commands().find(|command| command.matches(&keyword))?;

    debug!("keyword {:?} matched command {}", keyword, descriptor.identifier);

    // Singletons have no keyword to remove, the whole text is their argument
    let remainder = match descriptor.is_singleton() {
        true => text.to_owned(),
        false => remove_first_word(text),
    };

    Some(Matched {
        descriptor,
        remainder,
    })
}
