//! Echo command handler.

use log::debug;

use crate::commands::{CommandResult, InvocationContext, markdown_response::format_echo};

/// Repeats the text of the message, attributed to its author.
pub fn handle_echo(context: &InvocationContext) -> CommandResult {
    debug!("handling echo command");

    let text = context.parameter.as_deref().unwrap_or_default();
    CommandResult::info(format_echo(&context.message.author.name, text))
}
