//! Ban command handler.
//!
//! Bans a member indefinitely, optionally deleting their recent messages and
//! recording a reason. Only runs for members meeting the requirement of the
//! moderation module.
//!
//! # Validation
//!
//! - **Days**: Must be a whole, non-negative number when given
//! - **User**: Must not be the author of the command

use log::{debug, info};

use crate::commands::{
    CommandResult, InvocationContext,
    markdown_response::{format_ban, format_invalid_days, format_self_ban},
};

/// Bans the member named by the `user` argument.
///
/// The ban itself is announced with a severe reply.
pub fn handle_ban(context: &InvocationContext) -> CommandResult {
    debug!("handling ban command {:?}", context.parameters);

    let user = context
        .parameters
        .get("user")
        .map(String::as_str)
        .unwrap_or_default();

    let author = &context.message.author;
    if user.eq_ignore_ascii_case(&author.id) || user.eq_ignore_ascii_case(&author.name) {
        return CommandResult::warning(format_self_ban());
    }

    let days = match context.parameters.get("days") {
        Some(days) => match days.parse::<u32>() {
            Ok(days) => Some(days),
            Err(_) => return CommandResult::warning(format_invalid_days()),
        },
        None => None,
    };

    let reason = context
        .parameters
        .get("reason")
        .map(String::as_str)
        .filter(|reason| !reason.is_empty());

    info!("{} banned {} ({:?})", author.id, user, reason);

    CommandResult::severe(format_ban(user, days, reason))
}
