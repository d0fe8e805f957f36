//! Markdown response formatters for bot commands.
//!
//! This module provides functions to format bot responses in Markdown format
//! for display in chat channels. The command engine never builds user-facing
//! text itself, it hands its outcomes to these functions.

use log::debug;

use crate::commands::{CommandDescriptor, CommandResult, Module, ResolutionError, Severity};

/// Number of commands shown per module in the help overview.
const COMMANDS_PER_MODULE: usize = 3;

/// Formats a command result for sending, prefixing it according to its severity.
///
/// Returns an empty string for an empty response so nothing gets sent.
///
/// # Examples
///
/// ```
/// # use luna::commands::{CommandResult, format_reply};
/// let reply = format_reply(&CommandResult::warning("Unknown command."));
/// assert_eq!(reply, "⚠️ Unknown command.");
/// ```
pub fn format_reply(result: &CommandResult) -> String {
    if result.response.is_empty() {
        return String::new();
    }

    match result.severity {
        Severity::Info => result.response.clone(),
        Severity::Warning => format!("⚠️ {}", result.response),
        Severity::Severe => format!("❗ {}", result.response),
    }
}

/// Formats a resolution error into a user-friendly message.
///
/// Errors that must stay silent (`Filtered` and `RequirementNotMet`) return
/// `None`, so that the bot neither answers unrelated chatter nor reveals the
/// existence of restricted commands.
pub fn format_command_error(error: &ResolutionError, alias: &str) -> Option<String> {
    match error {
        ResolutionError::Filtered | ResolutionError::RequirementNotMet => None,
        ResolutionError::UnknownCommand => Some(format_unknown_command(alias)),
        ResolutionError::MissingRequiredParameter { missing, usage } => {
            debug!("replying with usage, missing {:?}", missing);
            Some(usage_with_alias(usage, alias))
        }
        ResolutionError::ExcessUnmatchedInput { leftover, usage } => {
            debug!("replying with usage, unmatched {:?}", leftover);
            Some(usage_with_alias(usage, alias))
        }
    }
}

/// Prefixes the usage template found in a usage message with the alias.
fn usage_with_alias(usage: &str, alias: &str) -> String {
    usage.replacen("Usage: `", &format!("Usage: `{} ", alias), 1)
}

/// Formats a response for an unknown command.
///
/// # Examples
///
/// ```
/// # use luna::commands::markdown_response::format_unknown_command;
/// let msg = format_unknown_command("luna");
/// assert!(msg.contains("Unknown command"));
/// ```
pub fn format_unknown_command(alias: &str) -> String {
    format!(
        "Unknown command. Type `{} help` for more information.",
        alias
    )
}

/// Formats the help overview listing every module.
///
/// Each module shows its first few commands.
pub fn format_help(alias: &str, modules: &[Module]) -> String {
    let modules_md = modules
        .iter()
        .map(|module| {
            let mut callers: Vec<&str> = module
                .commands
                .iter()
                .take(COMMANDS_PER_MODULE)
                .map(CommandDescriptor::caller)
                .collect();
            if module.commands.len() > COMMANDS_PER_MODULE {
                callers.push("...");
            }
            format!("- **{}** ~ [{}]", module.name, callers.join(", "))
        })
        .collect::<Vec<String>>()
        .join("\n");

    format!(
        "**Help Menu**\n\n\
         Write `{alias} <command> <arguments>`. Arguments can be tagged with their name, \
         e.g. `{alias} ban bob reason: spamming`.\n\
         To get the full list of commands of a module, use `{alias} help <module>`.\n\n\
         Available modules:\n{modules_md}"
    )
}

/// Formats the full information of every command of a module.
pub fn format_module_help(alias: &str, module: &Module) -> String {
    let commands_md = module
        .commands
        .iter()
        .map(|command| format_command_information(alias, command))
        .collect::<Vec<String>>()
        .join("\n\n");

    format!(
        "List of commands of the {} module:\n\n{}",
        module.name.to_lowercase(),
        commands_md
    )
}

/// Formats the name, aliases, description and usage of a command.
pub fn format_command_information(alias: &str, command: &CommandDescriptor) -> String {
    let mut information = format!("**{}**", command.caller());

    if !command.aliases.is_empty() {
        information.push_str(&format!(" (aliases: {})", command.aliases.join(", ")));
    }
    if !command.description.is_empty() {
        information.push_str(&format!("\n{}", command.description));
    }
    if command.is_singleton() {
        information.push_str("\nAnswers any message that is not a command.");
    } else {
        information.push_str(&format!("\nUsage: `{} {}`", alias, command.usage()));
    }

    information
}

/// Formats an error response when a module is not found.
pub fn format_module_not_found(alias: &str, name: &str) -> String {
    format!(
        "The module '{}' does not exist, use `{} help` to get the full list of modules.",
        name, alias
    )
}

/// Formats the confirmation of a ban.
pub fn format_ban(user: &str, days: Option<u32>, reason: Option<&str>) -> String {
    let mut message = format!("{} has been banned indefinitely.", user);

    if let Some(days) = days {
        message.push_str(&format!(
            " Their messages from the last {} were deleted.",
            crate::utils::pluralise("day", days as usize)
        ));
    }
    if let Some(reason) = reason {
        message.push_str(&format!(" Reason: {}", reason));
    }

    message
}

/// Formats an error response for an invalid number of days.
pub fn format_invalid_days() -> String {
    "The __number__ of days must be a __number__.".to_owned()
}

/// Formats an error response when a member tries to ban themselves.
pub fn format_self_ban() -> String {
    "You cannot ban yourself.".to_owned()
}

/// Formats an error response for a volume that is not a number.
pub fn format_volume_not_a_number() -> String {
    "The specified volume is not a number.".to_owned()
}

/// Formats an error response for a volume below or equal to zero.
pub fn format_volume_too_low() -> String {
    "It's not recommended to set the volume to a negative value.".to_owned()
}

/// Formats an error response for a volume above the maximum.
pub fn format_volume_too_high(maximum: u32) -> String {
    format!("The maximum volume is {}%.", maximum)
}

/// Formats the confirmation of a volume change.
pub fn format_volume_set(volume: u32) -> String {
    format!("Volume set to {}%.", volume)
}

/// Formats the playback state.
pub fn format_playback(volume: u32) -> String {
    format!("Playback volume is {}%.", volume)
}

/// Formats an error response when the playback state cannot be read.
pub fn format_playback_unavailable() -> String {
    "Playback information is unavailable.".to_owned()
}

/// Formats the echo of a message.
pub fn format_echo(author: &str, text: &str) -> String {
    format!("{} said: {}", author, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Action;

    #[test]
    fn test_format_reply_severities() {
        assert_eq!(format_reply(&CommandResult::info("Done.")), "Done.");
        assert_eq!(format_reply(&CommandResult::warning("Careful.")), "⚠️ Careful.");
        assert_eq!(format_reply(&CommandResult::severe("Banned.")), "❗ Banned.");
    }

    #[test]
    fn test_format_reply_empty() {
        assert_eq!(format_reply(&CommandResult::warning("")), "");
    }

    #[test]
    fn test_format_command_error_silent() {
        assert_eq!(format_command_error(&ResolutionError::Filtered, "luna"), None);
        assert_eq!(
            format_command_error(&ResolutionError::RequirementNotMet, "luna"),
            None
        );
    }

    #[test]
    fn test_format_command_error_unknown() {
        let message = format_command_error(&ResolutionError::UnknownCommand, "luna").unwrap();
        assert_eq!(
            message,
            "Unknown command. Type `luna help` for more information."
        );
    }

    #[test]
    fn test_format_command_error_usage_gets_alias() {
        let error = ResolutionError::MissingRequiredParameter {
            missing: vec!["user".to_string()],
            usage: "This command requires 1 argument.\n\nUsage: `ban <user>`".to_string(),
        };
        assert_eq!(
            format_command_error(&error, "luna").unwrap(),
            "This command requires 1 argument.\n\nUsage: `luna ban <user>`"
        );

        let error = ResolutionError::ExcessUnmatchedInput {
            leftover: "now".to_string(),
            usage: "This command requires 0 arguments.\n\nUsage: `playback`".to_string(),
        };
        assert_eq!(
            format_command_error(&error, "luna").unwrap(),
            "This command requires 0 arguments.\n\nUsage: `luna playback`"
        );
    }

    #[test]
    fn test_format_help_truncates_long_modules() {
        let modules = vec![
            Module::new(
                "Music",
                vec![
                    CommandDescriptor::new("play", Action::Playback),
                    CommandDescriptor::new("pause", Action::Playback),
                    CommandDescriptor::new("skip", Action::Playback),
                    CommandDescriptor::new("stop", Action::Playback),
                ],
            ),
            Module::new("Information", vec![CommandDescriptor::new("help", Action::Echo)]),
        ];

        let help = format_help("luna", &modules);

        assert!(help.contains("- **Music** ~ [play, pause, skip, ...]"));
        assert!(help.contains("- **Information** ~ [help]"));
        assert!(help.contains("`luna help <module>`"));
    }

    #[test]
    fn test_format_command_information() {
        let command = CommandDescriptor::new("ban", Action::Ban)
            .with_aliases(&["suspend"])
            .with_description("Bans a member indefinitely")
            .with_parameters(&["user", "optional: reason"]);

        assert_eq!(
            format_command_information("luna", &command),
            "**ban** (aliases: suspend)\nBans a member indefinitely\nUsage: `luna ban <user> [reason]`"
        );
    }

    #[test]
    fn test_format_command_information_singleton() {
        let command = CommandDescriptor::new("$echo", Action::Echo);
        assert_eq!(
            format_command_information("luna", &command),
            "**echo**\nAnswers any message that is not a command."
        );
    }

    #[test]
    fn test_format_module_help() {
        let module = Module::new(
            "Music",
            vec![CommandDescriptor::new("playback", Action::Playback).with_aliases(&["np"])],
        );
        assert_eq!(
            format_module_help("luna", &module),
            "List of commands of the music module:\n\n**playback** (aliases: np)\nUsage: `luna playback`"
        );
    }

    #[test]
    fn test_format_ban() {
        assert_eq!(format_ban("bob", None, None), "bob has been banned indefinitely.");
        assert_eq!(
            format_ban("bob", Some(1), Some("spam")),
            "bob has been banned indefinitely. Their messages from the last 1 day were deleted. Reason: spam"
        );
    }

    #[test]
    fn test_format_volume_messages() {
        assert_eq!(format_volume_set(50), "Volume set to 50%.");
        assert_eq!(format_volume_too_high(200), "The maximum volume is 200%.");
    }
}
