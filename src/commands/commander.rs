//! Command orchestration and execution.
//!
//! This module provides the [`Commander`] struct, which serves as the main entry point
//! for processing bot commands. It runs a message through the resolution pipeline and
//! dispatches the resulting invocation to the handler of the matched command.
//!
//! # Architecture
//!
//! The Commander follows a two-phase processing model:
//!
//! 1. **Resolution Phase** - Filters, normalizes and matches the message, then extracts
//!    and validates the arguments into an [`InvocationContext`]
//! 2. **Execution Phase** - Runs the action of the matched command, producing a
//!    [`CommandResult`]
//!
//! # Flow
//!
//! ```text
//! Message → parse() → InvocationContext → execute() → CommandResult
//! ```

use log::{debug, info};

use crate::{
    commands::{
        Catalog, CommandParseError, CommandResult, InvocationContext, ResolutionError,
        extractor::extract, markdown_response::format_command_error, matcher::match_command,
        normalizer::Normalizer, validator::validate,
    },
    config::Config,
    transport::Message,
};

/// Command orchestrator for resolving and executing bot commands.
///
/// The Commander owns the [`Catalog`] and the [`Normalizer`]; both are read-only
/// after construction, so a single instance can serve concurrent messages.
#[derive(Debug)]
pub struct Commander {
    /// Registered modules and commands
    catalog: Catalog,
    /// Message filter and normalizer
    normalizer: Normalizer,
    /// Alias calling the bot, as configured
    alias: String,
}

impl Commander {
    /// Creates a new Commander serving the commands of `catalog`.
    pub fn new(config: &Config, catalog: Catalog) -> Self {
        Commander {
            catalog,
            normalizer: Normalizer::new(config),
            alias: config.alias.clone(),
        }
    }

    /// Resolves a message into the invocation of a command.
    ///
    /// The requirement gate is consulted before arity validation, so a member
    /// who may not run a restricted command never learns its usage.
    ///
    /// # Errors
    ///
    /// * [`ResolutionError::Filtered`] - the message is not for the bot
    /// * [`ResolutionError::UnknownCommand`] - no command matched
    /// * [`ResolutionError::RequirementNotMet`] - the module gate vetoed the command
    /// * [`ResolutionError::MissingRequiredParameter`] - a required argument is missing
    /// * [`ResolutionError::ExcessUnmatchedInput`] - some text could not be placed
    pub fn resolve<'a>(
        &'a self,
        message: &'a Message,
    ) -> Result<InvocationContext<'a>, ResolutionError> {
        if !self.normalizer.accepts(message) {
            return Err(ResolutionError::Filtered);
        }

        let text = match self.normalizer.normalize(message) {
            Some(text) if !text.is_empty() => text,
            _ => return Err(ResolutionError::Filtered),
        };

        let matched = match_command(&self.catalog, &text).ok_or(ResolutionError::UnknownCommand)?;
        let descriptor = matched.descriptor;

        let extraction = extract(&matched.remainder, &descriptor.parameters);

        if !self.catalog.is_requirement_met(descriptor, message) {
            info!(
                "{} does not meet the requirement of {}",
                message.author.id, descriptor.identifier
            );
            return Err(ResolutionError::RequirementNotMet);
        }

        validate(descriptor, &extraction)?;

        let dependencies = self.catalog.resolve_dependencies(descriptor);

        debug!(
            "resolved {} with {:?}",
            descriptor.identifier, extraction.arguments
        );

        Ok(InvocationContext {
            message,
            descriptor,
            parameters: extraction.arguments,
            parameter: extraction.parameter,
            dependencies,
            catalog: &self.catalog,
            alias: &self.alias,
        })
    }

    /// Resolves a message, turning resolution errors into what the user should see.
    ///
    /// # Returns
    ///
    /// * `Ok(InvocationContext)` - The message invokes a command
    /// * `Err(CommandParseError::NotForBot)` - The message must not be answered
    /// * `Err(CommandParseError::InvalidCommand)` - The message needs an error reply
    pub fn parse<'a>(
        &'a self,
        message: &'a Message,
    ) -> Result<InvocationContext<'a>, CommandParseError> {
        self.resolve(message).map_err(|error| {
            // Return silently if the message is not for the bot
            // Otherwise, send an error message
            match format_command_error(&error, &self.alias) {
                Some(reply) => CommandParseError::InvalidCommand(reply),
                None => CommandParseError::NotForBot,
            }
        })
    }

    /// Executes a resolved invocation and returns the result of its handler.
    pub fn execute(&self, context: InvocationContext) -> CommandResult {
        info!(
            "executing {} for {} in #{}",
            context.descriptor.identifier, context.message.author.id, context.message.channel
        );
        context.descriptor.action.execute(&context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::{
            Action, CommandDescriptor, Module, Severity, catalog::MockRequirement,
            modules::load_modules,
        },
        transport::Author,
    };

    fn create_test_config() -> Config {
        Config {
            alias: "luna".to_string(),
            bot_id: "luna".to_string(),
            aliasless_channels: vec!["luna-commands".to_string()],
            excluded_channels: vec!["announcements".to_string()],
            moderators: vec!["moderator".to_string()],
            maximum_volume: 200,
            echo: false,
        }
    }

    fn create_test_commander() -> Commander {
        let config = create_test_config();
        Commander::new(&config, load_modules(&config))
    }

    fn message(content: &str) -> Message {
        Message::new(content, "general", Author::new("moderator", "Mod"))
    }

    fn message_from(content: &str, author: &str) -> Message {
        Message::new(content, "general", Author::new(author, author))
    }

    #[test]
    fn test_resolve_keyword_arguments() {
        let commander = create_test_commander();
        let message = message("luna ban bob days: 7 reason: spamming links");

        let context = commander.resolve(&message).unwrap();

        assert_eq!(context.descriptor.identifier, "ban");
        assert_eq!(context.parameters["user"], "bob");
        assert_eq!(context.parameters["days"], "7");
        assert_eq!(context.parameters["reason"], "spamming links");
    }

    #[test]
    fn test_resolve_alias_and_identifier_give_same_arguments() {
        let commander = create_test_commander();
        let by_identifier = message("luna ban bob reason: spam");
        let by_alias = message("luna suspend bob reason: spam");

        let first = commander.resolve(&by_identifier).unwrap();
        let second = commander.resolve(&by_alias).unwrap();

        assert_eq!(first.descriptor.identifier, second.descriptor.identifier);
        assert_eq!(first.parameters, second.parameters);
    }

    #[test]
    fn test_resolve_repairs_glued_keywords() {
        let commander = create_test_commander();
        let message = message("luna ban days:3 user:bob");

        let context = commander.resolve(&message).unwrap();

        assert_eq!(context.parameters["user"], "bob");
        assert_eq!(context.parameters["days"], "3");
    }

    #[test]
    fn test_resolve_is_case_insensitive_for_keywords() {
        let commander = create_test_commander();
        let message = message("LUNA Commands Music");

        let context = commander.resolve(&message).unwrap();

        assert_eq!(context.descriptor.identifier, "help");
        assert_eq!(context.parameter, Some("Music".to_string()));
    }

    #[test]
    fn test_resolve_not_for_bot() {
        let commander = create_test_commander();
        assert_eq!(
            commander.resolve(&message("hello everyone")).err(),
            Some(ResolutionError::Filtered)
        );
        assert_eq!(
            commander.resolve(&message("luna")).err(),
            Some(ResolutionError::Filtered)
        );
    }

    #[test]
    fn test_resolve_filters_excluded_channel() {
        let commander = create_test_commander();
        let message = Message::new("luna help", "Announcements", Author::new("alice", "Alice"));
        assert_eq!(commander.resolve(&message).err(), Some(ResolutionError::Filtered));
    }

    #[test]
    fn test_resolve_aliasless_channel() {
        let commander = create_test_commander();
        let message = Message::new("help", "luna-commands", Author::new("alice", "Alice"));
        assert_eq!(commander.resolve(&message).unwrap().descriptor.identifier, "help");
    }

    #[test]
    fn test_resolve_unknown_command() {
        let commander = create_test_commander();
        assert_eq!(
            commander.resolve(&message("luna dance")).err(),
            Some(ResolutionError::UnknownCommand)
        );
    }

    #[test]
    fn test_resolve_missing_required_parameter() {
        let commander = create_test_commander();
        let message = message("luna ban");
        let result = commander.resolve(&message);

        assert!(matches!(
            result,
            Err(ResolutionError::MissingRequiredParameter { missing, usage })
                if missing == vec!["user"] && usage.contains("ban <user> [days] [reason]")
        ));
    }

    #[test]
    fn test_resolve_excess_input() {
        let commander = create_test_commander();
        let message = message("luna playback right now");
        let result = commander.resolve(&message);

        assert!(matches!(
            result,
            Err(ResolutionError::ExcessUnmatchedInput { leftover, .. }) if leftover == "right now"
        ));
    }

    #[test]
    fn test_resolve_gate_veto_before_validation() {
        let commander = create_test_commander();
        // Missing arguments are not revealed to members failing the gate
        assert_eq!(
            commander.resolve(&message_from("luna ban", "alice")).err(),
            Some(ResolutionError::RequirementNotMet)
        );
    }

    #[test]
    fn test_resolve_singleton_takes_whole_text() {
        let mut config = create_test_config();
        config.echo = true;
        let commander = Commander::new(&config, load_modules(&config));

        let message = message("luna Hello there, friend");
        let context = commander.resolve(&message).unwrap();

        assert!(context.descriptor.is_singleton());
        assert!(context.parameters.is_empty());
        assert_eq!(context.parameter, Some("Hello there, friend".to_string()));
    }

    #[test]
    fn test_resolve_leftover_overwrites_sole_optional() {
        let commander = create_test_commander();
        let message = message("luna help music module: cooking");

        let context = commander.resolve(&message).unwrap();

        assert_eq!(context.descriptor.identifier, "help");
        assert_eq!(context.parameters["module"], "music");
        assert_eq!(context.parameter, Some("music".to_string()));
    }

    #[test]
    fn test_resolve_alias_followed_by_punctuation() {
        let commander = create_test_commander();
        let message = message("Luna, help");

        assert_eq!(commander.resolve(&message).unwrap().descriptor.identifier, "help");
    }

    #[test]
    fn test_resolve_dependencies() {
        let commander = create_test_commander();
        let message = message("luna np");

        let context = commander.resolve(&message).unwrap();

        assert_eq!(context.descriptor.identifier, "playback");
        assert_eq!(context.dependencies["volume"].identifier, "volume");
    }

    #[test]
    fn test_resolve_consults_mocked_requirement() {
        let mut requirement = MockRequirement::new();
        requirement
            .expect_is_requirement_met()
            .times(2)
            .returning(|_, message| message.author.id == "alice");

        let catalog = Catalog::new(vec![
            Module::new(
                "Admin",
                vec![CommandDescriptor::new("shutdown", Action::Echo).restricted()],
            )
            .with_requirement(Box::new(requirement)),
        ]);
        let commander = Commander::new(&create_test_config(), catalog);

        assert!(commander.resolve(&message_from("luna shutdown", "alice")).is_ok());
        assert_eq!(
            commander.resolve(&message_from("luna shutdown", "bob")).err(),
            Some(ResolutionError::RequirementNotMet)
        );
    }

    #[test]
    fn test_parse_invalid_command_returns_error() {
        let commander = create_test_commander();
        let message = message("luna unknown_command");

        match commander.parse(&message).err().unwrap() {
            CommandParseError::InvalidCommand(msg) => {
                assert!(msg.contains("Unknown command"));
            }
            _ => panic!("Expected InvalidCommand error"),
        }
    }

    #[test]
    fn test_parse_usage_error() {
        let commander = create_test_commander();
        let message = message("luna volume");

        match commander.parse(&message).err().unwrap() {
            CommandParseError::InvalidCommand(msg) => {
                assert!(msg.contains("Usage: `luna volume <volume>`"));
            }
            _ => panic!("Expected InvalidCommand error"),
        }
    }

    #[test]
    fn test_parse_silent_errors() {
        let commander = create_test_commander();
        let chatter = message("This is just a regular message");
        let vetoed = message_from("luna ban bob", "alice");

        assert!(matches!(
            commander.parse(&chatter).err().unwrap(),
            CommandParseError::NotForBot
        ));
        assert!(matches!(
            commander.parse(&vetoed).err().unwrap(),
            CommandParseError::NotForBot
        ));
    }

    #[test]
    fn test_execute_dispatches_to_handler() {
        let commander = create_test_commander();
        let message = message("luna volume 50");

        let context = commander.parse(&message).unwrap();
        let result = commander.execute(context);

        assert_eq!(result.severity, Severity::Info);
        assert_eq!(result.response, "Volume set to 50%.");

        let message = self::message("luna playback");
        let result = commander.execute(commander.parse(&message).unwrap());
        assert_eq!(result.response, "Playback volume is 50%.");
    }
}
