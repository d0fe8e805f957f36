//! Command resolution, argument extraction and dispatch.
//!
//! This module turns a chat message into a call to one of the registered
//! commands, with its arguments extracted from the free text of the message.
//!
//! # Overview
//!
//! ```text
//! Message
//!    │
//!    ▼
//! ┌────────────┐  filtered by policy or not calling the bot → silent
//! │ Normalizer │
//! └────────────┘
//!    │ normalized text
//!    ▼
//! ┌────────────┐  no command                      → UnknownCommand
//! │  Matcher   │
//! └────────────┘
//!    │ descriptor + remainder
//!    ▼
//! ┌────────────┐
//! │ Extractor  │
//! └────────────┘
//!    │ arguments, missing, leftover
//!    ▼
//! ┌────────────┐  module requirement vetoed       → RequirementNotMet (silent)
//! │    Gate    │
//! └────────────┘
//!    ▼
//! ┌────────────┐  required parameter unfilled     → MissingRequiredParameter
//! │ Validator  │  unkeyed text left over          → ExcessUnmatchedInput
//! └────────────┘
//!    ▼
//! ┌────────────┐
//! │ Commander  │  dependencies resolved, handler invoked → CommandResult
//! └────────────┘
//! ```
//!
//! # Argument Syntax
//!
//! Arguments are space-delimited free text. A value can be tagged with the
//! name of its parameter, `keyword: value`, and untagged text is given to the
//! only parameter able to take it:
//!
//! | Message | Arguments |
//! |---------|-----------|
//! | `luna ban bob` | `user = bob` |
//! | `luna ban bob reason: spamming links` | `user = bob`, `reason = spamming links` |
//! | `luna ban days:7 user: bob` | `days = 7`, `user = bob` |
//! | `luna help music` | `module = music` |
//!
//! # Module Organization
//!
//! - [`descriptor`] - Command metadata, parameter classification and actions
//! - [`catalog`] - Registry of modules and commands, dependency resolution
//! - [`normalizer`] - Message filtering and content normalization
//! - [`matcher`] - Command selection
//! - [`extractor`] - Argument extraction
//! - [`validator`] - Arity validation and usage messages
//! - [`commander`] - Pipeline orchestration and dispatch
//! - [`actions`] - Handlers of the built-in commands
//! - [`modules`] - Built-in modules
//! - [`markdown_response`] - Response formatting

use std::collections::HashMap;

mod actions;
mod catalog;
mod commander;
mod descriptor;
mod extractor;
mod markdown_response;
mod matcher;
mod modules;
mod normalizer;
mod validator;

pub use crate::commands::{
    catalog::{Catalog, Module, Requirement},
    commander::Commander,
    descriptor::{Action, CommandDescriptor, Parameters, SEPARATOR},
    markdown_response::format_reply,
    modules::load_modules,
};
use crate::transport::Message;

/// Everything a handler receives when its command is invoked.
///
/// Built once per matched and validated message, then consumed by
/// [`Commander::execute`].
#[derive(Debug)]
pub struct InvocationContext<'a> {
    /// The message that invoked the command
    pub message: &'a Message,
    /// The invoked command
    pub descriptor: &'a CommandDescriptor,
    /// Extracted values by parameter name
    pub parameters: HashMap<String, String>,
    /// First extracted value, or the whole text for commands without parameters
    pub parameter: Option<String>,
    /// Dependencies of the command that were found in the catalog
    pub dependencies: HashMap<String, &'a CommandDescriptor>,
    /// The catalog the command was resolved from
    pub catalog: &'a Catalog,
    /// Alias calling the bot, as configured
    pub alias: &'a str,
}

/// How a reply should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Plain information
    Info,
    /// Something the user should fix
    Warning,
    /// A consequential action was taken
    Severe,
}

/// Result of a command handler.
///
/// An empty response means that nothing should be sent.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Markdown-formatted response message
    pub response: String,
    /// Presentation of the response
    pub severity: Severity,
}

impl CommandResult {
    pub fn info(response: impl Into<String>) -> Self {
        CommandResult {
            response: response.into(),
            severity: Severity::Info,
        }
    }

    pub fn warning(response: impl Into<String>) -> Self {
        CommandResult {
            response: response.into(),
            severity: Severity::Warning,
        }
    }

    pub fn severe(response: impl Into<String>) -> Self {
        CommandResult {
            response: response.into(),
            severity: Severity::Severe,
        }
    }
}

/// Outcomes of a message that did not lead to a command invocation.
///
/// # Variants
///
/// * `Filtered` - The message is not for the bot. Ignored silently.
/// * `UnknownCommand` - No command matched. Reported to the user.
/// * `MissingRequiredParameter` - Required parameters got no value. Reported
///   with the usage of the command.
/// * `ExcessUnmatchedInput` - Unkeyed text could not be placed. Reported with
///   the usage of the command.
/// * `RequirementNotMet` - The module gate vetoed a restricted command.
///   Ignored silently so the command is not revealed.
#[derive(Debug, PartialEq, Eq)]
pub enum ResolutionError {
    /// Message filtered out or not calling the bot
    Filtered,
    /// No command matched the message
    UnknownCommand,
    /// Required parameters without a value
    MissingRequiredParameter { missing: Vec<String>, usage: String },
    /// Text no parameter could take
    ExcessUnmatchedInput { leftover: String, usage: String },
    /// Restricted command refused by its module
    RequirementNotMet,
}

/// Errors that can occur during command parsing.
///
/// This enum distinguishes between errors that should produce user-facing
/// messages and those that should be silently ignored.
///
/// # Variants
///
/// * `NotForBot` - Message is not a command for the bot, or must not be
///   answered. Should be handled silently without responding to the user.
///
/// * `InvalidCommand` - Unknown command or invalid arguments.
///   Contains a user-friendly error message to display.
#[derive(Debug)]
pub enum CommandParseError {
    /// Message is not for this bot (silent error)
    NotForBot,
    /// Invalid command with error message
    InvalidCommand(String),
}
