//! Command action handlers.
//!
//! Individual handler functions for each built-in command. Each handler receives an
//! [`InvocationContext`](crate::commands::InvocationContext), processes the command,
//! and returns a [`CommandResult`](crate::commands::CommandResult).
//!
//! # Handler Pattern
//!
//! Handlers follow a consistent pattern:
//! 1. Receive the context with the extracted arguments and resolved dependencies
//! 2. Validate the values of the arguments
//! 3. Return a result with a Markdown response and its severity
//!
//! # Available Handlers
//!
//! - [`handle_help`] - List modules or describe the commands of one module
//! - [`handle_ban`] - Ban a member
//! - [`handle_volume`] - Change the playback volume
//! - [`handle_playback`] - Describe the playback state
//! - [`handle_echo`] - Repeat the message

mod ban;
mod echo;
mod help;
mod playback;
mod volume;

pub use crate::commands::actions::{
    ban::handle_ban,
    echo::handle_echo,
    help::handle_help,
    playback::handle_playback,
    volume::{VolumeControl, handle_volume},
};
