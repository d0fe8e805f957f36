//! Playback command handler.
//!
//! Describes the playback state, reading the volume from the `volume` command
//! this command depends on.

use log::debug;

use crate::commands::{
    Action, CommandResult, InvocationContext,
    markdown_response::{format_playback, format_playback_unavailable},
};

/// Returns the current playback volume.
pub fn handle_playback(context: &InvocationContext) -> CommandResult {
    debug!("handling playback command");

    let level = context
        .dependencies
        .get("volume")
        .and_then(|volume| match &volume.action {
            Action::Volume(control) => Some(control.level()),
            _ => None,
        });

    match level {
        Some(level) => CommandResult::info(format_playback(level)),
        None => CommandResult::warning(format_playback_unavailable()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::{
            Catalog, CommandDescriptor, Module, Severity,
            actions::{VolumeControl, test_support::create_test_context},
        },
        transport::{Author, Message},
    };

    fn create_test_message() -> Message {
        Message::new("luna np", "general", Author::new("alice", "Alice"))
    }

    #[test]
    fn test_handle_playback_reads_volume() {
        let catalog = Catalog::new(vec![Module::new(
            "Music",
            vec![
                CommandDescriptor::new("volume", Action::Volume(VolumeControl::new(200))),
                CommandDescriptor::new("playback", Action::Playback)
                    .with_dependencies(&["volume"]),
            ],
        )]);
        let message = create_test_message();
        let playback = catalog.find("playback").unwrap();

        let result = handle_playback(&create_test_context(&message, playback, &catalog, &[]));

        assert_eq!(result.severity, Severity::Info);
        assert_eq!(result.response, "Playback volume is 100%.");
    }

    #[test]
    fn test_handle_playback_without_volume() {
        let catalog = Catalog::new(vec![Module::new(
            "Music",
            vec![
                CommandDescriptor::new("playback", Action::Playback)
                    .with_dependencies(&["volume"]),
            ],
        )]);
        let message = create_test_message();
        let playback = catalog.find("playback").unwrap();

        let result = handle_playback(&create_test_context(&message, playback, &catalog, &[]));

        assert_eq!(result.severity, Severity::Warning);
    }

    #[test]
    fn test_handle_playback_dependency_of_wrong_kind() {
        let catalog = Catalog::new(vec![Module::new(
            "Music",
            vec![
                CommandDescriptor::new("volume", Action::Echo),
                CommandDescriptor::new("playback", Action::Playback)
                    .with_dependencies(&["volume"]),
            ],
        )]);
        let message = create_test_message();
        let playback = catalog.find("playback").unwrap();

        let result = handle_playback(&create_test_context(&message, playback, &catalog, &[]));

        assert_eq!(result.response, "Playback information is unavailable.");
    }
}
