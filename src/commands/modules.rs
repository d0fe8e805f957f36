//! Built-in modules.
//!
//! Builds the [`Catalog`] served by the bot from its configuration:
//!
//! - **Information** - `help`
//! - **Moderation** - `ban`, restricted to the configured moderators
//! - **Music** - `volume` and `playback`
//! - **Social** - the `$echo` singleton, only when `echo` is enabled

use std::collections::HashSet;

use log::info;

use crate::{
    commands::{
        Action, Catalog, CommandDescriptor, Module, Requirement, actions::VolumeControl,
    },
    config::Config,
    transport::Message,
};

/// Requirement met by the authors listed as moderators.
#[derive(Debug)]
pub struct ModeratorRequirement {
    moderators: HashSet<String>,
}

impl ModeratorRequirement {
    pub fn new(moderators: &[String]) -> Self {
        ModeratorRequirement {
            moderators: moderators.iter().cloned().collect(),
        }
    }
}

impl Requirement for ModeratorRequirement {
    fn is_requirement_met(&self, _descriptor: &CommandDescriptor, message: &Message) -> bool {
        self.moderators.contains(&message.author.id)
    }
}

/// Builds the catalog of built-in modules.
///
/// The singleton goes last so that every keyword command is tried before it.
pub fn load_modules(config: &Config) -> Catalog {
    let mut modules = vec![
        Module::new(
            "Information",
            vec![
                CommandDescriptor::new("help", Action::Help)
                    .with_aliases(&["commands"])
                    .with_description("Lists the modules, or the commands of one module")
                    .with_parameters(&["optional: module"]),
            ],
        ),
        Module::new(
            "Moderation",
            vec![
                CommandDescriptor::new("ban", Action::Ban)
                    .with_aliases(&["suspend"])
                    .with_description("Bans a member indefinitely")
                    .with_parameters(&["user", "optional: days", "optional: reason"])
                    .restricted(),
            ],
        )
        .with_requirement(Box::new(ModeratorRequirement::new(&config.moderators))),
        Module::new(
            "Music",
            vec![
                CommandDescriptor::new(
                    "volume",
                    Action::Volume(VolumeControl::new(config.maximum_volume)),
                )
                .with_description("Sets the playback volume, in percent")
                .with_parameters(&["volume"]),
                CommandDescriptor::new("playback", Action::Playback)
                    .with_aliases(&["np"])
                    .with_description("Shows the playback state")
                    .with_dependencies(&["volume"]),
            ],
        ),
    ];

    if config.echo {
        modules.push(Module::new(
            "Social",
            vec![
                CommandDescriptor::new("$echo", Action::Echo)
                    .with_description("Repeats what was said"),
            ],
        ));
    }

    info!("loading {} modules", modules.len());

    Catalog::new(modules)
}
