//! Command catalog.
//!
//! The [`Catalog`] is the read-only registry of every [`Module`] and their
//! commands. It is built once at start-up and shared by reference with the
//! [`Commander`](crate::commands::Commander).

use std::{collections::HashMap, fmt};

use log::{debug, warn};
use mockall::automock;

use crate::{commands::CommandDescriptor, transport::Message};

/// Gate deciding whether a restricted command may run for a message.
///
/// Implemented by the module owning the restricted commands, e.g. to check
/// that the author holds a moderator role.
#[automock]
pub trait Requirement: Send + Sync {
    /// Returns `true` if `message` may invoke `descriptor`.
    fn is_requirement_met(&self, descriptor: &CommandDescriptor, message: &Message) -> bool;
}

/// A named group of commands sharing a requirement gate.
pub struct Module {
    /// Display name of the module, e.g. `Moderation`
    pub name: String,
    /// Commands of the module, in matching order
    pub commands: Vec<CommandDescriptor>,
    /// Gate consulted for the restricted commands of the module
    requirement: Option<Box<dyn Requirement>>,
}

impl Module {
    /// Creates a module and marks its commands as owned by it.
    pub fn new(name: &str, commands: Vec<CommandDescriptor>) -> Self {
        let commands = commands
            .into_iter()
            .map(|mut command| {
                command.module = name.to_owned();
                command
            })
            .collect();

        Module {
            name: name.to_owned(),
            commands,
            requirement: None,
        }
    }

    /// Sets the gate consulted for restricted commands.
    pub fn with_requirement(mut self, requirement: Box<dyn Requirement>) -> Self {
        self.requirement = Some(requirement);
        self
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field("commands", &self.commands)
            .field("requirement", &self.requirement.is_some())
            .finish()
    }
}

/// Read-only registry of modules and commands.
///
/// Commands are kept in module order, which is the order the matcher tries
/// them in. An index keyed by identifier serves dependency lookups.
#[derive(Debug)]
pub struct Catalog {
    modules: Vec<Module>,
    /// Identifier -> (module index, command index)
    index: HashMap<String, (usize, usize)>,
}

impl Catalog {
    /// Builds the catalog from the given modules.
    ///
    /// When two commands share an identifier, the first one is indexed and a
    /// warning is logged.
    pub fn new(modules: Vec<Module>) -> Self {
        let mut index = HashMap::new();

        for (module_index, module) in modules.iter().enumerate() {
            for (command_index, command) in module.commands.iter().enumerate() {
                if index.contains_key(&command.identifier) {
                    warn!(
                        "duplicate command identifier {} in module {}",
                        command.identifier, module.name
                    );
                    continue;
                }
                index.insert(command.identifier.clone(), (module_index, command_index));
            }
        }

        debug!(
            "catalog loaded with {} commands in {} modules",
            index.len(),
            modules.len()
        );

        Catalog { modules, index }
    }

    /// Modules in registration order.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Every command, in matching order.
    pub fn commands(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.modules.iter().flat_map(|module| module.commands.iter())
    }

    /// Finds a command by identifier.
    pub fn find(&self, identifier: &str) -> Option<&CommandDescriptor> {
        self.index
            .get(identifier)
            .map(|&(module_index, command_index)| {
                &self.modules[module_index].commands[command_index]
            })
    }

    /// Finds a module by name, ignoring case.
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules
            .iter()
            .find(|module| module.name.eq_ignore_ascii_case(name))
    }

    /// Maps the dependencies of a command to the commands they name.
    ///
    /// Dependencies missing from the catalog are left out of the map; the
    /// handlers check for their presence.
    pub fn resolve_dependencies(
        &self,
        descriptor: &CommandDescriptor,
    ) -> HashMap<String, &CommandDescriptor> {
        descriptor
            .dependencies
            .iter()
            .filter_map(|dependency| {
                let found = self.find(dependency);
                if found.is_none() {
                    debug!(
                        "dependency {} of {} not found",
                        dependency, descriptor.identifier
                    );
                }
                found.map(|command| (dependency.clone(), command))
            })
            .collect()
    }

    /// Consults the requirement of the module owning a restricted command.
    ///
    /// Unrestricted commands always pass. A restricted command whose module
    /// has no requirement passes as well.
    pub fn is_requirement_met(&self, descriptor: &CommandDescriptor, message: &Message) -> bool {
        if !descriptor.restricted {
            return true;
        }

        match self
            .module(&descriptor.module)
            .and_then(|module| module.requirement.as_ref())
        {
            Some(requirement) => requirement.is_requirement_met(descriptor, message),
            None => true,
        }
    }
}
