//! Command descriptors.
//!
//! A [`CommandDescriptor`] holds the static metadata of one invocable command:
//! its keywords, its declared parameters, the sibling commands it depends on,
//! and the [`Action`] run when it is invoked.

use log::debug;

use crate::commands::{
    CommandResult, InvocationContext,
    actions::{
        VolumeControl, handle_ban, handle_echo, handle_help, handle_playback, handle_volume,
    },
};

/// Identifiers starting with this sigil denote singleton commands.
pub const SINGLETON_SIGIL: char = '$';

/// Prefix marking a declared parameter as optional, e.g. `optional: reason`.
pub const OPTIONAL_PREFIX: &str = "optional:";

/// Separator between a parameter keyword and its value, e.g. `reason: spam`.
pub const SEPARATOR: char = ':';

/// Declared parameters of a command, split by optionality.
///
/// Both lists keep the declaration order and never share a name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    /// Parameters that must receive a value
    pub required: Vec<String>,
    /// Parameters that may receive a value, without their `optional:` prefix
    pub optional: Vec<String>,
}

impl Parameters {
    /// Splits declared parameters into required and optional ones.
    ///
    /// A parameter is optional when it starts with [`OPTIONAL_PREFIX`]; the
    /// prefix and the whitespace after it are removed from its name.
    ///
    /// # Examples
    ///
    /// ```
    /// # use luna::commands::Parameters;
    /// let parameters = Parameters::classify(&["user", "optional: days", "optional: reason"]);
    /// assert_eq!(parameters.required, vec!["user"]);
    /// assert_eq!(parameters.optional, vec!["days", "reason"]);
    /// ```
    pub fn classify<S: AsRef<str>>(declared: &[S]) -> Self {
        let mut parameters = Parameters::default();

        for parameter in declared {
            let parameter = parameter.as_ref();
            match parameter.strip_prefix(OPTIONAL_PREFIX) {
                Some(name) => parameters.optional.push(name.trim_start().to_owned()),
                None => parameters.required.push(parameter.to_owned()),
            }
        }

        parameters
    }

    /// Iterates over every parameter name, required ones first.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.required
            .iter()
            .chain(self.optional.iter())
            .map(String::as_str)
    }

    /// Returns `true` when no parameter is declared.
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.optional.is_empty()
    }
}

/// Effect of a command, together with the runtime state it owns.
///
/// Each variant is routed to its handler in [`Action::execute`].
#[derive(Debug)]
pub enum Action {
    /// Lists modules and their commands
    Help,
    /// Bans a member
    Ban,
    /// Changes the playback volume, which it stores
    Volume(VolumeControl),
    /// Describes the playback state
    Playback,
    /// Repeats the message
    Echo,
}

impl Action {
    /// Runs the handler of this action.
    pub fn execute(&self, context: &InvocationContext) -> CommandResult {
        match self {
            Action::Help => handle_help(context),
            Action::Ban => handle_ban(context),
            Action::Volume(control) => handle_volume(context, control),
            Action::Playback => handle_playback(context),
            Action::Echo => handle_echo(context),
        }
    }
}

/// Static metadata of one invocable command.
///
/// Descriptors are built once when the catalog is loaded and never mutated
/// afterwards, apart from the state kept inside their [`Action`].
#[derive(Debug)]
pub struct CommandDescriptor {
    /// Canonical keyword; starts with [`SINGLETON_SIGIL`] for singletons
    pub identifier: String,
    /// Alternate keywords
    pub aliases: Vec<String>,
    /// One line description shown by `help`
    pub description: String,
    /// Declared parameters, classified at construction
    pub parameters: Parameters,
    /// Identifiers of the commands the handler needs at invocation time
    pub dependencies: Vec<String>,
    /// Whether the owning module's requirement must be met
    pub restricted: bool,
    /// Name of the owning module, set by [`Module::new`](crate::commands::Module::new)
    pub module: String,
    /// Effect run on invocation
    pub action: Action,
}

impl CommandDescriptor {
    /// Creates a descriptor without aliases, parameters or dependencies.
    pub fn new(identifier: &str, action: Action) -> Self {
        CommandDescriptor {
            identifier: identifier.to_owned(),
            aliases: Vec::new(),
            description: String::new(),
            parameters: Parameters::default(),
            dependencies: Vec::new(),
            restricted: false,
            module: String::new(),
            action,
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|alias| alias.to_string()).collect();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Declares the parameters, e.g. `["user", "optional: reason"]`.
    pub fn with_parameters(mut self, declared: &[&str]) -> Self {
        self.parameters = Parameters::classify(declared);
        debug!(
            "command {} requires {:?} and accepts {:?}",
            self.identifier, self.parameters.required, self.parameters.optional
        );
        self
    }

    pub fn with_dependencies(mut self, dependencies: &[&str]) -> Self {
        self.dependencies = dependencies.iter().map(|d| d.to_string()).collect();
        self
    }

    /// Marks the command as guarded by its module's requirement.
    pub fn restricted(mut self) -> Self {
        self.restricted = true;
        self
    }

    /// Returns `true` for singleton commands.
    ///
    /// A singleton takes no keyword and no arguments: it matches any message
    /// that no earlier command claimed.
    pub fn is_singleton(&self) -> bool {
        self.identifier.starts_with(SINGLETON_SIGIL)
    }

    /// Returns `true` if the lower-cased keyword calls this command.
    pub fn matches(&self, keyword: &str) -> bool {
        self.is_singleton()
            || self.identifier == keyword
            || self.aliases.iter().any(|alias| alias == keyword)
    }

    /// Name the command is called by, without the singleton sigil.
    pub fn caller(&self) -> &str {
        self.identifier.trim_start_matches(SINGLETON_SIGIL)
    }

    /// Usage template, e.g. `ban <user> [days] [reason]`.
    pub fn usage(&self) -> String {
        let required = self.parameters.required.iter().map(|p| format!("<{}>", p));
        let optional = self.parameters.optional.iter().map(|p| format!("[{}]", p));

        std::iter::once(self.caller().to_owned())
            .chain(required)
            .chain(optional)
            .collect::<Vec<String>>()
            .join(" ")
    }
}
