//! Help command handler.
//!
//! Without argument, lists every module with a few of its commands. With a
//! module name, describes each command of that module.

use log::debug;

use crate::commands::{
    CommandResult, InvocationContext,
    markdown_response::{format_help, format_module_help, format_module_not_found},
};

/// Returns formatted help information about the modules and their commands.
///
/// This command is read-only and doesn't modify any state.
pub fn handle_help(context: &InvocationContext) -> CommandResult {
    debug!("handling help command {:?}", context.parameter);

    let Some(name) = context.parameters.get("module") else {
        return CommandResult::info(format_help(context.alias, context.catalog.modules()));
    };

    match context.catalog.module(name) {
        Some(module) => CommandResult::info(format_module_help(context.alias, module)),
        None => CommandResult::warning(format_module_not_found(context.alias, name)),
    }
}
