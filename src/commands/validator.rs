//! Arity validation.
//!
//! Checks that an [`Extraction`] filled every required parameter and consumed
//! all of the text, and builds the usage message shown otherwise.

use log::debug;

use crate::{
    commands::{CommandDescriptor, ResolutionError, extractor::Extraction},
    utils::pluralise,
};

/// Accepts or rejects the arguments extracted for a command.
///
/// Singleton commands always pass. Otherwise missing required parameters are
/// reported first, then unkeyed text that no parameter could take.
///
/// # Errors
///
/// * [`ResolutionError::MissingRequiredParameter`] - a required parameter has no value
/// * [`ResolutionError::ExcessUnmatchedInput`] - text was left over after extraction
pub fn validate(descriptor: &CommandDescriptor, extraction: &Extraction) -> Result<(), ResolutionError> {
    if descriptor.is_singleton() {
        return Ok(());
    }

    if !extraction.missing.is_empty() {
        debug!(
            "command {} is missing {:?}",
            descriptor.identifier, extraction.missing
        );
        return Err(ResolutionError::MissingRequiredParameter {
            missing: extraction.missing.clone(),
            usage: usage_message(descriptor),
        });
    }

    if let Some(leftover) = &extraction.leftover {
        debug!(
            "command {} got unmatched input {:?}",
            descriptor.identifier, leftover
        );
        return Err(ResolutionError::ExcessUnmatchedInput {
            leftover: leftover.clone(),
            usage: usage_message(descriptor),
        });
    }

    Ok(())
}

/// Describes how many arguments a command takes and how to call it.
///
/// The optional arguments are only counted when there are several of them.
pub fn usage_message(descriptor: &CommandDescriptor) -> String {
    let parameters = &descriptor.parameters;

    let optional = match parameters.optional.len() > 1 {
        true => format!(
            ", and can additionally take up to {}",
            pluralise("optional argument", parameters.optional.len())
        ),
        false => String::new(),
    };

    format!(
        "This command requires {}{}.\n\nUsage: `{}`",
        pluralise("argument", parameters.required.len()),
        optional,
        descriptor.usage()
    )
}
