//! Tokenization and resolution of an argument vector against a [`Registry`].
//!
//! Tokenization walks the arguments once, left to right, routing each token to
//! a descriptor. Resolution then makes three passes over the registry: dominant
//! parameters, the required check, and everything else. The first failure ends
//! the run.

use std::io::Write;

use log::debug;

use crate::descriptor::{Descriptor, FLAG_MARKER};
use crate::error::{Error, Result};
use crate::registry::Registry;

/// Routes every token of `arguments` to a descriptor.
///
/// A token matching a registered flag moves the cursor to that descriptor.
/// Other tokens are collected by the cursor, which starts at the default
/// parameter. A non-variadic descriptor accepts a single token, after which the
/// cursor returns to the default parameter.
///
/// # Errors
///
/// Returns [`Error::UnrecognizedParameter`] when a token has nowhere to go or a
/// flag-shaped token reaches a descriptor that already holds its value, and
/// [`Error::TooManyArguments`] when a plain token does.
pub fn tokenize(registry: &mut Registry, arguments: &[String]) -> Result<()> {
    let default = registry.find_default();
    let mut current = default;

    for argument in arguments {
        let is_flag = argument.starts_with(FLAG_MARKER);

        if let Some(index) = is_flag.then(|| registry.find(argument)).flatten() {
            debug!("Token `{argument}` selects parameter #{index}");
            current = Some(index);
            mark_handled(registry, index);
            continue;
        }

        let Some(index) = current else {
            return Err(Error::UnrecognizedParameter(argument.clone()));
        };
        let Some(descriptor) = registry.get_mut(index) else {
            return Err(Error::UnrecognizedParameter(argument.clone()));
        };

        if descriptor.variadic {
            descriptor.arguments.push(argument.clone());
        } else {
            if !descriptor.arguments.is_empty() {
                return Err(if is_flag {
                    Error::UnrecognizedParameter(argument.clone())
                } else {
                    Error::TooManyArguments {
                        parameter: descriptor.label(),
                        given: argument.clone(),
                    }
                });
            }

            descriptor.arguments.push(argument.clone());
            current = default;
        }

        debug!("Token `{argument}` routed to parameter #{index}");
        descriptor.handled = true;
    }

    Ok(())
}

fn mark_handled(registry: &mut Registry, index: usize) {
    if let Some(descriptor) = registry.get_mut(index) {
        descriptor.handled = true;
    }
}

/// Resolves the typed values of every handled descriptor.
///
/// Dominant descriptors go first so that they can act (e.g. print help) even
/// when required parameters are missing. Descriptors that were never handled
/// keep their registered default.
///
/// # Errors
///
/// Returns [`Error::InvalidArguments`] for the first descriptor failing to
/// parse or validate, and [`Error::MissingRequiredParameter`] for the first
/// required descriptor never handled.
pub fn resolve(
    registry: &mut Registry,
    usage: &str,
    output: &mut dyn Write,
    error: &mut dyn Write,
) -> Result<()> {
    debug!("Resolving dominant parameters");
    for descriptor in registry.iter_mut().filter(|d| d.handled && d.dominant) {
        resolve_descriptor(descriptor, usage, output, error)?;
    }

    if let Some(missing) = registry.iter().find(|d| d.required && !d.handled) {
        return Err(Error::MissingRequiredParameter(missing.name.clone()));
    }

    debug!("Resolving remaining parameters");
    for descriptor in registry.iter_mut().filter(|d| d.handled && !d.dominant) {
        resolve_descriptor(descriptor, usage, output, error)?;
    }

    Ok(())
}

fn resolve_descriptor(
    descriptor: &mut Descriptor,
    usage: &str,
    output: &mut dyn Write,
    error: &mut dyn Write,
) -> Result<()> {
    descriptor
        .parse(output, error, usage)
        .and_then(|()| descriptor.validate(output, error))
        .map_err(|source| Error::invalid_arguments(descriptor.name.clone(), source))
}
