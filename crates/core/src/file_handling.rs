//! Reading and validation of parameter definitions files.

use std::collections::HashSet;
use std::fs::File;

use log::debug;

use crate::definitions::ParameterDefinitions;
use crate::error::Error::{MissingName, MultipleDefaults, NonUniqueFlag};
use crate::error::{Error, Result};

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    File::open(path)
        .map_err(|e| Error::io_error(file_description.to_string(), path.to_string(), e))
}

/// Checks that flags are unique, that only the default parameter lacks a
/// short name, and that every type name and default literal is valid.
///
/// # Errors
///
/// Returns the first problem found, in definition order.
pub fn validate_definitions(definitions: &ParameterDefinitions) -> Result<()> {
    // The built-in help parameter owns these.
    let mut flags: HashSet<String> = HashSet::from(["-h".to_string(), "--help".to_string()]);
    let mut default: Option<String> = None;

    for definition in &definitions.parameters {
        definition.parsed_type()?;

        if definition.is_default() {
            if let Some(previous) = &default {
                return Err(MultipleDefaults(previous.clone(), definition.to_string()));
            }
            default = Some(definition.to_string());
            continue;
        }

        if definition.name.is_empty() {
            return Err(MissingName(definition.long.clone()));
        }

        let short = format!("-{}", definition.name);
        let long = format!("--{}", definition.long);

        if !flags.insert(short.clone()) {
            return Err(NonUniqueFlag(short));
        }

        if !definition.long.is_empty() && !flags.insert(long.clone()) {
            return Err(NonUniqueFlag(long));
        }
    }

    // Defaults are checked by registering against a throwaway parser.
    crate::definitions::build_parser(definitions, ["validate"]).map(|_| ())
}

/// Loads and validates parameter definitions from a YAML file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file contains invalid YAML or does not match the expected structure
/// - The definitions fail [`validate_definitions`]
pub fn get_parameter_definitions(path: &str) -> Result<ParameterDefinitions> {
    let reader = get_reader("parameter definitions", path)?;

    let definitions: ParameterDefinitions = serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "parameter definitions".to_string(),
            path.to_string(),
            e,
        )
    })?;

    debug!(
        "Loaded {} parameter definition(s) from `{}`",
        definitions.parameters.len(),
        path
    );

    validate_definitions(&definitions)?;
    Ok(definitions)
}
