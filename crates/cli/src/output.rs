//! Presentation of resolved parameter values.
//!
//! Values are keyed by long flag, else short name, else `default`, and kept in
//! definition order.

use std::collections::HashMap;

use indexmap::IndexMap;
use itertools::Itertools;
use leon::Template;
use log::debug;

use cmdparse_core::definitions::ParameterDefinitions;
use cmdparse_core::Parser;

use crate::error::Result;

/// Rendered value of every defined parameter, in definition order.
///
/// # Errors
///
/// Returns an error if a definition has no registered counterpart in `parser`.
pub fn collect_values(
    parser: &Parser,
    definitions: &ParameterDefinitions,
) -> Result<IndexMap<String, String>> {
    let mut values = IndexMap::new();

    for definition in &definitions.parameters {
        let value = parser.rendered_value(&definition.name)?;
        values.insert(definition.key().to_string(), value);
    }

    Ok(values)
}

pub fn format_lines(values: &IndexMap<String, String>) -> String {
    values
        .iter()
        .map(|(key, value)| format!("{key} = {value}"))
        .join("\n")
}

/// Interpolates `template` with the collected values.
///
/// # Errors
///
/// Returns an error if the template is malformed or names an unknown key.
pub fn render_template(template: &str, values: &IndexMap<String, String>) -> Result<String> {
    let template = Template::parse(template)?;

    let context: HashMap<String, String> = values
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(template.render(&context)?)
}

/// Output of a successful run: the rendered template if one was given,
/// otherwise one `key = value` line per parameter.
///
/// # Errors
///
/// See [`collect_values`] and [`render_template`].
pub fn render_output(
    parser: &Parser,
    definitions: &ParameterDefinitions,
    template: Option<&str>,
) -> Result<String> {
    let values = collect_values(parser, definitions)?;
    debug!("Collected {} value(s)", values.len());

    match template {
        Some(template) => render_template(template, &values),
        None => Ok(format_lines(&values)),
    }
}
