//! Usage and help text.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::descriptor::{Descriptor, FLAG_MARKER};
use crate::registry::Registry;

pub const HELP_HINT: &str = "For more help use --help or -h.\n";

/// Usage block of a single parameter.
#[must_use]
pub fn descriptor_usage(descriptor: &Descriptor) -> String {
    let mut usage = if descriptor.is_default() {
        "\tDEFAULT\n".to_string()
    } else {
        format!(
            "\t{},\t{}\n",
            descriptor.command(),
            descriptor.alternative()
        )
    };

    if descriptor.is_required() {
        usage.push_str("\t\t(required)");
    } else {
        usage.push_str(&format!(
            "\t\tDefault:\t'{}'\n\t\t[optional] ",
            descriptor.rendered_value()
        ));
    }

    usage.push_str(descriptor.description());
    usage.push_str("\n\n");
    usage
}

/// Usage text of the whole parser: the general help text followed by every
/// parameter's usage block in registration order.
#[must_use]
pub fn parser_usage(general_help_text: &str, registry: &Registry) -> String {
    let mut usage = format!("{general_help_text}\n\nAvailable parameters:\n\n");

    for descriptor in registry.iter() {
        usage.push_str(&descriptor_usage(descriptor));
    }

    usage
}

#[must_use]
pub fn help_hint(registry: &Registry) -> &'static str {
    if registry.has_help() {
        HELP_HINT
    } else {
        ""
    }
}

/// Registered flag closest to an unrecognized flag-shaped `token`.
#[must_use]
pub fn suggest_flag(token: &str, registry: &Registry) -> Option<String> {
    let pattern = token.trim_start_matches(FLAG_MARKER);
    if pattern.is_empty() || pattern.len() == token.len() {
        return None;
    }

    let matcher = SkimMatcherV2::default();

    registry
        .iter()
        .flat_map(|descriptor| [descriptor.alternative(), descriptor.command()])
        .filter(|flag| !flag.is_empty())
        .filter_map(|flag| {
            matcher
                .fuzzy_match(flag, pattern)
                .map(|score| (score, flag))
        })
        .max_by_key(|(score, _)| *score)
        .map(|(_, flag)| flag.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ValueSlot;

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.push(Descriptor::new(
            "n",
            "number",
            "How many times",
            false,
            Box::new(ValueSlot::new(3_i32)),
        ));
        registry.push(Descriptor::new(
            "o",
            "output",
            "Where to write",
            true,
            Box::new(ValueSlot::new(String::new())),
        ));
        registry.push(Descriptor::new(
            "",
            "",
            "Input files",
            false,
            Box::new(ValueSlot::new(vec!["a.txt".to_string()])),
        ));
        registry
    }

    #[test]
    fn test_optional_usage_shows_default() {
        let registry = registry();
        let usage = descriptor_usage(registry.get(0).unwrap());

        assert_eq!(
            usage,
            "\t-n,\t--number\n\t\tDefault:\t'3'\n\t\t[optional] How many times\n\n"
        );
    }

    #[test]
    fn test_required_usage() {
        let registry = registry();
        let usage = descriptor_usage(registry.get(1).unwrap());

        assert_eq!(usage, "\t-o,\t--output\n\t\t(required)Where to write\n\n");
    }

    #[test]
    fn test_default_usage() {
        let registry = registry();
        let usage = descriptor_usage(registry.get(2).unwrap());

        assert!(usage.starts_with("\tDEFAULT\n"));
        assert!(usage.contains("'[ a.txt ]'"));
    }

    #[test]
    fn test_parser_usage_lists_every_parameter() {
        let usage = parser_usage("My tool", &registry());

        assert!(usage.starts_with("My tool\n\nAvailable parameters:\n\n"));
        assert!(usage.contains("--number"));
        assert!(usage.contains("--output"));
        assert!(usage.contains("DEFAULT"));
    }

    #[test]
    fn test_help_hint_requires_help_parameter() {
        assert_eq!(help_hint(&registry()), "");
    }

    #[test]
    fn test_suggest_flag() {
        let registry = registry();

        assert_eq!(suggest_flag("--numbr", &registry), Some("--number".to_string()));
        assert_eq!(suggest_flag("--outpt", &registry), Some("--output".to_string()));
        assert_eq!(suggest_flag("--zzz", &registry), None);
        assert_eq!(suggest_flag("--", &registry), None);
        assert_eq!(suggest_flag("plain", &registry), None);
    }
}
