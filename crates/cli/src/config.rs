//! Configuration path utilities for cmdparse.

/// Default path for the parameter definitions file
pub const DEFAULT_CONFIG_PATH: &str = "~/.cmdparse/parameters.yml";

/// Resolves the parameter definitions file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use cmdparse_cli::config::get_config_path;
///
/// let custom_path = get_config_path(&Some("/path/to/tool.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/tool.yml");
/// ```
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_path_with_custom_path() {
        let custom_path = Some("/custom/path/tool.yml".to_string());
        let result = get_config_path(&custom_path);
        assert_eq!(result, "/custom/path/tool.yml");
    }

    #[test]
    fn test_get_config_path_with_none() {
        let result = get_config_path(&None);
        assert!(result.ends_with(".cmdparse/parameters.yml"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_get_config_path_with_tilde() {
        let tilde_path = Some("~/my-tool.yml".to_string());
        let result = get_config_path(&tilde_path);
        assert!(!result.starts_with('~'));
        assert!(result.ends_with("my-tool.yml"));
    }
}
