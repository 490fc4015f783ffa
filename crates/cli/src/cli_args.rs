//! Command-line arguments of the `cmdparse` binary.

use clap::Parser;

/// Command-line arguments for the cmdparse CLI tool.
///
/// Everything after the recognised options is handed, unchanged, to the
/// parser built from the definitions file.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use cmdparse_cli::cli_args::Args;
///
/// let args = Args::parse_from(["cmdparse", "-c", "tool.yml", "--", "-n", "5"]);
/// assert_eq!(args.arguments, ["-n", "5"]);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the parameter definitions YAML file.
    ///
    /// If not provided, defaults to `~/.cmdparse/parameters.yml`.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Output template, e.g. `{input} -> {output}`.
    ///
    /// Keys are parameter long flags, or short names for parameters without
    /// one, and `default` for the default parameter. Without a template every
    /// resolved value is printed as `key = value`.
    #[arg(long, short = 't')]
    pub template: Option<String>,

    /// Arguments to parse against the definitions.
    ///
    /// Use `--` before them when the first one starts with a dash.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub arguments: Vec<String>,
}
