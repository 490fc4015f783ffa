//! The parser: registration, execution and inspection of parameters.

use std::io::{self, Write};

use log::{debug, info};

use crate::conversion::ArgumentValue;
use crate::descriptor::{
    CallbackArgs, CallbackResult, CallbackSlot, Descriptor, Registration, ValueSlot,
};
use crate::error::{Error, Result};
use crate::registry::{Registry, HELP_NAME};
use crate::{resolver, usage};

/// Command-line parser over a stored argument vector.
///
/// Parameters are registered first, then [`Parser::run`] resolves them once.
/// Descriptor state is not reset between runs, so running the same parser
/// twice is a caller error.
///
/// # Examples
///
/// ```
/// use cmdparse_core::Parser;
///
/// let mut parser = Parser::new(["prog", "-n", "5", "input.txt"]);
/// parser.register_optional("n", "number", 1_i32, "How many times");
/// parser.register_default(true, "Input file", String::new());
///
/// assert!(parser.run_with(&mut Vec::new(), &mut Vec::new()));
/// assert_eq!(parser.get::<i32>("n")?, 5);
/// assert_eq!(parser.get_default::<String>()?, "input.txt");
/// # Ok::<(), cmdparse_core::error::Error>(())
/// ```
#[derive(Default)]
pub struct Parser {
    app_name: String,
    general_help_text: String,
    arguments: Vec<String>,
    registry: Registry,
}

impl Parser {
    /// Creates a parser from a full argument vector whose first element is the
    /// program name. The help parameter is registered automatically.
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parser = Self::empty();
        parser.init(argv);
        parser
    }

    /// Like [`Parser::new`], with a general description for the help text.
    pub fn with_description<I, S>(argv: I, general_help_text: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parser = Self::new(argv);
        parser.general_help_text = general_help_text.into();
        parser
    }

    /// Creates a parser over the process arguments.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::args())
    }

    /// Creates a parser with no arguments and no help parameter. Call
    /// [`Parser::init`] before running it.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Stores the argument vector (program name first) and registers the help
    /// parameter.
    pub fn init<I, S>(&mut self, argv: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        self.app_name = argv.next().unwrap_or_default();
        self.arguments.extend(argv);
        self.enable_help();
    }

    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Raw arguments, without the program name.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    #[must_use]
    pub fn general_help_text(&self) -> &str {
        &self.general_help_text
    }

    pub fn set_general_help_text(&mut self, general_help_text: impl Into<String>) {
        self.general_help_text = general_help_text.into();
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub fn has_help(&self) -> bool {
        self.registry.has_help()
    }

    /// Registers the dominant `-h`/`--help` parameter, which prints the usage
    /// text to the output stream.
    pub fn enable_help(&mut self) {
        self.register_callback::<bool, _>(
            HELP_NAME,
            "help",
            |args: &mut CallbackArgs<'_>| -> CallbackResult<bool> {
                write!(args.output, "{}", args.usage)?;
                Ok(false)
            },
            "Print this help text.",
            true,
        );
    }

    pub fn disable_help(&mut self) {
        if self.registry.remove_help() {
            debug!("Removed help parameter");
        }
    }

    /// Registers the unnamed parameter receiving unflagged tokens.
    pub fn register_default<T: ArgumentValue>(
        &mut self,
        required: bool,
        description: &str,
        default_value: T,
    ) -> Registration<'_, T> {
        self.register_value("", "", description, required, default_value)
    }

    pub fn register_required<T: ArgumentValue>(
        &mut self,
        name: &str,
        long_flag: &str,
        description: &str,
    ) -> Registration<'_, T> {
        self.register_value(name, long_flag, description, true, T::default())
    }

    pub fn register_optional<T: ArgumentValue>(
        &mut self,
        name: &str,
        long_flag: &str,
        default_value: T,
        description: &str,
    ) -> Registration<'_, T> {
        self.register_value(name, long_flag, description, false, default_value)
    }

    /// Registers a parameter whose value is computed by `callback` from the
    /// collected arguments. Errors returned by the callback fail the run.
    pub fn register_callback<T, F>(
        &mut self,
        name: &str,
        long_flag: &str,
        callback: F,
        description: &str,
        dominant: bool,
    ) where
        T: ArgumentValue,
        F: FnMut(&mut CallbackArgs<'_>) -> CallbackResult<T> + 'static,
    {
        let slot = CallbackSlot {
            callback: Box::new(callback),
            value: T::default(),
        };
        let descriptor = self
            .registry
            .push(Descriptor::new(name, long_flag, description, false, Box::new(slot)));
        descriptor.dominant = dominant;
    }

    fn register_value<T: ArgumentValue>(
        &mut self,
        name: &str,
        long_flag: &str,
        description: &str,
        required: bool,
        value: T,
    ) -> Registration<'_, T> {
        let descriptor = Descriptor::new(
            name,
            long_flag,
            description,
            required,
            Box::new(ValueSlot::new(value)),
        );

        Registration::new(self.registry.push(descriptor))
    }

    /// Runs against standard output and standard error.
    pub fn run(&mut self) -> bool {
        self.run_with_output(&mut io::stdout().lock())
    }

    /// Runs with diagnostics on standard error.
    pub fn run_with_output(&mut self, output: &mut dyn Write) -> bool {
        self.run_with(output, &mut io::stderr().lock())
    }

    /// Tokenizes and resolves the stored arguments. On failure an explanation
    /// and the failing parameter's usage are written to `error`.
    pub fn run_with(&mut self, output: &mut dyn Write, error: &mut dyn Write) -> bool {
        match self.try_run(output, &mut *error) {
            Ok(()) => {
                info!(
                    "Resolved {} argument(s) for `{}`",
                    self.arguments.len(),
                    self.app_name
                );
                true
            }
            Err(e) => {
                debug!("Run failed: {e:?}");
                self.report(&e, error);
                false
            }
        }
    }

    /// Runs, terminating the process with status 1 on failure.
    pub fn run_and_exit_if_error(&mut self) {
        if !self.run() {
            std::process::exit(1);
        }
    }

    pub(crate) fn try_run(&mut self, output: &mut dyn Write, error: &mut dyn Write) -> Result<()> {
        resolver::tokenize(&mut self.registry, &self.arguments)?;
        let usage = self.usage();
        resolver::resolve(&mut self.registry, &usage, output, error)
    }

    fn report(&self, failure: &Error, error: &mut dyn Write) {
        let _ = write!(error, "ERROR: {failure}");

        match failure.parameter_name().and_then(|name| self.registry.lookup(name)) {
            Some(descriptor) => {
                let _ = write!(error, " Usage:\n{}", usage::descriptor_usage(descriptor));
            }
            None => {
                let _ = writeln!(error);
            }
        }

        if let Error::UnrecognizedParameter(token) = failure {
            if let Some(flag) = usage::suggest_flag(token, &self.registry) {
                let _ = writeln!(error, "Did you mean '{flag}'?");
            }
        }

        let _ = write!(error, "{}", usage::help_hint(&self.registry));
    }

    /// Value of the parameter registered under `name` (short name, or long
    /// flag when no short name matches).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unregistered name and
    /// [`Error::TypeMismatch`] when the value is not a `T`. Both indicate a
    /// programming error rather than bad user input.
    pub fn get<T: Clone + 'static>(&self, name: &str) -> Result<T> {
        let descriptor = self
            .registry
            .lookup(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;

        descriptor
            .value::<T>()
            .cloned()
            .ok_or_else(|| Error::TypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Value of the default parameter.
    ///
    /// # Errors
    ///
    /// See [`Parser::get`].
    pub fn get_default<T: Clone + 'static>(&self) -> Result<T> {
        self.get("")
    }

    /// [`Parser::get`] followed by `callback`.
    ///
    /// # Errors
    ///
    /// See [`Parser::get`].
    pub fn get_if<T, U, F>(&self, name: &str, callback: F) -> Result<U>
    where
        T: Clone + 'static,
        F: FnOnce(T) -> U,
    {
        self.get::<T>(name).map(callback)
    }

    /// Current value of a parameter rendered as in the help text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unregistered name.
    pub fn rendered_value(&self, name: &str) -> Result<String> {
        self.registry
            .lookup(name)
            .map(Descriptor::rendered_value)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.registry.len()
    }

    #[must_use]
    pub fn required_count(&self) -> usize {
        self.registry.required_count()
    }

    /// Whether `-name` or the literal `alternative` appears in the raw
    /// arguments. Does not run the parser.
    #[must_use]
    pub fn does_argument_exist(&self, name: &str, alternative: &str) -> bool {
        let command = format!("-{name}");

        self.arguments
            .iter()
            .any(|argument| *argument == command || argument == alternative)
    }

    #[must_use]
    pub fn does_help_exist(&self) -> bool {
        self.does_argument_exist(HELP_NAME, "--help")
    }

    #[must_use]
    pub fn usage(&self) -> String {
        usage::parser_usage(&self.general_help_text, &self.registry)
    }
}
