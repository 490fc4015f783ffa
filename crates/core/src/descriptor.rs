//! Parameter descriptors.
//!
//! A [`Descriptor`] holds everything shared by every registered parameter: its
//! flags, requiredness, dominance and the raw arguments routed to it during
//! tokenization. The typed part lives behind a value slot, which is either a
//! plain value or a user callback.

use std::any::Any;
use std::io::Write;
use std::marker::PhantomData;

use log::debug;

use crate::conversion::{ArgumentValue, Arity};
use crate::error::{Error, Result};

/// Prefix marking a token as a flag.
pub const FLAG_MARKER: char = '-';

/// User hook run after a successful conversion. Receives the value and the
/// output and error streams; returning `false` rejects the value.
pub type Validator<T> = Box<dyn Fn(&T, &mut dyn Write, &mut dyn Write) -> bool>;

pub type CallbackResult<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub type Callback<T> = Box<dyn FnMut(&mut CallbackArgs<'_>) -> CallbackResult<T>>;

/// What a callback parameter sees when it is resolved.
pub struct CallbackArgs<'a> {
    pub arguments: &'a [String],
    pub output: &'a mut dyn Write,
    pub error: &'a mut dyn Write,
    /// Usage text of the whole parser.
    pub usage: &'a str,
}

pub(crate) struct ParseContext<'a> {
    pub arguments: &'a [String],
    pub required: bool,
    pub output: &'a mut dyn Write,
    pub error: &'a mut dyn Write,
    pub usage: &'a str,
}

pub(crate) trait Slot {
    fn arity(&self) -> Arity;
    fn print_value(&self) -> String;
    fn parse(&mut self, context: ParseContext<'_>) -> Result<()>;
    fn validate(&self, output: &mut dyn Write, error: &mut dyn Write) -> bool;
    fn value(&self) -> &dyn Any;
    fn inner_value(&self) -> Option<&dyn Any>;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

pub(crate) struct ValueSlot<T: ArgumentValue> {
    pub value: T,
    pub validator: Option<Validator<T>>,
}

impl<T: ArgumentValue> ValueSlot<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            validator: None,
        }
    }
}

impl<T: ArgumentValue> Slot for ValueSlot<T> {
    fn arity(&self) -> Arity {
        T::ARITY
    }

    fn print_value(&self) -> String {
        self.value.stringify()
    }

    fn parse(&mut self, context: ParseContext<'_>) -> Result<()> {
        // Optional parameters given no arguments keep their default, except
        // flags, whose presence is the argument.
        if !context.required && context.arguments.is_empty() && T::ARITY != Arity::Flag {
            return Ok(());
        }

        self.value = T::convert(context.arguments, &self.value)?;
        Ok(())
    }

    fn validate(&self, output: &mut dyn Write, error: &mut dyn Write) -> bool {
        match &self.validator {
            Some(validator) => validator(&self.value, output, error),
            None => true,
        }
    }

    fn value(&self) -> &dyn Any {
        &self.value
    }

    fn inner_value(&self) -> Option<&dyn Any> {
        self.value.inner()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub(crate) struct CallbackSlot<T: ArgumentValue> {
    pub callback: Callback<T>,
    pub value: T,
}

impl<T: ArgumentValue> Slot for CallbackSlot<T> {
    fn arity(&self) -> Arity {
        T::ARITY
    }

    fn print_value(&self) -> String {
        String::new()
    }

    fn parse(&mut self, context: ParseContext<'_>) -> Result<()> {
        let mut args = CallbackArgs {
            arguments: context.arguments,
            output: context.output,
            error: context.error,
            usage: context.usage,
        };

        self.value = (self.callback)(&mut args).map_err(|e| Error::Callback {
            parameter: String::new(),
            message: e.to_string(),
        })?;

        Ok(())
    }

    fn validate(&self, _output: &mut dyn Write, _error: &mut dyn Write) -> bool {
        true
    }

    fn value(&self) -> &dyn Any {
        &self.value
    }

    fn inner_value(&self) -> Option<&dyn Any> {
        self.value.inner()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// One registered parameter and its resolution state.
pub struct Descriptor {
    pub(crate) name: String,
    pub(crate) long_flag: String,
    pub(crate) command: String,
    pub(crate) alternative: String,
    pub(crate) description: String,
    pub(crate) required: bool,
    pub(crate) dominant: bool,
    pub(crate) variadic: bool,
    pub(crate) handled: bool,
    pub(crate) arguments: Vec<String>,
    pub(crate) slot: Box<dyn Slot>,
}

impl Descriptor {
    pub(crate) fn new(
        name: &str,
        long_flag: &str,
        description: &str,
        required: bool,
        slot: Box<dyn Slot>,
    ) -> Self {
        let command = if name.is_empty() {
            String::new()
        } else {
            format!("{FLAG_MARKER}{name}")
        };
        let alternative = if long_flag.is_empty() {
            String::new()
        } else {
            format!("{FLAG_MARKER}{FLAG_MARKER}{long_flag}")
        };

        Self {
            name: name.to_string(),
            long_flag: long_flag.to_string(),
            command,
            alternative,
            description: description.to_string(),
            required,
            dominant: false,
            variadic: slot.arity() == Arity::Variadic,
            handled: false,
            arguments: Vec::new(),
            slot,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn long_flag(&self) -> &str {
        &self.long_flag
    }

    /// The short flag as typed on the command line, e.g. `-n`.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The long flag as typed on the command line, e.g. `--number`.
    #[must_use]
    pub fn alternative(&self) -> &str {
        &self.alternative
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn is_dominant(&self) -> bool {
        self.dominant
    }

    #[must_use]
    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    #[must_use]
    pub fn is_handled(&self) -> bool {
        self.handled
    }

    /// Raw arguments routed to this parameter by tokenization.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// True for the unnamed parameter receiving unflagged tokens.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.command.is_empty() && self.alternative.is_empty()
    }

    /// Whether `given` is exactly this parameter's short or long flag.
    #[must_use]
    pub fn is(&self, given: &str) -> bool {
        !given.is_empty() && (given == self.command || given == self.alternative)
    }

    /// Current value rendered for help text.
    #[must_use]
    pub fn rendered_value(&self) -> String {
        self.slot.print_value()
    }

    /// Current value, if it is a `T`. Wrapper types such as
    /// [`NumericBase`](crate::conversion::NumericBase) also answer for their
    /// inner type.
    #[must_use]
    pub fn value<T: 'static>(&self) -> Option<&T> {
        self.slot.value().downcast_ref::<T>().or_else(|| {
            self.slot
                .inner_value()
                .and_then(|inner| inner.downcast_ref::<T>())
        })
    }

    pub(crate) fn label(&self) -> String {
        if self.is_default() {
            "'Default' command".to_string()
        } else {
            format!("Command '{}[{}]'", self.name, self.alternative)
        }
    }

    /// Computes the typed value from the collected arguments. Failures are
    /// described on `error` together with the offending arguments.
    pub(crate) fn parse(
        &mut self,
        output: &mut dyn Write,
        error: &mut dyn Write,
        usage: &str,
    ) -> Result<()> {
        debug!(
            "Parsing parameter `{}` from {:?}",
            self.display_name(),
            self.arguments
        );

        let context = ParseContext {
            arguments: &self.arguments,
            required: self.required,
            output: &mut *output,
            error: &mut *error,
            usage,
        };

        let outcome = match self.slot.parse(context) {
            Err(Error::Callback { message, .. }) => Err(Error::Callback {
                parameter: self.name.clone(),
                message,
            }),
            outcome => outcome,
        };

        if let Err(e) = &outcome {
            self.describe_parse_failure(e, error);
        }

        outcome
    }

    pub(crate) fn validate(&self, output: &mut dyn Write, error: &mut dyn Write) -> Result<()> {
        if self.slot.validate(output, error) {
            Ok(())
        } else {
            Err(Error::Validation(self.name.clone()))
        }
    }

    fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "default"
        } else {
            &self.name
        }
    }

    fn describe_parse_failure(&self, failure: &Error, error: &mut dyn Write) {
        let _ = match failure {
            Error::Callback { .. } => writeln!(error, "ERROR: Failed parsing function's arguments: "),
            _ => write!(
                error,
                "ERROR: Parsing '{}' command arguments: ",
                self.display_name()
            ),
        };

        if self.arguments.is_empty() {
            let _ = writeln!(error, "no arguments provided");
        } else {
            for argument in &self.arguments {
                let _ = writeln!(error, "{argument}, ");
            }
        }

        let _ = match failure {
            Error::Callback { message, .. } => writeln!(error, "{message}"),
            other => writeln!(error, "{other}"),
        };
    }
}

/// Handle returned by registration, used to attach a validator or mark the
/// parameter dominant before the parser runs.
pub struct Registration<'a, T: ArgumentValue> {
    descriptor: &'a mut Descriptor,
    _value: PhantomData<T>,
}

impl<'a, T: ArgumentValue> Registration<'a, T> {
    pub(crate) fn new(descriptor: &'a mut Descriptor) -> Self {
        Self {
            descriptor,
            _value: PhantomData,
        }
    }

    /// Attaches a validator, replacing any previous one.
    pub fn validator<F>(self, validator: F) -> Self
    where
        F: Fn(&T, &mut dyn Write, &mut dyn Write) -> bool + 'static,
    {
        if let Some(slot) = self
            .descriptor
            .slot
            .as_any_mut()
            .downcast_mut::<ValueSlot<T>>()
        {
            slot.validator = Some(Box::new(validator));
        }

        self
    }

    /// Resolves this parameter before required parameters are checked.
    pub fn dominant(self) -> Self {
        self.descriptor.dominant = true;
        self
    }

    #[must_use]
    pub fn descriptor(&self) -> &Descriptor {
        self.descriptor
    }
}
