use thiserror::Error;

use crate::conversion::ConversionError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid parameter '{}'", .0)]
    UnrecognizedParameter(String),

    #[error("{} can have only one parameter. Given parameter '{}' is invalid in this context!", .parameter, .given)]
    TooManyArguments { parameter: String, given: String },

    #[error("The parameter '{}' is required.", .0)]
    MissingRequiredParameter(String),

    #[error("The parameter '{}' has invalid arguments.", .name)]
    InvalidArguments {
        name: String,
        #[source]
        source: Box<Error>,
    },

    #[error("{}", .0)]
    Conversion(#[from] ConversionError),

    #[error("The value of parameter '{}' was rejected by its validator.", .0)]
    Validation(String),

    #[error("Callback for parameter '{}' failed: {}", .parameter, .message)]
    Callback { parameter: String, message: String },

    #[error("The parameter {} could not be found.", .0)]
    NotFound(String),

    #[error("Invalid usage of the parameter {} detected: its value is not a `{}`.", .name, .expected)]
    TypeMismatch { name: String, expected: &'static str },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("Found a non-unique flag in parameter definitions: `{}`", .0)]
    NonUniqueFlag(String),

    #[error("Parameter `--{}` needs a short name; only the default parameter may omit it", .0)]
    MissingName(String),

    #[error("Found more than one default parameter: {} and {}", .0, .1)]
    MultipleDefaults(String, String),

    #[error("Unknown value type `{}` for parameter {}", .value_type, .parameter)]
    UnknownValueType { parameter: String, value_type: String },

    #[error("Invalid default for parameter {}: {}", .parameter, .source)]
    InvalidDefault {
        parameter: String,
        source: ConversionError,
    },
}

impl Error {
    pub fn invalid_arguments(name: String, source: Error) -> Self {
        Self::InvalidArguments {
            name,
            source: Box::new(source),
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    /// Name of the parameter whose usage block should accompany this error.
    #[must_use]
    pub fn parameter_name(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredParameter(name) | Self::InvalidArguments { name, .. } => {
                Some(name)
            }
            _ => None,
        }
    }
}
