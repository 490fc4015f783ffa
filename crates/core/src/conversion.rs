//! Conversion of raw argument strings into typed values.
//!
//! Every type a parameter can hold implements [`ArgumentValue`]. The trait fixes
//! how many raw strings the type consumes ([`Arity`]), how those strings become a
//! value, and how a value is rendered back for help text. Element types of
//! sequences additionally implement [`Scalar`].

use std::any::Any;
use std::fmt::Display;
use std::num::ParseIntError;
use std::ops::Deref;

use itertools::Itertools;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Expected exactly {} argument(s), found {}.", .expected, .found)]
    ArityMismatch { expected: usize, found: usize },

    #[error("A boolean command line parameter cannot have any arguments, found {}.", .0)]
    FlagArguments(usize),

    #[error("Cannot convert `{}` to {}: {}", .literal, .target, .reason)]
    InvalidLiteral {
        literal: String,
        target: &'static str,
        reason: String,
    },

    #[error("Unsupported numeric base {}: must be 0 or between 2 and 36.", .0)]
    UnsupportedBase(u32),
}

/// How many raw strings a value type consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly zero; presence of the flag toggles the default.
    Flag,
    /// Exactly one.
    Single,
    /// Zero or more, each converted independently.
    Variadic,
}

/// A type that can be stored in a parameter.
pub trait ArgumentValue: Clone + Default + 'static {
    const ARITY: Arity;

    /// Converts the collected raw strings. `current` is the value held before
    /// conversion, which flag types negate.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of strings does not match [`Self::ARITY`]
    /// or a string is not a valid literal for the type.
    fn convert(arguments: &[String], current: &Self) -> Result<Self, ConversionError>;

    /// Converts a literal written outside of an argument vector, such as a
    /// default value in a definitions file.
    ///
    /// # Errors
    ///
    /// Returns an error if the literal is invalid for the type.
    fn from_literal(literal: &str) -> Result<Self, ConversionError>;

    fn stringify(&self) -> String;

    /// The wrapped value, for wrapper types that should also be readable as
    /// their inner type.
    fn inner(&self) -> Option<&dyn Any> {
        None
    }
}

/// A single-valued type that can also be an element of a sequence.
pub trait Scalar: ArgumentValue {
    /// # Errors
    ///
    /// Returns an error if `raw` is not a valid literal for the type.
    fn parse_scalar(raw: &str) -> Result<Self, ConversionError>;
}

/// Integer types understood by [`parse_integer`].
pub trait Integer: Copy + Display + Default + 'static {
    const NAME: &'static str;

    /// # Errors
    ///
    /// Returns the standard library error when `digits` is not valid in `radix`.
    fn from_str_radix(digits: &str, radix: u32) -> Result<Self, ParseIntError>;
}

/// An integer parsed in a fixed numeric base.
///
/// `BASE` 0 auto-detects from the literal's prefix: `0x` for hexadecimal, a
/// leading `0` for octal, decimal otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NumericBase<T, const BASE: u32 = 0> {
    pub value: T,
}

impl<T, const BASE: u32> NumericBase<T, BASE> {
    pub const fn new(value: T) -> Self {
        Self { value }
    }

    #[must_use]
    pub const fn base(&self) -> u32 {
        BASE
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, const BASE: u32> From<T> for NumericBase<T, BASE> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T, const BASE: u32> Deref for NumericBase<T, BASE> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

fn single(arguments: &[String]) -> Result<&str, ConversionError> {
    match arguments {
        [only] => Ok(only.as_str()),
        _ => Err(ConversionError::ArityMismatch {
            expected: 1,
            found: arguments.len(),
        }),
    }
}

fn split_radix(literal: &str, base: u32) -> (u32, &str) {
    let hex = literal
        .strip_prefix("0x")
        .or_else(|| literal.strip_prefix("0X"));

    match base {
        0 => {
            if let Some(digits) = hex {
                (16, digits)
            } else if literal.len() > 1 && literal.starts_with('0') {
                (8, &literal[1..])
            } else {
                (10, literal)
            }
        }
        16 => (16, hex.unwrap_or(literal)),
        2 => (
            2,
            literal
                .strip_prefix("0b")
                .or_else(|| literal.strip_prefix("0B"))
                .unwrap_or(literal),
        ),
        _ => (base, literal),
    }
}

/// Parses an integer literal in `base`, where 0 means auto-detect.
///
/// # Errors
///
/// Returns an error for an unsupported base, an empty literal, or digits that
/// are invalid or out of range for `T`.
pub fn parse_integer<T: Integer>(raw: &str, base: u32) -> Result<T, ConversionError> {
    if base == 1 || base > 36 {
        return Err(ConversionError::UnsupportedBase(base));
    }

    let invalid = |reason: String| ConversionError::InvalidLiteral {
        literal: raw.to_string(),
        target: T::NAME,
        reason,
    };

    let (sign, unsigned) = match raw.as_bytes().first() {
        Some(b'-') => ("-", &raw[1..]),
        Some(b'+') => ("", &raw[1..]),
        _ => ("", raw),
    };

    let (radix, digits) = split_radix(unsigned, base);

    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(invalid("no digits".to_string()));
    }

    T::from_str_radix(&format!("{sign}{digits}"), radix).map_err(|e| invalid(e.to_string()))
}

macro_rules! integer_values {
    ($($ty:ty),*) => {$(
        impl Integer for $ty {
            const NAME: &'static str = stringify!($ty);

            fn from_str_radix(digits: &str, radix: u32) -> Result<Self, ParseIntError> {
                <$ty>::from_str_radix(digits, radix)
            }
        }

        impl ArgumentValue for $ty {
            const ARITY: Arity = Arity::Single;

            fn convert(arguments: &[String], _current: &Self) -> Result<Self, ConversionError> {
                Self::parse_scalar(single(arguments)?)
            }

            fn from_literal(literal: &str) -> Result<Self, ConversionError> {
                Self::parse_scalar(literal)
            }

            fn stringify(&self) -> String {
                self.to_string()
            }
        }

        impl Scalar for $ty {
            fn parse_scalar(raw: &str) -> Result<Self, ConversionError> {
                parse_integer(raw, 0)
            }
        }
    )*};
}

integer_values!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! float_values {
    ($($ty:ty),*) => {$(
        impl ArgumentValue for $ty {
            const ARITY: Arity = Arity::Single;

            fn convert(arguments: &[String], _current: &Self) -> Result<Self, ConversionError> {
                Self::parse_scalar(single(arguments)?)
            }

            fn from_literal(literal: &str) -> Result<Self, ConversionError> {
                Self::parse_scalar(literal)
            }

            fn stringify(&self) -> String {
                self.to_string()
            }
        }

        impl Scalar for $ty {
            fn parse_scalar(raw: &str) -> Result<Self, ConversionError> {
                raw.parse::<$ty>().map_err(|e| ConversionError::InvalidLiteral {
                    literal: raw.to_string(),
                    target: stringify!($ty),
                    reason: e.to_string(),
                })
            }
        }
    )*};
}

float_values!(f32, f64);

impl ArgumentValue for String {
    const ARITY: Arity = Arity::Single;

    fn convert(arguments: &[String], _current: &Self) -> Result<Self, ConversionError> {
        single(arguments).map(ToString::to_string)
    }

    fn from_literal(literal: &str) -> Result<Self, ConversionError> {
        Ok(literal.to_string())
    }

    fn stringify(&self) -> String {
        self.clone()
    }
}

impl Scalar for String {
    fn parse_scalar(raw: &str) -> Result<Self, ConversionError> {
        Ok(raw.to_string())
    }
}

impl ArgumentValue for bool {
    const ARITY: Arity = Arity::Flag;

    fn convert(arguments: &[String], current: &Self) -> Result<Self, ConversionError> {
        if arguments.is_empty() {
            Ok(!*current)
        } else {
            Err(ConversionError::FlagArguments(arguments.len()))
        }
    }

    fn from_literal(literal: &str) -> Result<Self, ConversionError> {
        literal
            .parse::<bool>()
            .map_err(|e| ConversionError::InvalidLiteral {
                literal: literal.to_string(),
                target: "bool",
                reason: e.to_string(),
            })
    }

    fn stringify(&self) -> String {
        self.to_string()
    }
}

impl<T: Scalar> ArgumentValue for Vec<T> {
    const ARITY: Arity = Arity::Variadic;

    fn convert(arguments: &[String], _current: &Self) -> Result<Self, ConversionError> {
        arguments.iter().map(|raw| T::parse_scalar(raw)).collect()
    }

    /// Elements are separated by whitespace.
    fn from_literal(literal: &str) -> Result<Self, ConversionError> {
        literal.split_whitespace().map(T::parse_scalar).collect()
    }

    fn stringify(&self) -> String {
        if self.is_empty() {
            return "[ ]".to_string();
        }

        format!("[ {} ]", self.iter().map(ArgumentValue::stringify).join(" "))
    }
}

impl<T: Integer, const BASE: u32> ArgumentValue for NumericBase<T, BASE> {
    const ARITY: Arity = Arity::Single;

    fn convert(arguments: &[String], _current: &Self) -> Result<Self, ConversionError> {
        Self::parse_scalar(single(arguments)?)
    }

    fn from_literal(literal: &str) -> Result<Self, ConversionError> {
        Self::parse_scalar(literal)
    }

    fn stringify(&self) -> String {
        self.value.to_string()
    }

    fn inner(&self) -> Option<&dyn Any> {
        Some(&self.value)
    }
}

impl<T: Integer, const BASE: u32> Scalar for NumericBase<T, BASE> {
    fn parse_scalar(raw: &str) -> Result<Self, ConversionError> {
        parse_integer(raw, BASE).map(Self::new)
    }
}
