use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::conversion::{ArgumentValue, NumericBase, Scalar};
use crate::error::{Error, Result};
use crate::parser::Parser;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ParameterDefinitions {
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ParameterDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub long: String,
    #[serde(rename = "type", default = "default_value_type")]
    pub value_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub dominant: bool,
    pub default: Option<String>,
    #[serde(default)]
    pub description: String,
}

fn default_value_type() -> String {
    "string".to_string()
}

impl ParameterDefinition {
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.name.is_empty() && self.long.is_empty()
    }

    /// Key under which the resolved value is reported: the long flag, else the
    /// short name, else `default`.
    #[must_use]
    pub fn key(&self) -> &str {
        if !self.long.is_empty() {
            &self.long
        } else if !self.name.is_empty() {
            &self.name
        } else {
            "default"
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::UnknownValueType`] if `type` is not a known type name.
    pub fn parsed_type(&self) -> Result<ValueType> {
        self.value_type
            .parse::<ValueType>()
            .map_err(|()| Error::UnknownValueType {
                parameter: self.to_string(),
                value_type: self.value_type.clone(),
            })
    }
}

impl Display for ParameterDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.name.is_empty(), self.long.is_empty()) {
            (true, true) => formatter.write_str("`default`"),
            (false, true) => write!(formatter, "`-{}`", self.name),
            (true, false) => write!(formatter, "`--{}`", self.long),
            (false, false) => write!(formatter, "`-{}/--{}`", self.name, self.long),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    String,
    Hex,
    Oct,
    Bin,
}

impl FromStr for ScalarType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        Ok(match s.trim() {
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" | "int" => Self::I32,
            "i64" | "long" => Self::I64,
            "isize" => Self::Isize,
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "usize" => Self::Usize,
            "f32" | "float" => Self::F32,
            "f64" | "double" => Self::F64,
            "string" | "str" => Self::String,
            "hex" => Self::Hex,
            "oct" => Self::Oct,
            "bin" => Self::Bin,
            _ => return Err(()),
        })
    }
}

/// Type of a parameter in a definitions file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Bool,
    Scalar(ScalarType),
    List(ScalarType),
}

impl FromStr for ValueType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        let s = s.trim();

        if s == "bool" || s == "flag" {
            return Ok(Self::Bool);
        }

        match s
            .strip_prefix("list<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            Some(element) => element.parse().map(Self::List),
            None => s.parse().map(Self::Scalar),
        }
    }
}

fn register_typed<T: ArgumentValue>(
    parser: &mut Parser,
    definition: &ParameterDefinition,
) -> Result<()> {
    let default = definition
        .default
        .as_deref()
        .map(T::from_literal)
        .transpose()
        .map_err(|source| Error::InvalidDefault {
            parameter: definition.to_string(),
            source,
        })?
        .unwrap_or_default();

    let registration = if definition.is_default() {
        parser.register_default(definition.required, &definition.description, default)
    } else if definition.required {
        parser.register_required::<T>(&definition.name, &definition.long, &definition.description)
    } else {
        parser.register_optional(
            &definition.name,
            &definition.long,
            default,
            &definition.description,
        )
    };

    if definition.dominant {
        registration.dominant();
    }

    Ok(())
}

fn register_scalar<T: Scalar>(
    parser: &mut Parser,
    definition: &ParameterDefinition,
    list: bool,
) -> Result<()> {
    if list {
        register_typed::<Vec<T>>(parser, definition)
    } else {
        register_typed::<T>(parser, definition)
    }
}

/// Registers one definition on `parser` with the type it names.
///
/// # Errors
///
/// Returns an error for an unknown type name or a default that does not
/// convert to that type.
pub fn register(parser: &mut Parser, definition: &ParameterDefinition) -> Result<()> {
    let (scalar, list) = match definition.parsed_type()? {
        ValueType::Bool => return register_typed::<bool>(parser, definition),
        ValueType::Scalar(scalar) => (scalar, false),
        ValueType::List(scalar) => (scalar, true),
    };

    match scalar {
        ScalarType::I8 => register_scalar::<i8>(parser, definition, list),
        ScalarType::I16 => register_scalar::<i16>(parser, definition, list),
        ScalarType::I32 => register_scalar::<i32>(parser, definition, list),
        ScalarType::I64 => register_scalar::<i64>(parser, definition, list),
        ScalarType::Isize => register_scalar::<isize>(parser, definition, list),
        ScalarType::U8 => register_scalar::<u8>(parser, definition, list),
        ScalarType::U16 => register_scalar::<u16>(parser, definition, list),
        ScalarType::U32 => register_scalar::<u32>(parser, definition, list),
        ScalarType::U64 => register_scalar::<u64>(parser, definition, list),
        ScalarType::Usize => register_scalar::<usize>(parser, definition, list),
        ScalarType::F32 => register_scalar::<f32>(parser, definition, list),
        ScalarType::F64 => register_scalar::<f64>(parser, definition, list),
        ScalarType::String => register_scalar::<String>(parser, definition, list),
        ScalarType::Hex => register_scalar::<NumericBase<i64, 16>>(parser, definition, list),
        ScalarType::Oct => register_scalar::<NumericBase<i64, 8>>(parser, definition, list),
        ScalarType::Bin => register_scalar::<NumericBase<i64, 2>>(parser, definition, list),
    }
}

/// Builds a parser over `argv` (program name first) from parsed definitions.
///
/// # Errors
///
/// Returns the first registration error.
pub fn build_parser<I, S>(definitions: &ParameterDefinitions, argv: I) -> Result<Parser>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut parser = Parser::new(argv);

    if let Some(description) = &definitions.description {
        parser.set_general_help_text(description.as_str());
    }

    for definition in &definitions.parameters {
        register(&mut parser, definition)?;
    }

    Ok(parser)
}
