//! Command-line argument parsing core.
//!
//! This crate maps a process's raw argument vector to strongly-typed, named
//! values. Parameters are registered on a [`Parser`], which then tokenizes the
//! arguments and resolves every parameter in a fixed order: dominant
//! parameters first, then the required check, then everything else.
//!
//! # Key Features
//!
//! - **Typed Values**: integers, floats, strings, boolean flags, sequences and
//!   integers in a fixed numeric base
//! - **Required, Optional and Default Parameters**: the unnamed default parameter
//!   receives unflagged tokens
//! - **Dominant Parameters**: resolved before required parameters are enforced,
//!   which is how `-h`/`--help` works
//! - **Callbacks and Validators**: user logic computing or checking values
//! - **Definitions Files**: parameters described in YAML
//!
//! # Examples
//!
//! ```
//! use cmdparse_core::Parser;
//!
//! let mut parser = Parser::new(["prog", "-v", "--level", "3", "a.txt", "b.txt"]);
//! parser.register_optional("v", "verbose", false, "Print more");
//! parser.register_optional("l", "level", 1_u8, "Compression level");
//! parser.register_default(false, "Files to compress", Vec::<String>::new());
//!
//! assert!(parser.run_with(&mut Vec::new(), &mut Vec::new()));
//! assert!(parser.get::<bool>("v")?);
//! assert_eq!(parser.get::<u8>("l")?, 3);
//! assert_eq!(parser.get_default::<Vec<String>>()?.len(), 2);
//! # Ok::<(), cmdparse_core::error::Error>(())
//! ```

pub mod conversion;
pub mod definitions;
pub mod descriptor;
pub mod error;
pub mod file_handling;
mod parser;
pub mod registry;
mod resolver;
pub mod usage;

pub use conversion::{ArgumentValue, NumericBase};
pub use descriptor::{CallbackArgs, CallbackResult};
pub use parser::Parser;
