//! cmdparse CLI Library
//!
//! Front end for `cmdparse-core`: the `cmdparse` binary loads a YAML file of
//! parameter definitions, builds a parser from it, runs the parser over the
//! trailing arguments and prints the resolved values.
//!
//! # Examples
//!
//! ```bash
//! # Print every resolved value as `key = value`
//! cmdparse -c resize.yml -- -w 640 a.png b.png
//!
//! # Render the values through a template
//! cmdparse -c resize.yml -t "{width}px: {default}" -- -w 640 a.png
//!
//! # Show the help text generated from the definitions
//! cmdparse -c resize.yml -- --help
//! ```

pub mod cli_args;
pub mod config;
pub mod error;
pub mod output;
