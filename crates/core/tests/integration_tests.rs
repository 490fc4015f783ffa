//! Integration tests for cmdparse-core
//!
//! These tests drive the public `Parser` API end-to-end: registration, a run
//! over a full argument vector, and inspection of the resolved values.

use cmdparse_core::error::Error;
use cmdparse_core::file_handling::get_parameter_definitions;
use cmdparse_core::{definitions, CallbackArgs, CallbackResult, NumericBase, Parser};
use std::cell::Cell;
use std::io::Write;
use std::rc::Rc;
use tempfile::NamedTempFile;

fn argv(arguments: &[&str]) -> Vec<String> {
    std::iter::once("prog")
        .chain(arguments.iter().copied())
        .map(ToString::to_string)
        .collect()
}

fn run(parser: &mut Parser) -> (bool, String, String) {
    let mut output = Vec::new();
    let mut error = Vec::new();
    let success = parser.run_with(&mut output, &mut error);
    (
        success,
        String::from_utf8(output).unwrap(),
        String::from_utf8(error).unwrap(),
    )
}

#[test]
fn test_default_parameter_receives_single_value() {
    for literal in ["0", "17", "-4"] {
        let mut parser = Parser::new(argv(&[literal]));
        parser.register_default(false, "", 0_i64);

        assert!(run(&mut parser).0);
        assert_eq!(
            parser.get_default::<i64>().unwrap(),
            literal.parse::<i64>().unwrap()
        );
    }

    let mut parser = Parser::new(argv(&["hello"]));
    parser.register_default(true, "", String::new());
    assert!(run(&mut parser).0);
    assert_eq!(parser.get_default::<String>().unwrap(), "hello");
}

#[test]
fn test_non_variadic_flag_takes_exactly_one_value() {
    let mut parser = Parser::new(argv(&["-f", "2.5"]));
    parser.register_optional("f", "factor", 1.0_f64, "");
    assert!(run(&mut parser).0);
    assert_eq!(parser.get::<f64>("f").unwrap(), 2.5);

    let mut parser = Parser::new(argv(&["-f", "2.5", "3.5"]));
    parser.register_optional("f", "factor", 1.0_f64, "");
    let (success, _, error) = run(&mut parser);
    assert!(!success);
    assert!(error.contains("Invalid parameter '3.5'"));
}

#[test]
fn test_variadic_flag_collects_all_values() {
    let mut parser = Parser::new(argv(&["-f", "1", "2", "3"]));
    parser.register_optional("f", "files", Vec::<u32>::new(), "");

    assert!(run(&mut parser).0);
    assert_eq!(parser.get::<Vec<u32>>("f").unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_boolean_flag_toggles_default() {
    let mut parser = Parser::new(argv(&["-f"]));
    parser.register_optional("f", "force", false, "");
    assert!(run(&mut parser).0);
    assert!(parser.get::<bool>("f").unwrap());

    let mut parser = Parser::new(argv(&[]));
    parser.register_optional("f", "force", false, "");
    assert!(run(&mut parser).0);
    assert!(!parser.get::<bool>("f").unwrap());

    let mut parser = Parser::new(argv(&["--color"]));
    parser.register_optional("c", "color", true, "");
    assert!(run(&mut parser).0);
    assert!(!parser.get::<bool>("c").unwrap());
}

#[test]
fn test_boolean_flag_rejects_value() {
    let mut parser = Parser::new(argv(&["-f", "yes"]));
    parser.register_optional("f", "force", false, "");
    parser.register_default(false, "", String::new());

    // `yes` is routed to the flag, which cannot take arguments.
    let (success, _, error) = run(&mut parser);
    assert!(!success);
    assert!(error.contains("cannot have any arguments"));
    assert!(error.contains("ERROR: The parameter 'f' has invalid arguments. Usage:"));
}

#[test]
fn test_required_but_absent_fails() {
    let mut parser = Parser::new(argv(&["positional"]));
    parser.register_required::<String>("f", "file", "Input file");
    parser.register_default(false, "", String::new());

    let (success, _, error) = run(&mut parser);
    assert!(!success);
    assert!(error.contains("The parameter 'f' is required."));
}

#[test]
fn test_dominant_callback_runs_despite_missing_required() {
    let ran = Rc::new(Cell::new(false));
    let flag = Rc::clone(&ran);

    let mut parser = Parser::new(argv(&["-d"]));
    parser.register_callback::<bool, _>(
        "d",
        "dump",
        move |args: &mut CallbackArgs<'_>| -> CallbackResult<bool> {
            flag.set(true);
            writeln!(args.output, "dumping")?;
            Ok(true)
        },
        "Dump state",
        true,
    );
    parser.register_required::<i32>("r", "required", "");

    let (success, output, error) = run(&mut parser);

    assert!(ran.get());
    assert_eq!(output, "dumping\n");
    assert!(!success);
    assert!(error.contains("The parameter 'r' is required."));
}

#[test]
fn test_dominant_failure_aborts_before_required_check() {
    let mut parser = Parser::new(argv(&["-d", "x"]));
    parser.register_callback::<i32, _>(
        "d",
        "",
        |_: &mut CallbackArgs<'_>| -> CallbackResult<i32> { Err("refused".into()) },
        "",
        true,
    );
    parser.register_required::<i32>("r", "", "");

    let (success, _, error) = run(&mut parser);

    assert!(!success);
    assert!(error.contains("Failed parsing function's arguments"));
    assert!(error.contains("refused"));
    assert!(error.contains("The parameter 'd' has invalid arguments."));
    assert!(!error.contains("is required"));
}

#[test]
fn test_non_dominant_callback_waits_for_required_check() {
    let ran = Rc::new(Cell::new(false));
    let flag = Rc::clone(&ran);

    let mut parser = Parser::new(argv(&["-c"]));
    parser.register_callback::<bool, _>(
        "c",
        "",
        move |_: &mut CallbackArgs<'_>| -> CallbackResult<bool> {
            flag.set(true);
            Ok(true)
        },
        "",
        false,
    );
    parser.register_required::<i32>("r", "", "");

    assert!(!run(&mut parser).0);
    assert!(!ran.get());
}

#[test]
fn test_numeric_base_parameter() {
    let mut parser = Parser::new(argv(&["-x", "1A"]));
    parser.register_optional("x", "hex", NumericBase::<i32, 16>::new(0), "");

    assert!(run(&mut parser).0);
    assert_eq!(parser.get::<i32>("x").unwrap(), 26);
}

#[test]
fn test_common_cli_shape() {
    let mut parser = Parser::new(argv(&["-n", "5", "positional1", "positional2"]));
    parser.register_optional("n", "count", 1_usize, "");
    parser.register_default(false, "", Vec::<String>::new());

    assert!(run(&mut parser).0);
    assert_eq!(parser.get::<usize>("n").unwrap(), 5);
    assert_eq!(
        parser.get_default::<Vec<String>>().unwrap(),
        vec!["positional1".to_string(), "positional2".to_string()]
    );
}

#[test]
fn test_validator_sees_converted_value() {
    let mut parser = Parser::new(argv(&["--ratio", "0.5"]));
    parser
        .register_required::<f64>("r", "ratio", "")
        .validator(|ratio, output, _| {
            let _ = write!(output, "checking {ratio}");
            (0.0..=1.0).contains(ratio)
        });

    let (success, output, _) = run(&mut parser);
    assert!(success);
    assert_eq!(output, "checking 0.5");
}

#[test]
fn test_help_output() {
    let mut parser = Parser::with_description(argv(&["--help"]), "A demo program");
    parser.register_optional("n", "number", 3_i32, "How many");
    parser.register_required::<String>("o", "output", "Where to write");

    let (success, output, _) = run(&mut parser);

    assert!(output.starts_with("A demo program\n\nAvailable parameters:\n\n"));
    assert!(output.contains("\t-h,\t--help\n"));
    assert!(output.contains("\t-n,\t--number\n\t\tDefault:\t'3'\n\t\t[optional] How many\n\n"));
    assert!(output.contains("\t-o,\t--output\n\t\t(required)Where to write\n\n"));
    // Help does not stop the run; the missing required parameter still fails it.
    assert!(!success);
}

#[test]
fn test_unhandled_parameters_keep_defaults() {
    let mut parser = Parser::new(argv(&["-a", "1"]));
    parser.register_optional("a", "", 0_i8, "");
    parser.register_optional("b", "", -3_i8, "");
    parser.register_optional("s", "", "fallback".to_string(), "");
    parser.register_optional("l", "", vec![1_u8, 2], "");

    assert!(run(&mut parser).0);
    assert_eq!(parser.get::<i8>("a").unwrap(), 1);
    assert_eq!(parser.get::<i8>("b").unwrap(), -3);
    assert_eq!(parser.get::<String>("s").unwrap(), "fallback");
    assert_eq!(parser.get::<Vec<u8>>("l").unwrap(), vec![1, 2]);
}

#[test]
fn test_definitions_file_workflow() {
    let yaml_content = r#"
description: "Resize images"
parameters:
  - name: "w"
    long: "width"
    type: "u32"
    required: true
    description: "Target width"
  - name: "q"
    long: "quality"
    type: "u8"
    default: "85"
    description: "JPEG quality"
  - name: "m"
    long: "mask"
    type: "hex"
    default: "0"
  - type: "list<string>"
    description: "Images to resize"
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{yaml_content}").unwrap();
    let temp_path = temp_file.path().to_str().unwrap().to_string();

    let defs = get_parameter_definitions(&temp_path).unwrap();
    assert_eq!(defs.description.as_deref(), Some("Resize images"));
    assert_eq!(defs.parameters.len(), 4);

    let mut parser = definitions::build_parser(
        &defs,
        argv(&["-w", "640", "--mask", "ff", "a.png", "b.png"]),
    )
    .unwrap();

    assert!(run(&mut parser).0);
    assert_eq!(parser.get::<u32>("w").unwrap(), 640);
    assert_eq!(parser.get::<u8>("q").unwrap(), 85);
    assert_eq!(parser.get::<i64>("m").unwrap(), 255);
    assert_eq!(
        parser.get_default::<Vec<String>>().unwrap(),
        vec!["a.png".to_string(), "b.png".to_string()]
    );
}

#[test]
fn test_definitions_file_with_invalid_yaml() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "parameters: [this is: not: valid").unwrap();
    let temp_path = temp_file.path().to_str().unwrap().to_string();

    let result = get_parameter_definitions(&temp_path);
    assert!(matches!(result, Err(Error::Yaml { .. })));
}
