use std::iter;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

use cmdparse_cli::cli_args::Args;
use cmdparse_cli::error::Result;
use cmdparse_cli::{config, output};
use cmdparse_core::{definitions, file_handling};

const PROGRAM_NAME: &str = "cmdparse";

fn execute() -> Result<()> {
    let args = Args::parse();

    let config_path = config::get_config_path(&args.config_path);
    debug!("Config path: `{config_path}`");

    let parameter_definitions = file_handling::get_parameter_definitions(&config_path)?;

    let argv = iter::once(PROGRAM_NAME.to_string()).chain(args.arguments);
    let mut parser = definitions::build_parser(&parameter_definitions, argv)?;

    parser.run_and_exit_if_error();

    if parser.does_help_exist() {
        info!("Help requested, skipping value output");
        return Ok(());
    }

    let rendered = output::render_output(
        &parser,
        &parameter_definitions,
        args.template.as_deref(),
    )?;
    println!("{rendered}");

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
