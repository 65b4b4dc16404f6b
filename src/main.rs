//! `envc` CLI entrypoint.
//!
//! Parses arguments, installs the log backend, and dispatches to the `list`
//! and `cmp` command handlers. Errors are reported on stderr as
//! `error: <message>` with exit code 1.

use clap::Parser;
use std::io::Write;

use envc::cli::{Cli, Command};
use envc::commands::{OutputSettings, run_compare, run_list};
use envc::error::Result;
use envc::logging::init_logging;
use envc::palette::Palette;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.global);

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stdout);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write) -> Result<()> {
    let settings = output_settings(cli);

    match &cli.command {
        Command::List(args) => run_list(args, &settings, stdout),
        Command::Compare(args) => run_compare(args, &settings, stdout),
    }
}

fn output_settings(cli: &Cli) -> OutputSettings {
    OutputSettings {
        palette: Palette::new(cli.color_choice()),
        quiet: cli.global.quiet,
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            log::debug!("command failed: {err:?}");
            write_stderr_line(stderr, format!("error: {err}"));
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Nowhere left to report the failure.
    }
}
