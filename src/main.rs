use std::io;
use std::process::ExitCode;

use passgen::cli::{self, Invocation, Mode};
use passgen::{app, console, logger};
use tracing::{debug, error, info};

fn main() -> ExitCode {
    let args = match cli::parse_args(std::env::args_os()) {
        Invocation::Run(args) => args,
        Invocation::Usage(text) => {
            println!("{text}");
            return ExitCode::SUCCESS;
        }
        Invocation::Exit(e) => e.exit(),
    };

    logger::init_cli_logger(args.verbose);
    debug!(?args, "parsed arguments");

    let open_gui = match args.mode() {
        Mode::Gui => true,
        Mode::Console => false,
        Mode::Ask => match cli::ask_open_gui(&mut io::stdin().lock(), &mut io::stdout()) {
            Ok(answer) => answer,
            Err(e) => {
                error!(error = %e, "could not read mode choice");
                eprintln!("Could not read from the terminal: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    if open_gui {
        info!("starting form");
        if let Err(e) = app::run_gui() {
            error!(error = %e, "form failed to start");
            eprintln!("The GUI is not available on this system: {e}");
            return ExitCode::FAILURE;
        }
    } else {
        info!("starting console session");
        match console::run_console() {
            Ok(outcome) => debug!(?outcome, "console session finished"),
            Err(e) => {
                error!(error = %e, "console session failed");
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
