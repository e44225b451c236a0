use std::ffi::OsString;
use std::io::{self, BufRead, Write};

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use crate::console::{parse_yes_no, prompt};

/// Random password generator with a console prompt flow and a desktop form.
///
/// Without arguments you are asked whether to open the form; answering no
/// runs the console prompts instead.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "passgen", version)]
pub struct Cli {
    /// Open the form directly
    #[arg(short, long, conflicts_with = "console")]
    pub gui: bool,

    /// Run the console prompts directly
    #[arg(short, long)]
    pub console: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Gui,
    Console,
    /// Nothing forced: ask the user.
    Ask,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.gui {
            Mode::Gui
        } else if self.console {
            Mode::Console
        } else {
            Mode::Ask
        }
    }
}

/// What `main` should do with the command line.
#[derive(Debug)]
pub enum Invocation {
    Run(Cli),
    /// Unrecognised arguments: print this and exit successfully.
    Usage(String),
    /// `--help` / `--version`, which clap prints itself.
    Exit(clap::Error),
}

pub fn parse_args<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    match Cli::try_parse_from(&args) {
        Ok(cli) => Invocation::Run(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Invocation::Exit(e)
        }
        // The GUI flag forces the form even next to arguments clap rejects.
        Err(_) if has_flag(&args, "-g", "--gui") => Invocation::Run(Cli {
            gui: true,
            console: false,
            verbose: has_flag(&args, "-v", "--verbose"),
        }),
        Err(_) => Invocation::Usage(Cli::command().render_long_help().to_string()),
    }
}

fn has_flag(args: &[OsString], short: &str, long: &str) -> bool {
    args.iter().skip(1).any(|a| a == short || a == long)
}

/// Asks whether to open the form. Empty, `y` and `yes` mean yes.
pub fn ask_open_gui<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<bool> {
    writeln!(out, "Password Generator")?;
    let answer = prompt(input, out, "Open GUI? (Y/n): ")?;
    Ok(parse_yes_no(&answer, true))
}
