//! Line-by-line prompt flow on stdin/stdout.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};
use zeroize::Zeroize;

use crate::clipboard::Clipboard;
use crate::error::{ConsoleError, ParseError};
use crate::options::{
    DEFAULT_COUNT, DEFAULT_LENGTH, GenerationOptions, MAX_CONSOLE_COUNT, MAX_CONSOLE_LENGTH,
};
use crate::password::generate_password;

/// How a console session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleOutcome {
    /// Every category was declined, nothing generated.
    NoCharset,
    Generated { count: usize, copied: bool },
}

/// Parses an integer in `1..=max`, ignoring surrounding whitespace.
pub fn parse_positive(input: &str, max: usize) -> Result<usize, ParseError> {
    let trimmed = input.trim();
    let n: usize = trimmed
        .parse()
        .map_err(|_| ParseError::NotANumber(trimmed.to_string()))?;
    if n == 0 {
        return Err(ParseError::NotPositive);
    }
    if n > max {
        return Err(ParseError::TooLarge(max));
    }
    Ok(n)
}

/// Empty means `default`; `y`/`yes` in any case mean yes; anything else no.
pub fn parse_yes_no(input: &str, default: bool) -> bool {
    let answer = input.trim().to_lowercase();
    if answer.is_empty() {
        return default;
    }
    matches!(answer.as_str(), "y" | "yes")
}

/// Writes `text`, flushes, and reads one line. End of input reads as "".
pub(crate) fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    text: &str,
) -> io::Result<String> {
    write!(out, "{text}")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn ask_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
    default: bool,
) -> io::Result<bool> {
    let hint = if default { "Y/n" } else { "y/N" };
    let answer = prompt(input, out, &format!("{label} [{hint}]: "))?;
    Ok(parse_yes_no(&answer, default))
}

/// Runs the console flow against real stdin/stdout and the system clipboard.
pub fn run_console() -> Result<ConsoleOutcome, ConsoleError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(&mut stdin.lock(), &mut stdout.lock(), &mut Clipboard::system())
}

/// The console flow over arbitrary input/output.
pub fn run_with<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    clipboard: &mut Clipboard,
) -> Result<ConsoleOutcome, ConsoleError> {
    writeln!(out, "\nSecure Password Generator (console)\n{}", "-".repeat(36))?;

    let answer = prompt(input, out, "Password length (e.g. 16): ")?;
    let length = if answer.is_empty() {
        DEFAULT_LENGTH
    } else {
        match parse_positive(&answer, MAX_CONSOLE_LENGTH) {
            Ok(n) => n,
            Err(e) => {
                debug!(error = %e, "bad length entry");
                writeln!(out, "Invalid length, using {DEFAULT_LENGTH}.")?;
                DEFAULT_LENGTH
            }
        }
    };

    let options = GenerationOptions {
        length,
        include_lower: ask_yes_no(input, out, "Include lowercase letters", true)?,
        include_upper: ask_yes_no(input, out, "Include UPPERCASE letters", true)?,
        include_digits: ask_yes_no(input, out, "Include digits (0-9)", true)?,
        include_symbols: ask_yes_no(input, out, "Include symbols (e.g. !@#...)", true)?,
        avoid_ambiguous: ask_yes_no(input, out, "Exclude ambiguous characters (O,0,l,1 etc.)", true)?,
    };
    debug!(?options, "console options collected");

    let charset = options.charset();
    if charset.is_empty() {
        writeln!(out, "No characters selected. Exiting.")?;
        info!("console session ended without a charset");
        return Ok(ConsoleOutcome::NoCharset);
    }
    debug!(charset_len = charset.chars().count(), "charset built");

    let answer = prompt(input, out, "How many passwords to generate? (1): ")?;
    let count = parse_positive(&answer, MAX_CONSOLE_COUNT).unwrap_or(DEFAULT_COUNT);

    writeln!(out, "\nGenerated password(s):")?;
    let mut last = String::new();
    for i in 1..=count {
        let pwd = generate_password(options.length, &charset)?;
        writeln!(out, "{i}. {pwd}")?;
        last.zeroize();
        last = pwd;
    }

    // Only the final password of the batch goes to the clipboard.
    let copied = clipboard.copy(&last);
    last.zeroize();

    if copied {
        writeln!(out, "\n(last generated password copied to clipboard)")?;
    } else {
        writeln!(
            out,
            "\nCould not copy to clipboard automatically. Copy the password above manually."
        )?;
    }
    out.flush()?;

    Ok(ConsoleOutcome::Generated { count, copied })
}
