//! Random password generation from a configurable character set, driven
//! either by console prompts or by an egui form.

pub mod app;
pub mod cli;
pub mod clipboard;
pub mod console;
pub mod error;
pub mod logger;
pub mod options;
pub mod password;

pub use clipboard::{Clipboard, ClipboardWriter, copy_to_clipboard};
pub use error::{ClipboardError, ConsoleError, ParseError, PasswordError};
pub use options::{GenerationOptions, Preset};
pub use password::{build_charset, generate_password};
