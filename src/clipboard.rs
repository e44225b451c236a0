//! Best-effort clipboard writes.
//!
//! A [`Clipboard`] walks an ordered list of [`ClipboardWriter`] strategies and
//! stops at the first one that succeeds. Failures are logged, never returned:
//! the caller only learns whether the text landed.

use std::cell::Cell;
use std::rc::Rc;

use copypasta::{ClipboardContext, ClipboardProvider};
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::error::ClipboardError;

/// X11 and Wayland serve the selection from the process that set it, so it
/// disappears on exit unless a clipboard manager happened to take it over.
pub const SELECTION_OWNED_BY_PROCESS: bool =
    !cfg!(any(target_os = "windows", target_os = "macos"));

/// Fails a write made by a process about to exit when the platform ties the
/// selection to that process.
fn confirm_outlives_process(owned_by_process: bool) -> Result<(), ClipboardError> {
    if owned_by_process {
        Err(ClipboardError::Unconfirmed)
    } else {
        Ok(())
    }
}

/// One way of putting text on the system clipboard.
pub trait ClipboardWriter {
    fn name(&self) -> &'static str;
    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Native clipboard binding through `copypasta`.
///
/// The context is opened on first use and kept, since some backends drop the
/// selection as soon as their owner goes away.
#[derive(Default)]
pub struct PrimaryBinding {
    ctx: Option<ClipboardContext>,
    // Set when the caller exits right after copying.
    detached: bool,
}

impl PrimaryBinding {
    /// For a long-running caller, e.g. the form.
    pub fn new() -> Self {
        Self::default()
    }

    /// For a caller that exits right after copying, e.g. the console.
    pub fn detached() -> Self {
        Self {
            ctx: None,
            detached: true,
        }
    }
}

impl ClipboardWriter for PrimaryBinding {
    fn name(&self) -> &'static str {
        "copypasta"
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.ctx.is_none() {
            let ctx =
                ClipboardContext::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.ctx = Some(ctx);
        }
        let Some(ctx) = self.ctx.as_mut() else {
            return Err(ClipboardError::Unavailable("no clipboard context".into()));
        };

        ctx.set_contents(text.to_owned())
            .map_err(|e| ClipboardError::Rejected(e.to_string()))?;

        // Read back so the write is known to have landed. A backend that can't
        // read its own selection is not treated as a failure.
        if let Ok(mut stored) = ctx.get_contents() {
            let matches = stored == text;
            stored.zeroize();
            if !matches {
                return Err(ClipboardError::Rejected("read-back mismatch".into()));
            }
        }

        if self.detached {
            confirm_outlives_process(SELECTION_OWNED_BY_PROCESS)?;
        }
        Ok(())
    }
}

/// Clipboard access through the GUI toolkit.
pub enum ToolkitFallback {
    /// No form is running: open an invisible window just long enough to stage
    /// the write, then tear it down.
    Hidden,
    /// A form is running: use its context.
    Attached(egui::Context),
}

impl ClipboardWriter for ToolkitFallback {
    fn name(&self) -> &'static str {
        match self {
            ToolkitFallback::Hidden => "egui (hidden window)",
            ToolkitFallback::Attached(_) => "egui",
        }
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        match self {
            ToolkitFallback::Attached(ctx) => {
                ctx.copy_text(text.to_owned());
                Ok(())
            }
            ToolkitFallback::Hidden => stage_in_hidden_window(text),
        }
    }
}

fn stage_in_hidden_window(text: &str) -> Result<(), ClipboardError> {
    // The window's selection would die with it; don't bother opening one.
    confirm_outlives_process(SELECTION_OWNED_BY_PROCESS)?;

    let confirmed = Rc::new(Cell::new(false));
    let stager = ClipboardStager {
        text: text.to_owned(),
        frames: 0,
        confirmed: Rc::clone(&confirmed),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_visible(false)
            .with_decorations(false)
            .with_taskbar(false)
            .with_inner_size([1.0, 1.0]),
        ..Default::default()
    };

    eframe::run_native(
        "passgen-clipboard",
        options,
        Box::new(move |_cc| Ok(Box::new(stager))),
    )
    .map_err(|e| ClipboardError::Toolkit(e.to_string()))?;

    if confirmed.get() {
        Ok(())
    } else {
        Err(ClipboardError::Toolkit(
            "window closed before the write was flushed".into(),
        ))
    }
}

/// Copies on the first frame; closes on the second, once egui has handed the
/// first frame's platform output (which carries the copy) to the OS.
struct ClipboardStager {
    text: String,
    frames: u8,
    confirmed: Rc<Cell<bool>>,
}

impl eframe::App for ClipboardStager {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.frames == 0 {
            ctx.copy_text(self.text.clone());
            ctx.request_repaint();
        } else {
            self.confirmed.set(true);
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        self.frames = self.frames.saturating_add(1);
    }
}

impl Drop for ClipboardStager {
    fn drop(&mut self) {
        self.text.zeroize();
    }
}

/// Ordered list of clipboard strategies.
pub struct Clipboard {
    writers: Vec<Box<dyn ClipboardWriter>>,
}

impl Clipboard {
    pub fn new(writers: Vec<Box<dyn ClipboardWriter>>) -> Self {
        Self { writers }
    }

    /// Strategies for use outside the form: native binding, then a hidden window.
    /// Both report failure where the copy would not survive the process exiting.
    pub fn system() -> Self {
        let writers: Vec<Box<dyn ClipboardWriter>> = vec![
            Box::new(PrimaryBinding::detached()),
            Box::new(ToolkitFallback::Hidden),
        ];
        Self::new(writers)
    }

    /// Strategies for use inside a running form.
    pub fn for_context(ctx: egui::Context) -> Self {
        let writers: Vec<Box<dyn ClipboardWriter>> = vec![
            Box::new(PrimaryBinding::new()),
            Box::new(ToolkitFallback::Attached(ctx)),
        ];
        Self::new(writers)
    }

    /// Tries each strategy in order. Returns true on the first success.
    pub fn copy(&mut self, text: &str) -> bool {
        for writer in &mut self.writers {
            match writer.write(text) {
                Ok(()) => {
                    debug!(strategy = writer.name(), "copied to clipboard");
                    return true;
                }
                Err(e) => warn!(strategy = writer.name(), error = %e, "clipboard strategy failed"),
            }
        }
        false
    }
}

/// Puts `text` on the system clipboard, falling back to the toolkit when the
/// native binding fails. Never errors; returns whether the copy succeeded.
pub fn copy_to_clipboard(text: &str) -> bool {
    Clipboard::system().copy(text)
}
