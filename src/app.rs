use eframe::{App, Frame, NativeOptions, egui};
use egui::{Color32, RichText};
use tracing::{debug, info, warn};
use zeroize::Zeroize;

use crate::clipboard::Clipboard;
use crate::options::{GenerationOptions, MAX_LENGTH, MIN_LENGTH, Preset};
use crate::password::generate_password;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
    Info,
    Warning,
}

impl NoticeLevel {
    fn color(self) -> Color32 {
        match self {
            NoticeLevel::Error => Color32::RED,
            NoticeLevel::Info => Color32::LIGHT_GREEN,
            NoticeLevel::Warning => Color32::YELLOW,
        }
    }
}

/// A modal message. While one is open the form is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: &'static str,
    pub message: &'static str,
}

const NO_CHARSET: Notice = Notice {
    level: NoticeLevel::Error,
    title: "Error",
    message: "No character types selected.",
};
const NOTHING_TO_COPY: Notice = Notice {
    level: NoticeLevel::Info,
    title: "Info",
    message: "No password to copy.",
};
const COPIED: Notice = Notice {
    level: NoticeLevel::Info,
    title: "Copied",
    message: "Password copied to clipboard.",
};
const COPY_FAILED: Notice = Notice {
    level: NoticeLevel::Warning,
    title: "Clipboard failed",
    message: "Could not copy to clipboard automatically.",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Generate,
    Copy,
    Preset(Preset),
}

/// The form-based generator
pub struct PassGenApp {
    // Form controls
    pub length: usize,
    pub use_lowercase: bool,
    pub use_uppercase: bool,
    pub use_digits: bool,
    pub use_symbols: bool,
    pub avoid_ambiguous: bool,

    // Read-only output field
    pub generated_password: String,

    pub notice: Option<Notice>,

    clipboard: Clipboard,
}

/// Opens the form and blocks until its window is closed.
pub fn run_gui() -> eframe::Result<()> {
    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Password Generator")
            .with_inner_size([380.0, 280.0])
            .with_resizable(false),
        ..Default::default()
    };
    eframe::run_native(
        "Password Generator",
        native_options,
        Box::new(|cc: &eframe::CreationContext| Ok(Box::new(PassGenApp::new(cc)))),
    )
}

impl PassGenApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_clipboard(Clipboard::for_context(cc.egui_ctx.clone()))
    }

    /// Builds the form with default controls and generates the first password,
    /// so the output is never empty on first paint.
    pub fn with_clipboard(clipboard: Clipboard) -> Self {
        let defaults = GenerationOptions::default();
        let mut app = Self {
            length: defaults.length,
            use_lowercase: defaults.include_lower,
            use_uppercase: defaults.include_upper,
            use_digits: defaults.include_digits,
            use_symbols: defaults.include_symbols,
            avoid_ambiguous: defaults.avoid_ambiguous,
            generated_password: String::new(),
            notice: None,
            clipboard,
        };
        app.generate();
        app
    }

    /// Snapshot of the current control values.
    pub fn options(&self) -> GenerationOptions {
        GenerationOptions {
            length: self.length,
            include_lower: self.use_lowercase,
            include_upper: self.use_uppercase,
            include_digits: self.use_digits,
            include_symbols: self.use_symbols,
            avoid_ambiguous: self.avoid_ambiguous,
        }
        .with_length_clamped(self.length)
    }

    fn set_options(&mut self, opts: GenerationOptions) {
        self.length = opts.length;
        self.use_lowercase = opts.include_lower;
        self.use_uppercase = opts.include_upper;
        self.use_digits = opts.include_digits;
        self.use_symbols = opts.include_symbols;
        self.avoid_ambiguous = opts.avoid_ambiguous;
    }

    /// Regenerates from the current controls. On an empty charset the output
    /// is left alone and an error notice is raised.
    pub fn generate(&mut self) {
        let opts = self.options();
        let charset = opts.charset();
        match generate_password(opts.length, &charset) {
            Ok(pwd) => {
                debug!(length = opts.length, charset_len = charset.chars().count(), "generated password");
                self.generated_password.zeroize();
                self.generated_password = pwd;
            }
            Err(e) => {
                debug!(error = %e, "generation refused");
                self.notice = Some(NO_CHARSET);
            }
        }
    }

    pub fn copy(&mut self) {
        if self.generated_password.is_empty() {
            self.notice = Some(NOTHING_TO_COPY);
            return;
        }
        if self.clipboard.copy(&self.generated_password) {
            self.notice = Some(COPIED);
        } else {
            warn!("every clipboard strategy failed");
            self.notice = Some(COPY_FAILED);
        }
    }

    /// Overwrites all controls at once, then generates.
    pub fn apply_preset(&mut self, preset: Preset) {
        info!(?preset, "applying preset");
        self.set_options(preset.options());
        self.generate();
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::Generate => self.generate(),
            Action::Copy => self.copy(),
            Action::Preset(preset) => self.apply_preset(preset),
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) -> Option<Action> {
        let mut action = None;

        ui.vertical_centered(|ui| {
            ui.heading(RichText::new("Password Generator").size(20.0));
        });
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Length:");
            if ui.small_button("-").clicked() {
                self.length = self.length.saturating_sub(1).max(MIN_LENGTH);
            }
            ui.add(
                egui::DragValue::new(&mut self.length)
                    .range(MIN_LENGTH..=MAX_LENGTH)
                    .speed(0.2),
            );
            if ui.small_button("+").clicked() {
                self.length = (self.length + 1).min(MAX_LENGTH);
            }
        });

        ui.columns(2, |cols| {
            cols[0].checkbox(&mut self.use_lowercase, "Lowercase");
            cols[1].checkbox(&mut self.use_uppercase, "Uppercase");
            cols[0].checkbox(&mut self.use_digits, "Digits");
            cols[1].checkbox(&mut self.use_symbols, "Symbols");
        });
        ui.checkbox(&mut self.avoid_ambiguous, "Exclude ambiguous");

        ui.add_space(8.0);
        ui.label("Password:");
        let mut shown = self.generated_password.as_str();
        ui.add(
            egui::TextEdit::singleline(&mut shown)
                .font(egui::TextStyle::Monospace)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(8.0);

        ui.columns(2, |cols| {
            let width = cols[0].available_width();
            if cols[0]
                .add(egui::Button::new("Generate").min_size(egui::vec2(width, 0.0)))
                .clicked()
            {
                action = Some(Action::Generate);
            }
            if cols[1]
                .add(egui::Button::new("Copy").min_size(egui::vec2(width, 0.0)))
                .clicked()
            {
                action = Some(Action::Copy);
            }
        });

        ui.add_space(8.0);
        ui.columns(2, |cols| {
            let width = cols[0].available_width();
            for (col, preset) in cols.iter_mut().zip(Preset::ALL) {
                if col
                    .add(egui::Button::new(preset.label()).min_size(egui::vec2(width, 0.0)))
                    .clicked()
                {
                    action = Some(Action::Preset(preset));
                }
            }
        });

        action
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.notice else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new(notice.title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.colored_label(notice.level.color(), notice.message);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.notice = None;
        }
    }
}

impl App for PassGenApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // Ctrl+G: generate, Escape: dismiss the open notice
        let (generate_key, escape) = ctx.input(|i| {
            (
                i.modifiers.ctrl && i.key_pressed(egui::Key::G),
                i.key_pressed(egui::Key::Escape),
            )
        });
        if self.notice.is_some() {
            if escape {
                self.notice = None;
            }
        } else if generate_key {
            self.generate();
        }

        let enabled = self.notice.is_none();
        let action = egui::CentralPanel::default()
            .show(ctx, |ui| ui.add_enabled_ui(enabled, |ui| self.show_form(ui)).inner)
            .inner;

        if let Some(action) = action {
            self.dispatch(action);
        }

        self.show_notice(ctx);
    }
}

// Zeroize the displayed password on Drop
impl Drop for PassGenApp {
    fn drop(&mut self) {
        self.generated_password.zeroize();
    }
}

// ------------------ UNIT TESTS ------------------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::ClipboardWriter;
    use crate::error::ClipboardError;
    use crate::password::{AMBIGUOUS, SYMBOLS};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        fails: bool,
        writes: Rc<RefCell<Vec<String>>>,
    }

    impl ClipboardWriter for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.writes.borrow_mut().push(text.to_string());
            if self.fails {
                Err(ClipboardError::Rejected("recorder".into()))
            } else {
                Ok(())
            }
        }
    }

    fn app(fails: bool) -> (PassGenApp, Rc<RefCell<Vec<String>>>) {
        let writes = Rc::new(RefCell::new(Vec::new()));
        let writers: Vec<Box<dyn ClipboardWriter>> = vec![Box::new(Recorder {
            fails,
            writes: Rc::clone(&writes),
        })];
        (PassGenApp::with_clipboard(Clipboard::new(writers)), writes)
    }

    fn clear_categories(app: &mut PassGenApp) {
        app.use_lowercase = false;
        app.use_uppercase = false;
        app.use_digits = false;
        app.use_symbols = false;
    }

    #[test]
    fn test_initial_state_has_password() {
        let (app, writes) = app(false);
        assert_eq!(app.length, 16);
        assert!(app.use_lowercase && app.use_uppercase && app.use_digits && app.use_symbols);
        assert!(app.avoid_ambiguous);
        assert_eq!(app.generated_password.chars().count(), 16);
        assert!(app.notice.is_none());
        assert!(writes.borrow().is_empty());
    }

    #[test]
    fn test_generate_replaces_output() {
        let (mut app, _) = app(false);
        app.length = 40;
        app.generate();
        assert_eq!(app.generated_password.chars().count(), 40);
    }

    #[test]
    fn test_generate_with_empty_charset_keeps_output() {
        let (mut app, _) = app(false);
        let before = app.generated_password.clone();
        clear_categories(&mut app);
        app.generate();
        assert_eq!(app.generated_password, before);
        assert_eq!(app.notice, Some(NO_CHARSET));
    }

    #[test]
    fn test_options_clamp_out_of_range_length() {
        let (mut app, _) = app(false);
        app.length = 1000;
        assert_eq!(app.options().length, MAX_LENGTH);
        app.length = 0;
        assert_eq!(app.options().length, MIN_LENGTH);
    }

    #[test]
    fn test_copy_success() {
        let (mut app, writes) = app(false);
        app.copy();
        assert_eq!(app.notice, Some(COPIED));
        assert_eq!(*writes.borrow(), vec![app.generated_password.clone()]);
    }

    #[test]
    fn test_copy_failure_warns() {
        let (mut app, writes) = app(true);
        app.copy();
        assert_eq!(app.notice, Some(COPY_FAILED));
        assert_eq!(writes.borrow().len(), 1);
    }

    #[test]
    fn test_copy_empty_output_is_informational() {
        let (mut app, writes) = app(false);
        app.generated_password.clear();
        app.copy();
        assert_eq!(app.notice, Some(NOTHING_TO_COPY));
        assert!(writes.borrow().is_empty());
    }

    #[test]
    fn test_memorable_preset() {
        let (mut app, _) = app(false);
        clear_categories(&mut app);
        app.avoid_ambiguous = false;
        app.apply_preset(Preset::Memorable);

        assert_eq!(app.options(), Preset::Memorable.options());
        let pwd = &app.generated_password;
        assert_eq!(pwd.chars().count(), 12);
        assert!(!pwd.chars().any(|c| SYMBOLS.contains(c)));
        assert!(!pwd.chars().any(|c| AMBIGUOUS.contains(c)));
    }

    #[test]
    fn test_strong_preset() {
        let (mut app, _) = app(false);
        app.length = 100;
        app.use_symbols = false;
        app.apply_preset(Preset::Strong);
        assert_eq!(app.options(), Preset::Strong.options());
        assert_eq!(app.generated_password.chars().count(), 16);
    }

    #[test]
    fn test_dispatch_routes_actions() {
        let (mut app, writes) = app(false);
        app.dispatch(Action::Preset(Preset::Memorable));
        assert_eq!(app.length, 12);
        app.dispatch(Action::Copy);
        assert_eq!(writes.borrow().len(), 1);
        app.notice = None;
        app.length = 20;
        app.dispatch(Action::Generate);
        assert_eq!(app.generated_password.chars().count(), 20);
    }
}
