use crate::password::build_charset;

/// Length used when the user gives none (or gives garbage at the console).
pub const DEFAULT_LENGTH: usize = 16;
/// Passwords per console session when the count prompt is left empty.
pub const DEFAULT_COUNT: usize = 1;
/// Upper limits on console entries, so a typo can't ask for gigabytes.
pub const MAX_CONSOLE_LENGTH: usize = 4096;
pub const MAX_CONSOLE_COUNT: usize = 1000;
/// Bounds of the form's length stepper.
pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 128;

/// Everything one generation request needs. Built fresh per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOptions {
    pub length: usize,
    pub include_lower: bool,
    pub include_upper: bool,
    pub include_digits: bool,
    pub include_symbols: bool,
    pub avoid_ambiguous: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            include_lower: true,
            include_upper: true,
            include_digits: true,
            include_symbols: true,
            avoid_ambiguous: true,
        }
    }
}

impl GenerationOptions {
    /// Same options with the length clamped to the form's range (4-128)
    pub fn with_length_clamped(self, length: usize) -> Self {
        Self {
            length: length.clamp(MIN_LENGTH, MAX_LENGTH),
            ..self
        }
    }

    /// Charset for the current flags. Recomputed on every call.
    pub fn charset(&self) -> String {
        build_charset(
            self.include_lower,
            self.include_upper,
            self.include_digits,
            self.include_symbols,
            self.avoid_ambiguous,
        )
    }

    /// True if at least one character category is switched on
    pub fn has_category(&self) -> bool {
        self.include_lower || self.include_upper || self.include_digits || self.include_symbols
    }
}

/// Canned option bundles offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Strong,
    Memorable,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Strong, Preset::Memorable];

    pub fn label(self) -> &'static str {
        match self {
            Preset::Strong => "Preset: 16 (strong)",
            Preset::Memorable => "Preset: 12 (memorable)",
        }
    }

    pub fn options(self) -> GenerationOptions {
        match self {
            Preset::Strong => GenerationOptions::default(),
            Preset::Memorable => GenerationOptions {
                length: 12,
                include_symbols: false,
                ..GenerationOptions::default()
            },
        }
    }
}
