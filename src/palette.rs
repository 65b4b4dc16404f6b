//! ANSI colour roles for table output.

use console::Style;

/// Whether coloured output was forced on, forced off or left to detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Colour when stdout is a terminal and the environment allows it.
    #[default]
    Auto,
    /// Always emit ANSI sequences (`--ansi`).
    Always,
    /// Never emit ANSI sequences (`--no-ansi`).
    Never,
}

/// What a piece of text represents, which decides its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A variable name.
    Name,
    /// A `true`/`false` value.
    Boolean,
    /// An all-digit value.
    Number,
    /// Any other value.
    Text,
    /// An empty or absent value in the first value column.
    EmptySource,
    /// An empty or absent value in the target column.
    EmptyTarget,
    /// The marker of a missing variable.
    Missing,
    /// The marker of a variable unknown to the source.
    Undefined,
    /// The marker of a variable with diverging values.
    Divergent,
}

impl Role {
    /// Classify a non-empty value.
    ///
    /// # Examples
    ///
    /// ```
    /// use envc::palette::Role;
    ///
    /// assert_eq!(Role::for_value("TRUE"), Role::Boolean);
    /// assert_eq!(Role::for_value("8080"), Role::Number);
    /// assert_eq!(Role::for_value("-1"), Role::Text);
    /// ```
    #[must_use]
    pub fn for_value(value: &str) -> Self {
        if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
            Self::Boolean
        } else if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
            Self::Number
        } else {
            Self::Text
        }
    }

    fn style(self) -> Option<Style> {
        let style = Style::new();
        match self {
            Self::Name => Some(style.white().bold()),
            Self::Boolean => Some(style.cyan()),
            Self::Number => Some(style.color256(48)),
            Self::Text => None,
            Self::EmptySource => Some(style.black().bright().bold()),
            Self::EmptyTarget => Some(style.red()),
            Self::Missing => Some(style.red().bold()),
            Self::Undefined => Some(style.magenta().bright().bold()),
            Self::Divergent => Some(style.yellow().bold()),
        }
    }
}

/// Applies colour roles to text, or leaves it untouched when colour is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Resolve a [`ColorChoice`] against the current terminal and environment.
    ///
    /// Detection honours `NO_COLOR`, `CLICOLOR` and `CLICOLOR_FORCE`.
    #[must_use]
    pub fn new(choice: ColorChoice) -> Self {
        let enabled = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => !no_color_requested() && console::colors_enabled(),
        };
        Self { enabled }
    }

    /// A palette that never emits ANSI sequences.
    #[must_use]
    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    /// A palette that always emits ANSI sequences.
    #[must_use]
    pub const fn coloured() -> Self {
        Self { enabled: true }
    }

    /// Return true when ANSI sequences are emitted.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Render `text` in the colour of `role`.
    #[must_use]
    pub fn paint(&self, text: &str, role: Role) -> String {
        match role.style().filter(|_| self.enabled) {
            Some(style) => style.force_styling(true).apply_to(text).to_string(),
            None => text.to_owned(),
        }
    }
}

fn no_color_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty())
}
