//! CLI argument definitions for `envc`.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use camino::Utf8PathBuf;
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::error::Result;
use crate::palette::ColorChoice;
use crate::pattern::KeyFilter;
use crate::render::DEFAULT_TRUNCATE;
use crate::table::StatusSelection;

/// Banner shown above the top-level help.
pub const BANNER: &str = r" _____ _   ___     __   ____ _   _ _____ ____ _  __
| ____| \ | \ \   / /  / ___| | | | ____/ ___| |/ /
|  _| |  \| |\ \ / /  | |   | |_| |  _|| |   | ' /
| |___| |\  | \ V /   | |___|  _  | |__| |___| . \
|_____|_| \_|  \_/     \____|_| |_|_____\____|_|\_\";

/// Default target file for both commands.
pub const DEFAULT_TARGET: &str = "./.env";

/// Default source file for `cmp`.
pub const DEFAULT_SOURCE: &str = "./.env.example";

/// Compare two .env files and show their values and differences.
#[derive(Parser, Debug)]
#[command(name = "envc")]
#[command(version, about)]
#[command(before_help = BANNER)]
#[command(long_about = concat!(
    "Compare two .env files and show their values and differences.\n\n",
    "`envc list` prints every variable of a single env file, sorted by name. ",
    "`envc cmp` compares a target env file (the real environment) against a ",
    "source file (the documented example) and marks each variable as missing ",
    "(x), divergent (!) or undefined in the source (?).",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Compare ./.env against ./.env.example:\n",
    "    $ envc cmp\n\n",
    "  Only show variables the target is missing:\n",
    "    $ envc cmp -m\n\n",
    "  Compare staging settings, ignoring secrets:\n",
    "    $ envc cmp -t .env.staging -i 'SECRET_*,*_PASSWORD'\n\n",
    "  List database settings as JSON:\n",
    "    $ envc list -k 'DB_*' --json",
))]
pub struct Cli {
    /// Options shared by every command.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compares two env files.
    #[command(name = "cmp", visible_aliases = ["compare", "c"])]
    Compare(CompareArgs),

    /// Lists all variables in the target env file, sorted alphabetically.
    List(ListArgs),
}

/// Options accepted by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Do not output any message (errors are still shown).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = ArgAction::Count,
        global = true,
    )]
    pub verbosity: u8,

    /// Colour flags given before the subcommand.
    #[command(flatten)]
    pub colour: AnsiArgs,
}

/// The `--ansi`/`--no-ansi` pair.
///
/// Both `Cli` and every subcommand carry their own copy, so the flags work on
/// either side of the subcommand name. Within one copy the last flag wins.
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnsiArgs {
    /// Force ANSI output.
    #[arg(long, overrides_with = "no_ansi")]
    pub ansi: bool,

    /// Disable ANSI output.
    #[arg(long = "no-ansi", overrides_with = "ansi")]
    pub no_ansi: bool,
}

impl AnsiArgs {
    /// The colour choice these flags request, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use envc::cli::AnsiArgs;
    /// use envc::palette::ColorChoice;
    ///
    /// let args = AnsiArgs { no_ansi: true, ..AnsiArgs::default() };
    /// assert_eq!(args.requested(), Some(ColorChoice::Never));
    /// assert_eq!(AnsiArgs::default().requested(), None);
    /// ```
    #[must_use]
    pub const fn requested(self) -> Option<ColorChoice> {
        match (self.ansi, self.no_ansi) {
            (true, false) => Some(ColorChoice::Always),
            (false, true) => Some(ColorChoice::Never),
            _ => None,
        }
    }
}

impl Cli {
    /// Resolve the colour flags into a [`ColorChoice`].
    ///
    /// Flags after the subcommand name come later on the command line, so they
    /// take precedence over flags before it.
    #[must_use]
    pub const fn color_choice(&self) -> ColorChoice {
        let output = match &self.command {
            Command::Compare(args) => &args.output,
            Command::List(args) => &args.output,
        };
        match (output.colour.requested(), self.global.colour.requested()) {
            (Some(choice), _) | (None, Some(choice)) => choice,
            (None, None) => ColorChoice::Auto,
        }
    }
}

/// Name filtering and output options shared by `list` and `cmp`.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Comma separated list of variable name patterns to ignore.
    #[arg(short, long, value_name = "PATTERNS")]
    pub ignore: Option<String>,

    /// Comma separated list of variable name patterns to focus on.
    #[arg(short, long, value_name = "PATTERNS")]
    pub key: Option<String>,

    /// The amount of chars to truncate values to (0 disables truncation).
    #[arg(
        short = 'T',
        long,
        value_name = "N",
        default_value_t = DEFAULT_TRUNCATE,
        env = "ENVC_TRUNCATE"
    )]
    pub truncate: usize,

    /// Interpolate values that refer to other variables, e.g. `${APP_URL}`.
    #[arg(short = 'I', long)]
    pub interpolate: bool,

    /// Output in JSON format for scripting.
    #[arg(long)]
    pub json: bool,

    /// Colour flags given after the subcommand.
    #[command(flatten)]
    pub colour: AnsiArgs,
}

impl OutputArgs {
    /// Build the name filter from `--ignore` and `--key`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EnvcError::ConflictingFilters`] when both are
    /// given.
    pub fn key_filter(&self) -> Result<KeyFilter> {
        KeyFilter::from_options(self.ignore.as_deref(), self.key.as_deref())
    }
}

impl Default for OutputArgs {
    /// Creates an `OutputArgs` instance matching the CLI defaults.
    fn default() -> Self {
        Self {
            ignore: None,
            key: None,
            truncate: DEFAULT_TRUNCATE,
            interpolate: false,
            json: false,
            colour: AnsiArgs::default(),
        }
    }
}

/// Arguments for the `list` command.
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Path to the .env file.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_TARGET, env = "ENVC_TARGET")]
    pub target: Utf8PathBuf,

    /// Filtering and output options.
    #[command(flatten)]
    pub output: OutputArgs,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            target: Utf8PathBuf::from(DEFAULT_TARGET),
            output: OutputArgs::default(),
        }
    }
}

/// Arguments for the `cmp` command.
#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    /// Path to the .env file to compare with.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_TARGET, env = "ENVC_TARGET")]
    pub target: Utf8PathBuf,

    /// Path to the .env file to compare to.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SOURCE, env = "ENVC_SOURCE")]
    pub source: Utf8PathBuf,

    /// Filtering and output options.
    #[command(flatten)]
    pub output: OutputArgs,

    /// Status filters.
    #[command(flatten)]
    pub selection: SelectionArgs,
}

impl Default for CompareArgs {
    fn default() -> Self {
        Self {
            target: Utf8PathBuf::from(DEFAULT_TARGET),
            source: Utf8PathBuf::from(DEFAULT_SOURCE),
            output: OutputArgs::default(),
            selection: SelectionArgs::default(),
        }
    }
}

/// Status filters for `cmp`. Without any of them every variable is shown.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct SelectionArgs {
    /// Show missing and empty variables.
    #[arg(short, long)]
    pub missing: bool,

    /// Show variables in the target that aren't in the source file.
    #[arg(short, long)]
    pub undefined: bool,

    /// Show variables with diverging values.
    #[arg(short, long)]
    pub divergent: bool,
}

impl From<SelectionArgs> for StatusSelection {
    fn from(args: SelectionArgs) -> Self {
        Self {
            missing: args.missing,
            undefined: args.undefined,
            divergent: args.divergent,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
