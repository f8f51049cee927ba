//! Stack rendering configuration.
//!
//! A [`StackConfig`] selects the rendering mode and the framework filter
//! key. Rendering functions take a configuration explicitly; the hosting
//! application may additionally install one process-wide configuration,
//! exactly once at entry, which [`crate::Error::stack`] and the `+` format
//! modes read. There is no hidden mutation: installation goes through
//! [`configure`] or [`configure_from_env`] and is rejected once set.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::OnceCell;
use thiserror::Error as ThisError;

use crate::command;

/// Command-line option (and, uppercased with `_`, environment variable)
/// selecting the stack mode. Recognized values are `brief` and `detail`,
/// case-sensitive; anything else falls back to brief.
pub const OPTION_KEY_STACK_MODE: &str = "causeway.error.stack.mode";

/// Deprecated boolean alias: `1` or `true` force brief mode. It never
/// forces detail mode.
pub const OPTION_KEY_BRIEF: &str = "causeway.error.brief";

/// Default framework filter key for brief mode.
pub const DEFAULT_STACK_FILTER_KEY: &str = "/causeway";

/// How much of a captured stack is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackMode {
    /// Hide frames under the framework filter key.
    #[default]
    Brief,
    /// Show everything except runtime and synthetic frames.
    Detail,
}

impl fmt::Display for StackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackMode::Brief => f.write_str("brief"),
            StackMode::Detail => f.write_str("detail"),
        }
    }
}

/// The value did not name a stack mode.
#[derive(Debug, ThisError)]
#[error("unrecognized stack mode {0:?}")]
pub struct ParseStackModeError(String);

impl FromStr for StackMode {
    type Err = ParseStackModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brief" => Ok(StackMode::Brief),
            "detail" => Ok(StackMode::Detail),
            other => Err(ParseStackModeError(other.to_string())),
        }
    }
}

/// Configuration for stack rendering: the mode plus the framework filter
/// key brief mode hides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackConfig {
    mode: StackMode,
    filter_key: Cow<'static, str>,
}

impl StackConfig {
    /// A configuration with the given mode and the default filter key.
    pub fn new(mode: StackMode) -> Self {
        Self {
            mode,
            filter_key: Cow::Borrowed(DEFAULT_STACK_FILTER_KEY),
        }
    }

    /// Replace the framework filter key.
    pub fn with_filter_key(mut self, key: impl Into<Cow<'static, str>>) -> Self {
        self.filter_key = key.into();
        self
    }

    /// Resolve a configuration from the process options, reading
    /// [`OPTION_KEY_STACK_MODE`] and the deprecated [`OPTION_KEY_BRIEF`]
    /// alias. Unrecognized or missing values fall back to brief mode.
    pub fn from_env() -> Self {
        let mut mode = StackMode::Brief;
        if let Some(value) = command::option_with_env(OPTION_KEY_BRIEF) {
            if value == "1" || value == "true" {
                mode = StackMode::Brief;
            }
        }
        if let Some(value) = command::option_with_env(OPTION_KEY_STACK_MODE) {
            if let Ok(parsed) = value.parse::<StackMode>() {
                mode = parsed;
            }
        }
        tracing::debug!(mode = %mode, "resolved stack mode from process options");
        StackConfig::new(mode)
    }

    /// The rendering mode.
    pub fn mode(&self) -> StackMode {
        self.mode
    }

    /// The framework filter key applied in brief mode.
    pub fn filter_key(&self) -> &str {
        &self.filter_key
    }

    pub(crate) fn is_brief(&self) -> bool {
        self.mode == StackMode::Brief
    }
}

impl Default for StackConfig {
    fn default() -> Self {
        Self::new(StackMode::Brief)
    }
}

/// The process-wide configuration was already installed.
#[derive(Debug, ThisError)]
#[error("stack configuration is already installed")]
pub struct ReconfigureError(());

static INSTALLED: OnceCell<StackConfig> = OnceCell::new();

static FALLBACK: StackConfig = StackConfig {
    mode: StackMode::Brief,
    filter_key: Cow::Borrowed(DEFAULT_STACK_FILTER_KEY),
};

/// Install the process-wide stack configuration. Call once from the
/// application entry point; later calls fail.
pub fn configure(config: StackConfig) -> Result<(), ReconfigureError> {
    INSTALLED.set(config).map_err(|_| ReconfigureError(()))
}

/// Install the process-wide stack configuration from the process options.
pub fn configure_from_env() -> Result<(), ReconfigureError> {
    configure(StackConfig::from_env())
}

/// The installed configuration, or the brief-mode fallback when the
/// application never installed one.
pub(crate) fn installed() -> &'static StackConfig {
    INSTALLED.get().unwrap_or(&FALLBACK)
}
