//! Process-wide binding configuration.
//!
//! The active [`BindConfig`] is held in an [`ArcSwap`] so that the guard can
//! read it lock-free on every subscription. It is initialized lazily from the
//! environment; an unparsable variable falls back to the defaults.
//!
//! | Variable | Values | Default |
//! |----------|--------|---------|
//! | `UIBIND_THREAD_CHECK` | `enforce`/`on`/`true`/`1`, `off`/`disabled`/`false`/`0` | `enforce` |
//!
//! Disabling the thread check is meant for headless test environments that
//! drive widgets from a harness thread.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

/// Environment variable controlling [`ThreadCheck`].
pub const THREAD_CHECK_VAR: &str = "UIBIND_THREAD_CHECK";

static ACTIVE: LazyLock<ArcSwap<BindConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(BindConfig::from_env().unwrap_or_default()));

/// Whether subscriptions must happen on the source's UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThreadCheck {
    /// Reject subscriptions from any other thread.
    #[default]
    Enforce,
    /// Accept subscriptions from any thread.
    Disabled,
}

impl FromStr for ThreadCheck {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim();
        if ["enforce", "on", "true", "1"]
            .iter()
            .any(|v| value.eq_ignore_ascii_case(v))
        {
            Ok(Self::Enforce)
        } else if ["off", "disabled", "false", "0"]
            .iter()
            .any(|v| value.eq_ignore_ascii_case(v))
        {
            Ok(Self::Disabled)
        } else {
            Err(ConfigError::InvalidValue {
                var: THREAD_CHECK_VAR,
                value: raw.to_string(),
            })
        }
    }
}

/// Settings shared by every bridge in the process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BindConfig {
    /// Thread-affinity enforcement at subscribe time.
    pub thread_check: ThreadCheck,
}

impl BindConfig {
    /// Read the configuration from environment variables.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] if a variable is set to an unknown value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let thread_check = env::var(THREAD_CHECK_VAR).ok();
        Self::from_vars(thread_check.as_deref())
    }

    /// Build a configuration from raw variable values (`None` = unset).
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] if a value is not recognized.
    pub fn from_vars(thread_check: Option<&str>) -> Result<Self, ConfigError> {
        let thread_check = match thread_check {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => ThreadCheck::default(),
        };
        Ok(Self { thread_check })
    }

    /// Builder-style override of the thread check.
    #[must_use]
    pub fn with_thread_check(mut self, thread_check: ThreadCheck) -> Self {
        self.thread_check = thread_check;
        self
    }
}

/// Errors from configuration parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable held a value that is not recognized.
    InvalidValue {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { var, value } => write!(f, "invalid value for {var}: '{value}'"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// The active configuration.
#[must_use]
pub fn current() -> Arc<BindConfig> {
    ACTIVE.load_full()
}

/// Replace the active configuration, returning the previous one.
pub fn install(config: BindConfig) -> Arc<BindConfig> {
    ACTIVE.swap(Arc::new(config))
}

/// Install `config` until the returned guard is dropped.
#[must_use = "dropping this guard restores the previous configuration"]
pub fn install_scoped(config: BindConfig) -> ConfigOverride {
    ConfigOverride {
        previous: install(config),
    }
}

/// RAII guard restoring the previous configuration on drop.
#[must_use = "dropping this guard restores the previous configuration"]
#[derive(Debug)]
pub struct ConfigOverride {
    previous: Arc<BindConfig>,
}

impl Drop for ConfigOverride {
    fn drop(&mut self) {
        ACTIVE.store(Arc::clone(&self.previous));
    }
}
