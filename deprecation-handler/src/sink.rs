//! Warning sinks
//!
//! A sink is the facility that actually shows (or refuses) a notice. The
//! handler only ever calls [`WarningSink::emit`] once per notice; display,
//! filtering and escalation are the sink's business.

use crate::error::DeprecationError;
use crate::stack::{caller_site, CallSite};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

/// Environment variable read by [`WarningPolicy::from_env`]
pub const POLICY_ENV_VAR: &str = "DEPRECATION_WARNINGS";

/// Log target used for shown notices
pub const LOG_TARGET: &str = "deprecation";

/// Category a warning is tagged with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningCategory {
    Deprecation,
}

impl fmt::Display for WarningCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningCategory::Deprecation => write!(f, "DeprecationWarning"),
        }
    }
}

/// The facility notices are delivered to
pub trait WarningSink {
    /// Deliver one warning. `stack_level` counts frames above the first
    /// caller outside the handler that the warning should be attributed to.
    fn emit(
        &self,
        message: &str,
        category: WarningCategory,
        stack_level: usize,
    ) -> Result<(), DeprecationError>;
}

impl<S: WarningSink + ?Sized> WarningSink for &S {
    fn emit(
        &self,
        message: &str,
        category: WarningCategory,
        stack_level: usize,
    ) -> Result<(), DeprecationError> {
        (**self).emit(message, category, stack_level)
    }
}

impl<S: WarningSink + ?Sized> WarningSink for Box<S> {
    fn emit(
        &self,
        message: &str,
        category: WarningCategory,
        stack_level: usize,
    ) -> Result<(), DeprecationError> {
        (**self).emit(message, category, stack_level)
    }
}

/// What a [`LogSink`] does with a notice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningPolicy {
    /// Show once per message and call site
    #[default]
    Default,
    /// Show every time
    Always,
    /// Show once per message, wherever it comes from
    Once,
    /// Drop silently
    Ignore,
    /// Fail with [`DeprecationError::Escalated`]
    Error,
}

impl WarningPolicy {
    /// Read the policy from `DEPRECATION_WARNINGS`.
    ///
    /// Unset or unparseable values give [`WarningPolicy::Default`].
    pub fn from_env() -> Self {
        match std::env::var(POLICY_ENV_VAR) {
            Ok(value) => value.parse().unwrap_or_else(|err| {
                debug!("ignoring {}: {}", POLICY_ENV_VAR, err);
                WarningPolicy::Default
            }),
            Err(_) => WarningPolicy::Default,
        }
    }
}

impl FromStr for WarningPolicy {
    type Err = DeprecationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(WarningPolicy::Default),
            "always" => Ok(WarningPolicy::Always),
            "once" => Ok(WarningPolicy::Once),
            "ignore" => Ok(WarningPolicy::Ignore),
            "error" => Ok(WarningPolicy::Error),
            _ => Err(DeprecationError::UnknownPolicy {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for WarningPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WarningPolicy::Default => "default",
            WarningPolicy::Always => "always",
            WarningPolicy::Once => "once",
            WarningPolicy::Ignore => "ignore",
            WarningPolicy::Error => "error",
        };
        f.write_str(name)
    }
}

/// Sink that writes notices through the `log` facade.
///
/// The stack level is turned into a source location by walking the stack
/// again, and the notice is logged at warn level under the `deprecation`
/// target as `file:line: DeprecationWarning: message`.
#[derive(Debug, Default)]
pub struct LogSink {
    policy: WarningPolicy,
    seen: Mutex<HashSet<(String, Option<CallSite>)>>,
}

impl LogSink {
    pub fn new(policy: WarningPolicy) -> Self {
        Self {
            policy,
            seen: Mutex::new(HashSet::new()),
        }
    }

    /// Create a sink with the policy from `DEPRECATION_WARNINGS`
    pub fn from_env() -> Self {
        Self::new(WarningPolicy::from_env())
    }

    pub fn policy(&self) -> WarningPolicy {
        self.policy
    }

    /// Forget which notices were already shown
    pub fn reset(&self) {
        self.seen().clear();
    }

    fn seen(&self) -> MutexGuard<'_, HashSet<(String, Option<CallSite>)>> {
        // poisoning leaves the set intact
        self.seen.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record the notice and report whether it is new under this policy
    fn first_time(&self, message: &str, site: &CallSite) -> bool {
        let key = match self.policy {
            WarningPolicy::Once => (message.to_string(), None),
            _ => (message.to_string(), Some(site.clone())),
        };
        self.seen().insert(key)
    }
}

impl WarningSink for LogSink {
    fn emit(
        &self,
        message: &str,
        category: WarningCategory,
        stack_level: usize,
    ) -> Result<(), DeprecationError> {
        if self.policy == WarningPolicy::Ignore {
            return Ok(());
        }

        let site = caller_site(stack_level);

        match self.policy {
            WarningPolicy::Error => {
                return Err(DeprecationError::Escalated {
                    message: message.to_string(),
                    site,
                })
            }
            WarningPolicy::Default | WarningPolicy::Once => {
                if !self.first_time(message, &site) {
                    return Ok(());
                }
            }
            WarningPolicy::Always | WarningPolicy::Ignore => {}
        }

        warn!(target: LOG_TARGET, "{}: {}: {}", site, category, message);
        Ok(())
    }
}

/// A warning captured by [`RecordingSink`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmittedWarning {
    pub message: String,
    pub category: WarningCategory,
    pub stack_level: usize,
}

/// Sink that keeps every warning in memory, in order
#[derive(Debug, Default)]
pub struct RecordingSink {
    warnings: Mutex<Vec<EmittedWarning>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, Vec<EmittedWarning>> {
        self.warnings.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get all recorded warnings
    pub fn warnings(&self) -> Vec<EmittedWarning> {
        self.records().clone()
    }

    pub fn last(&self) -> Option<EmittedWarning> {
        self.records().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    pub fn clear(&self) {
        self.records().clear();
    }
}

impl WarningSink for RecordingSink {
    fn emit(
        &self,
        message: &str,
        category: WarningCategory,
        stack_level: usize,
    ) -> Result<(), DeprecationError> {
        self.records().push(EmittedWarning {
            message: message.to_string(),
            category,
            stack_level,
        });
        Ok(())
    }
}
