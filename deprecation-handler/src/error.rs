//! Error handling for deprecation notices
//!
//! Composing a notice never fails once a name or message is known, and
//! stack inspection never fails at all. The errors here cover the caller
//! contract and the warning policy of the sink.

use crate::kinds::ItemKind;
use crate::stack::CallSite;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeprecationError {
    /// Neither an explicit message nor the deprecated item's name was given
    #[error("cannot compose a deprecation notice for an unnamed {kind}: pass a name or an explicit message")]
    MissingItemName { kind: ItemKind },

    /// The sink's policy turned the notice into a hard failure
    #[error("{site}: DeprecationWarning: {message}")]
    Escalated { message: String, site: CallSite },

    #[error("unknown warning policy `{value}` (expected default, always, once, error or ignore)")]
    UnknownPolicy { value: String },
}

impl DeprecationError {
    /// Check if this error comes from the sink's policy rather than the caller
    pub fn is_escalation(&self) -> bool {
        matches!(self, DeprecationError::Escalated { .. })
    }
}
