//! Deprecation Handler - structured deprecation notices
//!
//! This crate composes human-readable deprecation messages for arguments,
//! attributes, classes and methods, and hands them to a warning sink at a
//! stack depth that points past the library's own frames:
//! - Kinds: what is being deprecated and what it belongs to
//! - Message: the fixed-format notice text
//! - Stack: call-stack walking to find the first external caller
//! - Sink: the warning facility the notice is delivered to

pub mod error;
pub mod handler;
pub mod kinds;
pub mod message;
pub mod request;
pub mod sink;
pub mod stack;

pub use error::DeprecationError;
pub use handler::DeprecationHandler;
pub use kinds::{ItemKind, ParentKind};
pub use message::generate_message;
pub use request::{
    ArgumentDeprecation, AttributeDeprecation, ClassDeprecation, DeprecationRequest,
    MethodDeprecation,
};
pub use sink::{EmittedWarning, LogSink, RecordingSink, WarningCategory, WarningPolicy, WarningSink};
pub use stack::{infer_stack_level, is_within_package, namespace_of, trait_namespace_of, CallSite};
