//! Kinds of deprecated items
//!
//! The labels produced here are spliced verbatim into notice text, so they
//! are always lowercase English words.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of entity a notice is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Argument,
    Attribute,
    Class,
    Method,
}

impl ItemKind {
    /// Label used in notice text
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Argument => "argument",
            ItemKind::Attribute => "attribute",
            ItemKind::Class => "class",
            ItemKind::Method => "method",
        }
    }

    /// The kind of parent an item of this kind belongs to, if any.
    ///
    /// Arguments belong to methods, attributes and methods belong to
    /// classes, and classes stand alone.
    pub fn parent_kind(&self) -> Option<ParentKind> {
        match self {
            ItemKind::Argument => Some(ParentKind::Method),
            ItemKind::Attribute | ItemKind::Method => Some(ParentKind::Class),
            ItemKind::Class => None,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The kind of entity enclosing a deprecated item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentKind {
    Class,
    Method,
}

impl ParentKind {
    pub fn label(&self) -> &'static str {
        match self {
            ParentKind::Class => "class",
            ParentKind::Method => "method",
        }
    }
}

impl fmt::Display for ParentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
