//! Per-call deprecation requests
//!
//! Each public entry point takes its own options struct so every field is
//! named at the call site. All of them lower into a [`DeprecationRequest`].

use crate::error::DeprecationError;
use crate::kinds::{ItemKind, ParentKind};
use crate::message::generate_message;

/// Everything known about one deprecation notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecationRequest {
    pub item_kind: ItemKind,
    pub item_name: Option<String>,
    pub replacement_name: Option<String>,
    pub remove_version: Option<String>,
    pub parent_name: Option<String>,
    pub parent_kind: Option<ParentKind>,
    pub explicit_message: Option<String>,
    pub stack_level: Option<usize>,
}

impl DeprecationRequest {
    pub fn new(item_kind: ItemKind) -> Self {
        Self {
            item_kind,
            item_name: None,
            replacement_name: None,
            remove_version: None,
            parent_name: None,
            parent_kind: None,
            explicit_message: None,
            stack_level: None,
        }
    }

    /// The text to deliver: the explicit message if one was given,
    /// otherwise a composed notice.
    pub fn resolve_message(&self) -> Result<String, DeprecationError> {
        if let Some(message) = self.explicit_message.as_deref().filter(|m| !m.is_empty()) {
            return Ok(message.to_string());
        }

        let item_name = self
            .item_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(DeprecationError::MissingItemName {
                kind: self.item_kind,
            })?;

        Ok(generate_message(
            self.item_kind.label(),
            item_name,
            self.replacement_name.as_deref(),
            self.remove_version.as_deref(),
            self.parent_name.as_deref(),
            self.parent_kind.map(|kind| kind.label()),
        ))
    }
}

/// Options for [`crate::DeprecationHandler::deprecate_argument`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentDeprecation {
    pub argument_name: Option<String>,
    pub method_name: Option<String>,
    pub new_argument_name: Option<String>,
    pub message: Option<String>,
    pub remove_version: Option<String>,
    pub stack_level: Option<usize>,
}

impl ArgumentDeprecation {
    pub fn new(argument_name: impl Into<String>) -> Self {
        Self {
            argument_name: Some(argument_name.into()),
            ..Self::default()
        }
    }

    pub fn method_name(mut self, method_name: impl Into<String>) -> Self {
        self.method_name = Some(method_name.into());
        self
    }

    pub fn new_argument_name(mut self, new_argument_name: impl Into<String>) -> Self {
        self.new_argument_name = Some(new_argument_name.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn remove_version(mut self, remove_version: impl Into<String>) -> Self {
        self.remove_version = Some(remove_version.into());
        self
    }

    pub fn stack_level(mut self, stack_level: usize) -> Self {
        self.stack_level = Some(stack_level);
        self
    }
}

impl From<ArgumentDeprecation> for DeprecationRequest {
    fn from(options: ArgumentDeprecation) -> Self {
        Self {
            item_name: options.argument_name,
            replacement_name: options.new_argument_name,
            remove_version: options.remove_version,
            parent_name: options.method_name,
            parent_kind: ItemKind::Argument.parent_kind(),
            explicit_message: options.message,
            stack_level: options.stack_level,
            ..Self::new(ItemKind::Argument)
        }
    }
}

/// Options for [`crate::DeprecationHandler::deprecate_attribute`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeDeprecation {
    pub attribute_name: Option<String>,
    pub class_name: Option<String>,
    pub new_attribute_name: Option<String>,
    pub message: Option<String>,
    pub remove_version: Option<String>,
    pub stack_level: Option<usize>,
}

impl AttributeDeprecation {
    pub fn new(attribute_name: impl Into<String>) -> Self {
        Self {
            attribute_name: Some(attribute_name.into()),
            ..Self::default()
        }
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn new_attribute_name(mut self, new_attribute_name: impl Into<String>) -> Self {
        self.new_attribute_name = Some(new_attribute_name.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn remove_version(mut self, remove_version: impl Into<String>) -> Self {
        self.remove_version = Some(remove_version.into());
        self
    }

    pub fn stack_level(mut self, stack_level: usize) -> Self {
        self.stack_level = Some(stack_level);
        self
    }
}

impl From<AttributeDeprecation> for DeprecationRequest {
    fn from(options: AttributeDeprecation) -> Self {
        Self {
            item_name: options.attribute_name,
            replacement_name: options.new_attribute_name,
            remove_version: options.remove_version,
            parent_name: options.class_name,
            parent_kind: ItemKind::Attribute.parent_kind(),
            explicit_message: options.message,
            stack_level: options.stack_level,
            ..Self::new(ItemKind::Attribute)
        }
    }
}

/// Options for [`crate::DeprecationHandler::deprecate_class`]
///
/// Classes have no parent, so there is no parent name here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassDeprecation {
    pub class_name: Option<String>,
    pub new_class_name: Option<String>,
    pub message: Option<String>,
    pub remove_version: Option<String>,
    pub stack_level: Option<usize>,
}

impl ClassDeprecation {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: Some(class_name.into()),
            ..Self::default()
        }
    }

    pub fn new_class_name(mut self, new_class_name: impl Into<String>) -> Self {
        self.new_class_name = Some(new_class_name.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn remove_version(mut self, remove_version: impl Into<String>) -> Self {
        self.remove_version = Some(remove_version.into());
        self
    }

    pub fn stack_level(mut self, stack_level: usize) -> Self {
        self.stack_level = Some(stack_level);
        self
    }
}

impl From<ClassDeprecation> for DeprecationRequest {
    fn from(options: ClassDeprecation) -> Self {
        Self {
            item_name: options.class_name,
            replacement_name: options.new_class_name,
            remove_version: options.remove_version,
            explicit_message: options.message,
            stack_level: options.stack_level,
            ..Self::new(ItemKind::Class)
        }
    }
}

/// Options for [`crate::DeprecationHandler::deprecate_method`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodDeprecation {
    pub method_name: Option<String>,
    pub class_name: Option<String>,
    pub new_method_name: Option<String>,
    pub message: Option<String>,
    pub remove_version: Option<String>,
    pub stack_level: Option<usize>,
}

impl MethodDeprecation {
    pub fn new(method_name: impl Into<String>) -> Self {
        Self {
            method_name: Some(method_name.into()),
            ..Self::default()
        }
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn new_method_name(mut self, new_method_name: impl Into<String>) -> Self {
        self.new_method_name = Some(new_method_name.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn remove_version(mut self, remove_version: impl Into<String>) -> Self {
        self.remove_version = Some(remove_version.into());
        self
    }

    pub fn stack_level(mut self, stack_level: usize) -> Self {
        self.stack_level = Some(stack_level);
        self
    }
}

impl From<MethodDeprecation> for DeprecationRequest {
    fn from(options: MethodDeprecation) -> Self {
        Self {
            item_name: options.method_name,
            replacement_name: options.new_method_name,
            remove_version: options.remove_version,
            parent_name: options.class_name,
            parent_kind: ItemKind::Method.parent_kind(),
            explicit_message: options.message,
            stack_level: options.stack_level,
            ..Self::new(ItemKind::Method)
        }
    }
}
