//! The deprecation handler
//!
//! A library creates one [`DeprecationHandler`] bound to its own package
//! name and calls one of the `deprecate_*` methods wherever a deprecated
//! item is used. Each call composes (or takes) the notice text, works out
//! how many frames belong to the library, and emits exactly one warning.

use crate::error::DeprecationError;
use crate::request::{
    ArgumentDeprecation, AttributeDeprecation, ClassDeprecation, DeprecationRequest,
    MethodDeprecation,
};
use crate::sink::{LogSink, WarningCategory, WarningSink};
use crate::stack;
use log::trace;

/// Emits deprecation notices on behalf of one package
#[derive(Debug)]
pub struct DeprecationHandler<S = LogSink> {
    package_name: String,
    sink: S,
}

impl DeprecationHandler<LogSink> {
    /// Create a handler that logs notices, with the warning policy taken
    /// from the environment.
    ///
    /// `package_name` is the root module path of the calling library, e.g.
    /// `env!("CARGO_CRATE_NAME")`.
    pub fn new(package_name: impl Into<String>) -> Self {
        Self::with_sink(package_name, LogSink::from_env())
    }
}

impl<S: WarningSink> DeprecationHandler<S> {
    /// Create a handler that delivers notices to `sink`
    pub fn with_sink(package_name: impl Into<String>, sink: S) -> Self {
        Self {
            package_name: package_name.into(),
            sink,
        }
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Count the frames above the handler that belong to this package
    pub fn find_stack_level(&self) -> usize {
        stack::find_stack_level(&self.package_name)
    }

    /// Deliver `message`, inferring the stack level when none is given
    pub fn show_deprecation_message(
        &self,
        message: &str,
        stack_level: Option<usize>,
    ) -> Result<(), DeprecationError> {
        let stack_level = match stack_level {
            Some(level) => level,
            None => self.find_stack_level(),
        };
        trace!(
            "emitting deprecation notice for {} at stack level {}",
            self.package_name,
            stack_level
        );
        self.sink
            .emit(message, WarningCategory::Deprecation, stack_level)
    }

    /// Resolve and deliver a fully described request
    pub fn deprecate(&self, request: DeprecationRequest) -> Result<(), DeprecationError> {
        let message = request.resolve_message()?;
        self.show_deprecation_message(&message, request.stack_level)
    }

    /// Show a notice for a deprecated argument of a method.
    ///
    /// ```
    /// use deprecation_handler::{ArgumentDeprecation, DeprecationHandler, RecordingSink};
    ///
    /// let handler = DeprecationHandler::with_sink("my_lib", RecordingSink::new());
    /// handler
    ///     .deprecate_argument(ArgumentDeprecation::new("x").method_name("run"))
    ///     .unwrap();
    /// assert_eq!(
    ///     handler.sink().last().unwrap().message,
    ///     "The `x` argument for the `run` method will be removed. \
    ///      Support for this argument will be removed in a future version."
    /// );
    /// ```
    pub fn deprecate_argument(&self, options: ArgumentDeprecation) -> Result<(), DeprecationError> {
        self.deprecate(options.into())
    }

    /// Show a notice for a deprecated attribute of a class
    pub fn deprecate_attribute(
        &self,
        options: AttributeDeprecation,
    ) -> Result<(), DeprecationError> {
        self.deprecate(options.into())
    }

    /// Show a notice for a deprecated class
    pub fn deprecate_class(&self, options: ClassDeprecation) -> Result<(), DeprecationError> {
        self.deprecate(options.into())
    }

    /// Show a notice for a deprecated method of a class
    pub fn deprecate_method(&self, options: MethodDeprecation) -> Result<(), DeprecationError> {
        self.deprecate(options.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;
    use pretty_assertions::assert_eq;

    fn handler() -> DeprecationHandler<RecordingSink> {
        DeprecationHandler::with_sink("my_lib", RecordingSink::new())
    }

    #[test]
    fn test_explicit_stack_level_is_used() {
        let handler = handler();
        handler.show_deprecation_message("notice", Some(5)).unwrap();

        let warning = handler.sink().last().unwrap();
        assert_eq!(warning.message, "notice");
        assert_eq!(warning.stack_level, 5);
        assert_eq!(warning.category, WarningCategory::Deprecation);
    }

    #[test]
    fn test_inferred_stack_level_outside_package() {
        // these tests live in deprecation_handler, not my_lib
        let handler = handler();
        handler.show_deprecation_message("notice", None).unwrap();
        assert_eq!(handler.sink().last().unwrap().stack_level, 0);
    }

    #[test]
    fn test_missing_name_emits_nothing() {
        let handler = handler();
        let err = handler
            .deprecate_method(MethodDeprecation::default())
            .unwrap_err();
        assert!(!err.is_escalation());
        assert!(handler.sink().is_empty());
    }

    #[test]
    fn test_one_warning_per_call() {
        let handler = handler();
        handler
            .deprecate_attribute(AttributeDeprecation::new("size").class_name("Buffer"))
            .unwrap();
        handler
            .deprecate_class(ClassDeprecation::new("Buffer").new_class_name("Bytes"))
            .unwrap();
        assert_eq!(handler.sink().len(), 2);
    }

    #[test]
    fn test_handler_over_borrowed_sink() {
        let sink = RecordingSink::new();
        let handler = DeprecationHandler::with_sink("my_lib", &sink);
        handler
            .deprecate_class(ClassDeprecation::new("Foo").stack_level(1))
            .unwrap();
        assert_eq!(sink.last().unwrap().stack_level, 1);
        assert_eq!(handler.package_name(), "my_lib");
    }
}
