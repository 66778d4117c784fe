use deprecation_handler::{
    ArgumentDeprecation, AttributeDeprecation, ClassDeprecation, DeprecationError,
    DeprecationHandler, ItemKind, MethodDeprecation, RecordingSink, WarningCategory,
};
use pretty_assertions::assert_eq;

fn handler() -> DeprecationHandler<RecordingSink> {
    DeprecationHandler::with_sink("my_lib", RecordingSink::new())
}

fn last_message(handler: &DeprecationHandler<RecordingSink>) -> String {
    handler.sink().last().expect("a warning was emitted").message
}

#[test]
fn test_class_superseded_with_version() {
    let handler = handler();
    handler
        .deprecate_class(
            ClassDeprecation::new("Foo")
                .new_class_name("Bar")
                .remove_version("2.0"),
        )
        .unwrap();

    assert_eq!(
        last_message(&handler),
        "The `Foo` class will be superseded by `Bar`. Support for this class will be removed in version 2.0."
    );
}

#[test]
fn test_argument_removed_in_future_version() {
    let handler = handler();
    handler
        .deprecate_argument(ArgumentDeprecation::new("x").method_name("run"))
        .unwrap();

    assert_eq!(
        last_message(&handler),
        "The `x` argument for the `run` method will be removed. Support for this argument will be removed in a future version."
    );
}

#[test]
fn test_attribute_uses_class_parent() {
    let handler = handler();
    handler
        .deprecate_attribute(
            AttributeDeprecation::new("timeout")
                .class_name("Session")
                .new_attribute_name("deadline")
                .remove_version("4.0"),
        )
        .unwrap();

    assert_eq!(
        last_message(&handler),
        "The `timeout` attribute for the `Session` class will be superseded by `deadline`. Support for this attribute will be removed in version 4.0."
    );
}

#[test]
fn test_method_uses_class_parent() {
    let handler = handler();
    handler
        .deprecate_method(MethodDeprecation::new("fetch").class_name("Client"))
        .unwrap();

    assert_eq!(
        last_message(&handler),
        "The `fetch` method for the `Client` class will be removed. Support for this method will be removed in a future version."
    );
}

#[test]
fn test_explicit_message_is_delivered_verbatim() {
    let handler = handler();
    handler
        .deprecate_argument(
            ArgumentDeprecation::new("x")
                .method_name("run")
                .new_argument_name("y")
                .remove_version("1.0")
                .message("custom text"),
        )
        .unwrap();
    handler
        .deprecate_attribute(AttributeDeprecation::default().message("custom text"))
        .unwrap();
    handler
        .deprecate_class(ClassDeprecation::new("Foo").message("custom text"))
        .unwrap();
    handler
        .deprecate_method(
            MethodDeprecation::new("fetch")
                .message("custom text")
                .stack_level(2),
        )
        .unwrap();

    let warnings = handler.sink().warnings();
    assert_eq!(warnings.len(), 4);
    for warning in &warnings {
        assert_eq!(warning.message, "custom text");
        assert_eq!(warning.category, WarningCategory::Deprecation);
    }
    assert_eq!(warnings[3].stack_level, 2);
}

#[test]
fn test_missing_name_and_message() {
    let handler = handler();
    let err = handler
        .deprecate_argument(ArgumentDeprecation::default().method_name("run"))
        .unwrap_err();

    assert_eq!(
        err,
        DeprecationError::MissingItemName {
            kind: ItemKind::Argument
        }
    );
    assert!(handler.sink().is_empty());
}

#[test]
fn test_warnings_serialize_to_json() {
    let handler = handler();
    handler
        .deprecate_class(ClassDeprecation::new("Foo").stack_level(1))
        .unwrap();

    let json = serde_json::to_value(handler.sink().last().unwrap()).unwrap();
    assert_eq!(json["category"], "Deprecation");
    assert_eq!(json["stack_level"], 1);
}

#[test]
fn test_handler_is_shareable_across_threads() {
    let handler = handler();
    std::thread::scope(|scope| {
        for i in 0..4 {
            let handler = &handler;
            scope.spawn(move || {
                handler
                    .deprecate_class(ClassDeprecation::new(format!("Old{}", i)).stack_level(0))
                    .unwrap();
            });
        }
    });
    assert_eq!(handler.sink().len(), 4);
}

mod library {
    use deprecation_handler::{DeprecationHandler, MethodDeprecation, RecordingSink};

    #[inline(never)]
    pub fn old_api(handler: &DeprecationHandler<RecordingSink>) {
        handler
            .deprecate_method(MethodDeprecation::new("old_api"))
            .unwrap();
    }

    #[inline(never)]
    pub fn wrapper(handler: &DeprecationHandler<RecordingSink>) {
        old_api(handler);
    }

    pub trait Api {
        fn call(&self, handler: &DeprecationHandler<RecordingSink>);
    }

    impl Api for u32 {
        #[inline(never)]
        fn call(&self, handler: &DeprecationHandler<RecordingSink>) {
            old_api(handler);
        }
    }

    #[inline(never)]
    pub fn through_trait_impl(handler: &DeprecationHandler<RecordingSink>) {
        7u32.call(handler);
    }
}

#[test]
fn test_inferred_level_skips_library_frames() {
    let handler = DeprecationHandler::with_sink("entry_points::library", RecordingSink::new());

    library::old_api(&handler);
    assert_eq!(handler.sink().last().unwrap().stack_level, 1);

    library::wrapper(&handler);
    assert_eq!(handler.sink().last().unwrap().stack_level, 2);
}

#[test]
fn test_inferred_level_counts_trait_impls_on_foreign_types() {
    let handler = DeprecationHandler::with_sink("entry_points::library", RecordingSink::new());

    // through_trait_impl -> <u32 as library::Api>::call -> old_api
    library::through_trait_impl(&handler);
    assert_eq!(handler.sink().last().unwrap().stack_level, 3);
}

#[test]
fn test_inferred_level_for_foreign_package() {
    let handler = DeprecationHandler::with_sink("some_other_crate", RecordingSink::new());
    library::old_api(&handler);
    assert_eq!(handler.sink().last().unwrap().stack_level, 0);
}
