//! Notice text composition
//!
//! Every generated notice has the same shape:
//! "The `x` argument for the `run` method will be removed. Support for
//! this argument will be removed in a future version."

/// Compose the notice text for a deprecated item.
///
/// `item_kind` and `parent_kind` are the labels spliced into the sentence
/// (see [`crate::ItemKind::label`]). The parent clause is only written when
/// both `parent_name` and `parent_kind` are present. Empty optional fields
/// count as absent.
pub fn generate_message(
    item_kind: &str,
    item_name: &str,
    new_item_name: Option<&str>,
    remove_version: Option<&str>,
    parent_name: Option<&str>,
    parent_kind: Option<&str>,
) -> String {
    let mut message = format!("The `{}` {}", item_name, item_kind);

    if let (Some(parent_name), Some(parent_kind)) = (present(parent_name), present(parent_kind)) {
        message.push_str(&format!(" for the `{}` {}", parent_name, parent_kind));
    }

    match present(new_item_name) {
        Some(new_item_name) => {
            message.push_str(&format!(" will be superseded by `{}`. ", new_item_name))
        }
        None => message.push_str(" will be removed. "),
    }

    message.push_str(&format!("Support for this {} will be removed in ", item_kind));

    match present(remove_version) {
        Some(version) => message.push_str(&format!("version {}.", version)),
        None => message.push_str("a future version."),
    }

    message
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
