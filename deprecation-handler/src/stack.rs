//! Call-stack inspection for deprecation notices
//!
//! A notice should point at the code that used the deprecated item, not at
//! the library that raised it. The walk here skips the frames of the
//! walker itself, then counts how many frames still live inside the
//! library's package; that count is the stack level handed to the sink.
//!
//! Frames are identified by the module path of their demangled symbol
//! name. In optimised builds inlined functions may disappear from the
//! stack entirely, in which case callers should pass an explicit level.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// This crate; its first frame marks the end of the unwinder's frames
const HANDLER_CRATE: &str = "deprecation_handler";

/// Crates whose frames belong to the stack walk itself
const INTERNAL_CRATES: &[&str] = &[HANDLER_CRATE, "backtrace"];

/// Standard library crates that may sit between the walker's own frames
/// (closure shims and the like); only skipped before the first external frame
const RUNTIME_CRATES: &[&str] = &["core", "alloc", "std"];

/// A source location a notice is attributed to
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallSite {
    pub file: Option<PathBuf>,
    pub line: Option<u32>,
}

impl CallSite {
    pub fn new(file: Option<PathBuf>, line: Option<u32>) -> Self {
        Self { file, line }
    }

    /// A location that could not be resolved
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_known(&self) -> bool {
        self.file.is_some()
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{}:{}", file.display(), line),
            (Some(file), None) => write!(f, "{}", file.display()),
            _ => write!(f, "<unknown>"),
        }
    }
}

/// The module path enclosing a demangled symbol.
///
/// `my_lib::client::Client::fetch` gives `my_lib::client::Client`, a trait
/// method `<my_lib::Foo as Trait>::f` gives its self type `my_lib::Foo`,
/// and closure segments are peeled off. A symbol with no path at all, such
/// as `main` or a C runtime function, has no namespace.
pub fn namespace_of(symbol: &str) -> Option<&str> {
    let symbol = symbol.trim();

    if let Some(qualified) = symbol.strip_prefix('<') {
        let self_type = qualified.trim_start_matches(['&', '*']);
        let end = self_type
            .find(" as ")
            .into_iter()
            .chain(self_type.find('>'))
            .chain(self_type.find('<'))
            .min()
            .unwrap_or(self_type.len());
        let path = self_type[..end].trim();
        return if path.contains("::") { Some(path) } else { None };
    }

    let mut path = match symbol.find('<') {
        Some(generics) => symbol[..generics].trim_end_matches(':'),
        None => symbol,
    };

    loop {
        let (head, last) = path.rsplit_once("::")?;
        if last == "{{closure}}" || is_symbol_hash(last) || last.is_empty() {
            path = head;
        } else {
            return Some(head).filter(|head| !head.is_empty());
        }
    }
}

/// The trait path of a qualified trait-method symbol.
///
/// `<u32 as my_lib::Api>::call` gives `my_lib::Api`. Library code running
/// in a trait impl on a foreign type is only recognisable by its trait.
pub fn trait_namespace_of(symbol: &str) -> Option<&str> {
    let qualified = symbol.trim().strip_prefix('<')?;
    let (_, rest) = qualified.split_once(" as ")?;
    let end = rest
        .find('>')
        .into_iter()
        .chain(rest.find('<'))
        .min()
        .unwrap_or(rest.len());
    let path = rest[..end].trim();
    if path.contains("::") {
        Some(path)
    } else {
        None
    }
}

/// Legacy mangling appends `::h` followed by sixteen hex digits
fn is_symbol_hash(segment: &str) -> bool {
    segment.len() == 17
        && segment.starts_with('h')
        && segment[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Check if `namespace` is `package` itself or nested under it.
///
/// Both `::` and `.` are accepted as separators. Empty names are never
/// inside anything.
pub fn is_within_package(namespace: &str, package: &str) -> bool {
    if namespace.is_empty() || package.is_empty() {
        return false;
    }

    match namespace.strip_prefix(package) {
        Some("") => true,
        Some(rest) => rest.starts_with("::") || rest.starts_with('.'),
        None => false,
    }
}

/// Count the leading namespaces that are inside `package`.
///
/// The sequence is consumed lazily and the count stops at the first frame
/// without a namespace or outside the package.
pub fn infer_stack_level<'a, I>(namespaces: I, package: &str) -> usize
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    namespaces
        .into_iter()
        .take_while(|namespace| namespace.is_some_and(|ns| is_within_package(ns, package)))
        .count()
}

/// Walk the live stack and count the frames inside `package`, starting
/// from the first frame outside this crate.
pub fn find_stack_level(package: &str) -> usize {
    let mut level = 0;
    walk_external_frames(|frame| {
        if frame.is_within(package) {
            level += 1;
            true
        } else {
            false
        }
    });
    level
}

/// Resolve the source location `stack_level` frames above the first frame
/// outside this crate.
pub fn caller_site(stack_level: usize) -> CallSite {
    let mut remaining = stack_level;
    let mut site = CallSite::unknown();
    walk_external_frames(|frame| {
        if remaining > 0 {
            remaining -= 1;
            return true;
        }
        site = CallSite::new(frame.file.map(Path::to_path_buf), frame.line);
        false
    });
    site
}

/// One logical frame; inlined calls each get their own
struct FrameInfo<'a> {
    namespace: Option<&'a str>,
    trait_namespace: Option<&'a str>,
    file: Option<&'a Path>,
    line: Option<u32>,
}

impl FrameInfo<'_> {
    /// Either the module path or, for trait impls, the trait path is inside
    fn is_within(&self, package: &str) -> bool {
        [self.namespace, self.trait_namespace]
            .into_iter()
            .flatten()
            .any(|ns| is_within_package(ns, package))
    }

    fn is_internal(&self) -> bool {
        INTERNAL_CRATES.iter().any(|package| self.is_within(package))
    }

    /// std glue such as closure shims; a library type implementing a std
    /// trait keeps its own module path and is not glue
    fn is_runtime_glue(&self) -> bool {
        self.namespace
            .is_some_and(|ns| RUNTIME_CRATES.iter().any(|package| is_within_package(ns, package)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prologue {
    /// Unwinder and `backtrace` frames before the handler's first frame
    Unwinder,
    /// Inside this crate's own frames
    Handler,
    Done,
}

/// Visit frames from the first one above this crate's own frames.
/// `visit` returns false to stop the walk.
///
/// Unnamed frames are only skipped before the first `deprecation_handler`
/// frame; past it, the first frame that is neither internal nor std glue
/// is external whether it resolved or not.
fn walk_external_frames<F>(mut visit: F)
where
    F: FnMut(&FrameInfo<'_>) -> bool,
{
    let mut prologue = Prologue::Unwinder;
    walk_logical_frames(|frame| {
        match prologue {
            Prologue::Unwinder => {
                if frame.is_within(HANDLER_CRATE) {
                    prologue = Prologue::Handler;
                }
                return true;
            }
            Prologue::Handler => {
                if frame.is_internal() || frame.is_runtime_glue() {
                    return true;
                }
                prologue = Prologue::Done;
            }
            Prologue::Done => {}
        }
        visit(frame)
    });
}

fn walk_logical_frames<F>(mut visit: F)
where
    F: FnMut(&FrameInfo<'_>) -> bool,
{
    backtrace::trace(|frame| {
        let mut keep_going = true;
        let mut resolved = false;

        backtrace::resolve_frame(frame, |symbol| {
            resolved = true;
            if !keep_going {
                return;
            }
            let name = symbol.name().map(|name| format!("{:#}", name));
            let info = FrameInfo {
                namespace: name.as_deref().and_then(namespace_of),
                trait_namespace: name.as_deref().and_then(trait_namespace_of),
                file: symbol.filename(),
                line: symbol.lineno(),
            };
            keep_going = visit(&info);
        });

        if !resolved {
            keep_going = visit(&FrameInfo {
                namespace: None,
                trait_namespace: None,
                file: None,
                line: None,
            });
        }

        keep_going
    });
}
