//! Symbol-name cleanup: promoted-global suffixes and special spellings.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// Canonical name for compiler-generated string literal symbols.
pub(crate) const STRING_LITERAL_NAME: &str = "string literal";

// `foo (.llvm.1234)` or `foo (.5.llvm.1234)`, as printed by demanglers.
static PROMOTED_DEMANGLED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" \((\.\d+)?\.llvm\.\d+\)$").expect("promoted-global pattern"));

// `foo.llvm.1234` or `foo.5.llvm.1234`, the raw spelling.
static PROMOTED_RAW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\.\d+)?\.llvm\.\d+$").expect("promoted-global pattern"));

/// Strips the rename suffix LLVM appends when promoting a local to a
/// global (`.llvm.<hash>`, possibly inside a demangled ` (…)` tail).
///
/// Names without the suffix are passed through untouched, so callers can
/// detect a strip by comparing lengths.
pub(crate) fn strip_promoted_global(name: &str) -> Cow<'_, str> {
    if !name.contains(".llvm.") {
        return Cow::Borrowed(name);
    }

    if name.ends_with(')') {
        PROMOTED_DEMANGLED.replace(name, "")
    } else {
        PROMOTED_RAW.replace(name, "")
    }
}

/// Maps special symbol spellings to their canonical names.
pub(crate) fn normalize(name: &str) -> &str {
    if name.starts_with(".L.str") {
        return STRING_LITERAL_NAME;
    }

    // `foo (.cfi)` is the CFI-instrumented alias of `foo`.
    name.strip_suffix(" (.cfi)").unwrap_or(name)
}
