//! Canonicalization of compile-unit paths from a Fuchsia build tree.
//!
//! Link maps record compile units as the paths the build system fed to the
//! linker: `rcgu.o` codegen units for Rust, `obj/…` paths for C/C++, and
//! archive members for static libraries. The cascade below rewrites the
//! recognizable shapes into stable, layout-independent forms; Rust
//! compilation units collapse into a `[crate: <name>]` tag.

use once_cell::sync::Lazy;
use regex::Regex;

// ./exe.unstripped/component_manager.alloc-54127f36ba192482.alloc.4k1iwrm2-cgu.0.rcgu.o.rcgu.o
static LIBRARY_CRATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/[a-zA-Z0-9_]+\.[a-zA-Z0-9_-]+\.([a-zA-Z0-9_]+)\.[a-zA-Z0-9-]+.*\.rcgu\.o$")
        .expect("library crate pattern")
});

// ./exe.unstripped/component_manager.component_manager.7rcbfp3g-cgu.0.rcgu.o
static BIN_CRATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/[a-zA-Z0-9_-]+\.([a-zA-Z0-9_]+)\.[a-zA-Z0-9-]+.*\.rcgu\.o$")
        .expect("bin crate pattern")
});

// foobar.rlib(libregex_syntax-579ced0738b0164d-579ced0738b0164d.regex_syntax.c02sfxfu-cgu.13.rcgu.o)
static RLIB_MEMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"rlib\([a-zA-Z_\-0-9]+\.([a-zA-Z0-9_]+)\.[a-zA-Z0-9-]+.*\.rcgu\.o\)$")
        .expect("rlib member pattern")
});

// …/out/default.zircon/user-arm64-clang.shlib/obj/system/ulib/c/crt1.Scrt1.cc.o
static ZIRCON_ULIB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/out/[a-zA-Z0-9_-]+\.zircon/.*/obj/system/ulib/(.*)\.o$")
        .expect("zircon ulib pattern")
});

// c/crt1.Scrt1.cc -> c/Scrt1.cc
static ZIRCON_FILE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/[a-zA-Z0-9\-_]+\.([a-zA-Z0-9\-_]+\.(cc|c))$").expect("zircon file pattern")
});

// obj/out/default/fidling/gen/sdk/fidl/fuchsia.io/fuchsia/io/llcpp/fuchsia.io_llcpp.fidl.cc.o
static FIDLING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^obj/out/.*/fidling/gen/(.*)\.o$").expect("fidling pattern"));

// fuchsia.io_llcpp.fidl.cc -> fidl.cc
static FIDLING_FILE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9\-\.]+_[a-zA-Z0-9\-_]+\.([a-zA-Z0-9\-\.]+\.(c|cc))$")
        .expect("fidling file pattern")
});

// obj/zircon/public/lib/fidl_base/libfidl_base.a(libfidl_base.decoding.cc.o)
static ZIRCON_FIDL_MEMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^obj/zircon/public/lib/fidl_base/libfidl_base\.a\(libfidl_base\.(.*)\.cc\.o\)$")
        .expect("fidl_base member pattern")
});

const RING_ARCHIVE: &str = "obj/third_party/rust_crates/compat/ring/libring-core.a";

/// Replaces the first match of `pattern` in `path` with `keep` followed by
/// the pattern's first capture. `None` when the pattern does not fire,
/// which callers treat as "not actually that shape".
fn strip_member_prefix(pattern: &Regex, path: &str, keep: &str) -> Option<String> {
    let captures = pattern.captures(path)?;
    let matched = captures.get(0)?;
    let kept = captures.get(1)?;

    Some(format!("{}{}{}{}", &path[..matched.start()], keep, kept.as_str(), &path[matched.end()..]))
}

/// Rewrites a raw compile-unit path into a canonical form.
///
/// Returns the canonical path and, for Rust compilation units, the crate
/// name that was folded into it. Paths matching no known shape return
/// `None` and should be kept as-is by the caller. Rules are tried in a
/// fixed order and the first match wins.
pub fn transform_compile_unit(compile_unit: &str) -> Option<(String, Option<String>)> {
    for pattern in [&LIBRARY_CRATE, &BIN_CRATE, &RLIB_MEMBER] {
        if let Some(captures) = pattern.captures(compile_unit) {
            let crate_name = &captures[1];
            return Some((format!("[crate: {crate_name}]"), Some(crate_name.to_string())));
        }
    }

    if let Some(captures) = ZIRCON_ULIB.captures(compile_unit) {
        // The last path component repeats the library name as a prefix,
        // e.g. `c/crt1.Scrt1.cc` -> `c/Scrt1.cc`.
        if let Some(path) = strip_member_prefix(&ZIRCON_FILE_PREFIX, &captures[1], "/") {
            return Some((format!("../../zircon/system/ulib/{path}"), None));
        }
    }

    if let Some(captures) = FIDLING.captures(compile_unit) {
        // Generated FIDL bindings repeat the library name too, e.g.
        // `fuchsia.io_llcpp.fidl.cc` -> `fidl.cc`.
        if let Some(path) = strip_member_prefix(&FIDLING_FILE_PREFIX, &captures[1], "") {
            return Some((format!("fidling/gen/{path}"), None));
        }
    }

    if let Some(captures) = ZIRCON_FIDL_MEMBER.captures(compile_unit) {
        return Some((format!("../../zircon/system/ulib/fidl/{}.cc", &captures[1]), None));
    }

    if compile_unit.starts_with(RING_ARCHIVE) {
        return Some(("[crate: ring]".to_string(), Some("ring".to_string())));
    }

    None
}
