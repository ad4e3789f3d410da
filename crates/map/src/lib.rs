//! `seam-map` parses linker map files emitted by LLD in its “v1”
//! human-readable format.
//!
//! A map is an indentation-structured, three-level stream: Level 1 rows
//! (the `Out` column) are output sections, Level 2 rows (the `In` column)
//! are input object files with their sections, Level 3 rows (the `Symbol`
//! column) are symbols. [`parse_link_map`] walks that stream and produces
//! one [`Symbol`] per useful record, resolving the format's implicit
//! conventions along the way: zero sizes on assembly-emitted symbols,
//! `$t`/`$a` instruction-mode annotations, aliased addresses, merged
//! string pools, CFI jump tables, LLVM promoted-global renames, and
//! placeholder records that later rows upgrade in place.
//! [`parse_link_map_sections`] reduces the same stream to its Level 1
//! rows.
//!
//! [`transform_compile_unit`] is an independent helper that rewrites raw
//! compile-unit paths from a Fuchsia build tree into canonical forms.
//!
//! Fatal format violations surface as [`Error`]; non-fatal anomalies are
//! reported through the [`log`] facade and parsing continues. Parsing is
//! pure and synchronous: no I/O, no shared state, safe to run from many
//! threads on disjoint inputs.

#![deny(unused)]
#![deny(warnings)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::invalid_codeblock_attributes)]
#![deny(rustdoc::invalid_rust_codeblocks)]

mod compile_unit;
mod error;
mod line;
mod name;
mod sections;
mod symbols;
mod token;

pub use compile_unit::transform_compile_unit;
pub use error::Error;
pub use sections::{parse_link_map_sections, Section};
pub use symbols::{parse_link_map, Symbol};
