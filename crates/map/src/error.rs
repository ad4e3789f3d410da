use miette::Diagnostic;
use thiserror::Error;

/// Fatal ways a link map can fail to parse.
///
/// Only format violations end up here. Recoverable oddities (lines that do
/// not look like records at all, stray `__typeid_` rows) are reported
/// through the [`log`] facade and parsing continues.
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// The input had no lines at all.
    #[error("The link map is empty, I expected at least a header line.")]
    #[diagnostic(
        code(E001),
        help("Pass the whole map file, starting with the `VMA LMA Size Align Out In Symbol` header.")
    )]
    MissingHeader,

    /// The first non-empty line was not the v1 column header.
    #[error("The link map is not in lld v1 format.")]
    #[diagnostic(
        code(E002),
        help("Only the human-readable v1 format produced by lld's `--Map` option is supported.")
    )]
    UnrecognizedFormat,

    /// A record was indented deeper than the three known levels.
    #[error("A record is indented past the symbol level: `{0}`.")]
    #[diagnostic(
        code(E003),
        help("Levels are marked by runs of 0, 8 or 16 spaces after the `Align` column.")
    )]
    InvalidLevel(String),

    /// A symbol record showed up with no object record above it.
    #[error("A symbol record has no enclosing object record: `{0}`.")]
    #[diagnostic(
        code(E004),
        help("Symbol rows only make sense nested under an `object:(section)` row.")
    )]
    OrphanSymbol(String),

    /// An object record under a useful section did not have the
    /// `object:(section)` shape.
    #[error("An object record is not of the form `object:(section)`: `{0}`.")]
    #[diagnostic(code(E005), help("This usually means the map dialect is newer than v1."))]
    MalformedObjectRecord(String),

    /// A CFI byte-array record carried something other than its
    /// conventional size of 1.
    #[error("The byte-array record `{0}` does not have size 1.")]
    #[diagnostic(code(E006))]
    ByteArraySize(String),

    /// The synthetic end-of-stream record failed to lex. This is a bug in
    /// the parser, not in the input.
    #[error("The end-of-stream sentinel does not lex as a record.")]
    Sentinel,
}
