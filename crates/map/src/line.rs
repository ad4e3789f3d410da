//! Line-level recognizers for the shapes a map line can take.

use nom::{
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, map_res, rest},
    sequence::tuple,
    IResult,
};

/// One body line, reduced to the fields the token stream cares about.
///
/// `address` is the LMA column. The VMA and Align columns are recognized
/// and discarded; VMA and LMA are identical in practice and Align carries
/// no size information.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RawLine<'a> {
    pub(crate) address: u64,
    pub(crate) size: u64,
    /// Width of the space run between the `Align` column and the token.
    pub(crate) indent: usize,
    pub(crate) tok: &'a str,
}

// lld prints addresses and sizes in bare lowercase hex.
fn hex(input: &str) -> IResult<&str, u64, ()> {
    map_res(take_while1(|c: char| matches!(c, '0'..='9' | 'a'..='f')), |digits| {
        u64::from_str_radix(digits, 16)
    })(input)
}

impl<'a> RawLine<'a> {
    /// Lexes one line of the map body.
    ///
    /// Lines without the record shape (the header, blanks, comments) come
    /// back as `None` and are skipped by the caller.
    pub(crate) fn parse(line: &'a str) -> Option<Self> {
        let result: IResult<&str, _, ()> = all_consuming(tuple((
            space0,
            hex,
            space1,
            hex,
            space1,
            hex,
            space1,
            digit1,
            char(' '),
            take_while(|c| c == ' '),
            rest,
        )))(line);
        let (_, (_, _vma, _, address, _, size, _, _align, _, indent, tok)) = result.ok()?;

        Some(Self { address, size, indent: indent.len(), tok })
    }
}

/// Recognizes the v1 column header line.
pub(crate) fn is_header(line: &str) -> bool {
    all_consuming::<_, _, (), _>(tuple((
        space0,
        tag("VMA"),
        space0,
        tag("LMA"),
        space0,
        tag("Size"),
        space0,
        tag("Align"),
        space0,
        tag("Out"),
        space0,
        tag("In"),
        space0,
        tag("Symbol"),
    )))(line)
    .is_ok()
}

/// Splits a Level-2 token into its `(object, section)` halves.
///
/// The object part runs up to the last `:(` and the token must close with
/// `)`, so an archive member like `libfoo.a(bar.o):(.text.baz)` keeps its
/// inner parentheses on the object side.
pub(crate) fn split_object_section(tok: &str) -> Option<(&str, &str)> {
    let open = tok.strip_suffix(')')?;
    let at = open.rfind(":(")?;

    Some((&open[..at], &open[at + 2..]))
}
