//! The token stream: body lines annotated with nesting level and span.

use crate::{
    error::Error,
    line::{self, RawLine},
};

/// Nesting depth of a record, inferred from its indentation.
///
/// The three levels line up with the `Out`, `In` and `Symbol` columns of
/// the header: output sections, input object records, symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Level {
    /// An output section or `PROVIDE_HIDDEN` row (`Out` column).
    Section,
    /// An object path and input section, or `<internal>:…` (`In` column).
    Object,
    /// A symbol name or special spelling such as `.L_MergedGlobals`
    /// (`Symbol` column).
    Symbol,
}

impl Level {
    fn from_indent(indent: usize) -> Option<Self> {
        match indent / 8 + 1 {
            1 => Some(Self::Section),
            2 => Some(Self::Object),
            3 => Some(Self::Symbol),
            _ => None,
        }
    }
}

/// ARM instruction-set state toggled by annotation rows.
///
/// lld prints Thumb symbol addresses with bit 0 set. Alignment is not
/// guaranteed for all symbols (data, or x86), so the rounding is applied
/// only while a `$t` annotation is in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InstructionMode {
    ArmOrNeutral,
    Thumb,
}

/// What an annotation row does to the instruction mode.
enum Annotation {
    EnterThumb,
    EnterArm32,
    Keep,
}

/// Decides whether a Level-3 token is an ARM annotation.
///
/// Annotations match `$t` and `$d.1`, but not `$_21::invoke`.
fn arm_annotation(tok: &str) -> Option<Annotation> {
    let bytes = tok.as_bytes();
    if !tok.starts_with('$') || !(bytes.len() == 2 || (bytes.len() >= 3 && bytes[2] == b'.')) {
        return None;
    }

    if tok.starts_with("$t") {
        Some(Annotation::EnterThumb)
    } else if tok.starts_with("$a") {
        Some(Annotation::EnterArm32)
    } else {
        Some(Annotation::Keep)
    }
}

/// One record of the map body, annotated for the downstream builders.
#[derive(Debug)]
pub(crate) struct Token<'a> {
    /// The source line, kept for error reporting.
    pub(crate) line: &'a str,
    pub(crate) address: u64,
    pub(crate) size: u64,
    pub(crate) level: Level,
    /// Distance from this record's address to the next Level-3 address, or
    /// to the end of the enclosing Level-2 record for the last child. Only
    /// present on Level-3 records.
    pub(crate) span: Option<u64>,
    pub(crate) tok: &'a str,
}

/// A record held back until its successor arrives.
struct Pending<'a> {
    line: &'a str,
    address: u64,
    size: u64,
    level: Level,
    tok: &'a str,
}

/// Synthetic tail record so the last real record gets a span too.
const SENTINEL: &str = "0 0 0 0 THE_END";

/// Record stream over a map file.
///
/// A Level-3 record can carry `size == 0` (assembly symbols, mostly), so
/// each one is given a *span*: the address difference to the next Level-3
/// record, or, for the last child, to the end address of the enclosing
/// Level-2 record. Both need one record of lookahead, which is what the
/// `pending` slot provides; [`SENTINEL`] flushes the final record.
///
/// Annotation rows are consumed here and never reach the stream.
pub(crate) struct Tokenizer<'a> {
    lines: std::str::Lines<'a>,
    pending: Option<Pending<'a>>,
    /// End address of the most recently emitted Level-2 record.
    level2_end_address: u64,
    mode: InstructionMode,
    sentinel_done: bool,
}

impl<'a> Tokenizer<'a> {
    /// Wraps a whole map file.
    ///
    /// The first non-empty line must be the v1 column header; everything
    /// after it is the body.
    pub(crate) fn new(content: &'a str) -> Result<Self, Error> {
        let mut lines = content.lines();
        let header = loop {
            match lines.next() {
                None => return Err(Error::MissingHeader),
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => break line,
            }
        };
        if !line::is_header(header) {
            return Err(Error::UnrecognizedFormat);
        }

        Ok(Self {
            lines,
            pending: None,
            level2_end_address: 0,
            mode: InstructionMode::ArmOrNeutral,
            sentinel_done: false,
        })
    }

    /// Feeds one lexed line in, possibly releasing the pending record.
    fn step(&mut self, line: &'a str, raw: RawLine<'a>) -> Result<Option<Token<'a>>, Error> {
        let Some(level) = Level::from_indent(raw.indent) else {
            return Err(Error::InvalidLevel(line.to_string()));
        };

        let mut address = raw.address;
        if level == Level::Symbol {
            match &self.pending {
                Some(pending) if pending.level != Level::Section => {}
                _ => return Err(Error::OrphanSymbol(line.to_string())),
            }

            if let Some(annotation) = arm_annotation(raw.tok) {
                match annotation {
                    Annotation::EnterThumb => self.mode = InstructionMode::Thumb,
                    Annotation::EnterArm32 => self.mode = InstructionMode::ArmOrNeutral,
                    Annotation::Keep => {}
                }

                return Ok(None);
            }

            if self.mode == InstructionMode::Thumb {
                address &= !1;
            }
        } else {
            // Resets on leaving Level 3.
            self.mode = InstructionMode::ArmOrNeutral;
        }

        let emitted = self.pending.take().map(|pending| {
            let span = match pending.level {
                Level::Symbol => {
                    let end = if level == Level::Symbol { address } else { self.level2_end_address };
                    Some(end.wrapping_sub(pending.address))
                }
                Level::Object => {
                    self.level2_end_address = pending.address + pending.size;
                    None
                }
                Level::Section => None,
            };

            Token {
                line: pending.line,
                address: pending.address,
                size: pending.size,
                level: pending.level,
                span,
                tok: pending.tok,
            }
        });

        self.pending = Some(Pending { line, address, size: raw.size, level, tok: raw.tok });

        Ok(emitted)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(next_line) = self.lines.next() else {
                if self.sentinel_done {
                    return None;
                }
                self.sentinel_done = true;

                let Some(raw) = RawLine::parse(SENTINEL) else {
                    return Some(Err(Error::Sentinel));
                };

                // The sentinel itself stays in the pending slot and is
                // never emitted.
                return match self.step(SENTINEL, raw) {
                    Ok(token) => token.map(Ok),
                    Err(error) => Some(Err(error)),
                };
            };

            // Anything that does not lex as a record is skipped.
            let Some(raw) = RawLine::parse(next_line) else { continue };

            match self.step(next_line, raw) {
                Ok(Some(token)) => return Some(Ok(token)),
                Ok(None) => continue,
                Err(error) => return Some(Err(error)),
            }
        }
    }
}
