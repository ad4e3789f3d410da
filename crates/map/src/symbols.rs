//! The symbol builder: the stateful walk that turns the token stream into
//! symbols.

use log::warn;

use crate::{
    error::Error,
    line::split_object_section,
    name::{normalize, strip_promoted_global},
    token::{Level, Token, Tokenizer},
};

/// A symbol extracted from a link map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Resolved name. Empty when the map offers none; linker-synthesized
    /// records use `** `-prefixed pseudo-names such as
    /// `** lld merge strings` and `** CFI jump table`.
    pub name: String,
    /// Path of the object file the symbol came from. Empty for linker
    /// internals, LTO-cache objects and CFI jump tables.
    pub compile_unit: String,
    /// Output section owning the symbol.
    pub section: String,
    /// Start address (LMA).
    pub addr: u64,
    /// Size in bytes. Zero-sized symbols are legitimate and preserved.
    pub size: u64,
}

/// Sections whose records become symbols. Everything else (debug info,
/// exception tables, dynamic linking plumbing) is skipped wholesale.
fn is_useful_section(name: &str) -> bool {
    matches!(name, ".bss" | ".bss.rel.ro" | ".part.end" | ".rodata" | ".text")
        || name.starts_with(".data")
}

#[derive(Default)]
struct SymbolBuilder {
    syms: Vec<Symbol>,
    cur_section: Option<String>,
    cur_section_is_useful: bool,
    /// Byte offset of the mangled name inside a Level-2 paren value, right
    /// past the `.<section>.` prefix.
    mangled_start: usize,
    /// The last symbol is a Level-2 placeholder waiting for its first
    /// Level-3 record to fill in the real name.
    is_partial: bool,
    /// Level-3 records starting below this address are assembly labels,
    /// not symbols, and are dropped.
    next_usable_address: u64,
    in_partitions: bool,
    in_jump_table: bool,
    cur_obj: String,
    promoted_name_count: u64,
    jump_tables_count: u64,
    jump_entries_count: u64,
}

impl SymbolBuilder {
    fn process(&mut self, token: &Token<'_>) -> Result<(), Error> {
        match token.level {
            Level::Section => self.section_record(token),
            Level::Object if self.cur_section_is_useful => return self.object_record(token),
            Level::Symbol if self.cur_section_is_useful => return self.symbol_record(token),
            Level::Object | Level::Symbol => {}
        }

        Ok(())
    }

    fn section_record(&mut self, token: &Token<'_>) {
        // A section named `…_partition` opens a run of feature library
        // partitions; the `.part.end` section that reserves their memory
        // closes it. `.part.end` itself is kept, so partition mode ends
        // before the token is processed rather than after.
        if token.tok.ends_with("_partition") {
            self.in_partitions = true;
        } else if token.tok == ".part.end" {
            self.in_partitions = false;
        }

        if self.in_partitions {
            self.cur_section = None;
            self.cur_section_is_useful = false;
        } else {
            // Lets `.text._name` style paren values be cut down to `_name`
            // once the section is known.
            self.mangled_start = token.tok.len() + 1;
            self.cur_section_is_useful = is_useful_section(token.tok);
            self.cur_section = Some(token.tok.to_string());
        }
    }

    fn object_record(&mut self, token: &Token<'_>) -> Result<(), Error> {
        let Some((object, paren_value)) = split_object_section(token.tok) else {
            return Err(Error::MalformedObjectRecord(token.line.to_string()));
        };
        self.cur_obj = object.to_string();

        self.in_jump_table = paren_value.contains(".L.cfi.jumptable");
        let mangled_name = if self.in_jump_table {
            // A CFI jump table is stored as a single Level-2 symbol and its
            // Level-3 thunks are discarded. The object is `lto.tmp` or
            // similar, which would mislead downstream grouping.
            self.jump_tables_count += 1;
            self.cur_obj.clear();
            "** CFI jump table".to_string()
        } else {
            let mut name = paren_value.get(self.mangled_start..).unwrap_or("").to_string();
            self.is_partial = true;

            if object == "<internal>" {
                if self.cur_section.as_deref() == Some(".rodata") && name.is_empty() {
                    // LLD does not tell merged strings apart from other
                    // merged data (llvm.org/PR35248); every <internal>
                    // record in .rodata is reported as the string pool.
                    name = "** lld merge strings".to_string();
                } else {
                    // e.g. <internal>:(.text.thunk)
                    name = format!("** {name}");
                }

                self.is_partial = false;
                self.cur_obj.clear();
            } else if object == "lto.tmp" || object.contains("thinlto-cache") {
                self.cur_obj.clear();
            }

            name
        };

        // The symbol is created now in case no Level-3 records follow; if
        // some do, it is updated in place as the last element.
        self.syms.push(Symbol {
            name: mangled_name,
            compile_unit: self.cur_obj.clone(),
            section: self.cur_section.clone().unwrap_or_default(),
            addr: token.address,
            size: token.size,
        });
        // Level-3 addresses nest inside this record, so the size is not
        // added.
        self.next_usable_address = token.address;

        Ok(())
    }

    fn symbol_record(&mut self, token: &Token<'_>) -> Result<(), Error> {
        if self.in_jump_table {
            // Thunks inside a CFI jump table are not worth keeping as
            // symbols; they are only counted, and `__typeid_` rows are
            // annotations rather than thunks, so not even that.
            if !token.tok.starts_with("__typeid_") {
                self.jump_entries_count += 1;
            }

            return Ok(());
        }

        // `.L_MergedGlobals` containers only show up on 32-bit ARM builds;
        // their members are listed individually anyway.
        if token.tok.starts_with(".L_MergedGlobals") {
            return Ok(());
        }

        // The span decides whether the record forms a symbol. It beats
        // `size`, which is 0 for assembly functions, and it collapses runs
        // of records sharing one address down to the last of the run.
        // Legitimate aliases are collapsed too; downstream consumers
        // assume addresses are unique.
        let span = token.span.unwrap_or(0);
        if span == 0 {
            return Ok(());
        }

        let stripped = strip_promoted_global(token.tok);
        let tok = if stripped.len() != token.tok.len() {
            self.promoted_name_count += 1;
            stripped.into_owned()
        } else {
            token.tok.to_string()
        };
        let tok = normalize(&tok).to_string();

        // A placeholder that starts before its first named record keeps
        // its Level-2 name for the bytes in between; the current record
        // then forms a new symbol below.
        if self.is_partial && self.syms.last().is_some_and(|last| last.addr < token.address) {
            if let Some(last) = self.syms.last_mut() {
                last.size = token.address - last.addr;
            }
            self.next_usable_address = token.address;
            self.is_partial = false;
        }

        if self.is_partial {
            if let Some(last) = self.syms.last_mut() {
                last.name = tok;
                last.size = if token.size > 0 { token.size } else { last.size.min(span) };
                self.next_usable_address = token.address + last.size;
            }
            self.is_partial = false;
        } else if token.address >= self.next_usable_address {
            let size = if tok.starts_with("__typeid_") {
                if tok.ends_with("_byte_array") {
                    // CFI byte array tables carry a conventional size of 1;
                    // the span is the real extent.
                    if token.size != 1 {
                        return Err(Error::ByteArraySize(tok));
                    }
                    span
                } else {
                    // Likely `_global_addr` or `_unique_member`. Those live
                    // inside CFI tables and are normally suppressed by an
                    // earlier symbol; one surviving to this point deserves
                    // a look.
                    warn!("Unrecognized __typeid_ symbol at {:#x}", token.address);
                    return Ok(());
                }
            } else if token.size > 0 {
                token.size
            } else {
                span
            };

            self.syms.push(Symbol {
                name: tok,
                compile_unit: self.cur_obj.clone(),
                section: self.cur_section.clone().unwrap_or_default(),
                addr: token.address,
                size,
            });
            // Suppresses records with overlapping addresses, which are
            // labels from assembly sources rather than symbols.
            self.next_usable_address = token.address + size;
        }

        Ok(())
    }

    fn finish(self) -> Vec<Symbol> {
        if self.promoted_name_count > 0 {
            warn!("Found {} promoted global names", self.promoted_name_count);
        }
        if self.jump_tables_count > 0 {
            warn!(
                "Found {} CFI jump tables with {} total entries",
                self.jump_tables_count, self.jump_entries_count
            );
        }

        self.syms
    }
}

/// Parses a linker map in lld v1 format into its symbols.
///
/// Example format:
///
/// ```text
///     VMA      LMA     Size Align Out     In      Symbol
///     194      194       13     1 .interp
///     194      194       13     1         <internal>:(.interp)
///     400      400   123400    64 .text
///     600      600       14     4         obj/a.o:(.text.OUTLINED_FUNCTION_0)
///     600      600        0     1                 $x.3
///     600      600       14     1                 OUTLINED_FUNCTION_0
/// ```
///
/// Level 1 records are sections; only `.text`, `.rodata`, `.data*`,
/// `.bss*` and `.part.end` contribute symbols. Level 2 records name the
/// object and input section and become placeholder symbols; Level 3
/// records carry the symbol names and upgrade the placeholder, or append,
/// subject to address deduplication and assembly-label suppression.
///
/// Addresses are identical between a stripped and an unstripped binary, so
/// the result can be joined against either.
pub fn parse_link_map(content: &str) -> Result<Vec<Symbol>, Error> {
    let mut builder = SymbolBuilder::default();
    for token in Tokenizer::new(content)? {
        builder.process(&token?)?;
    }

    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "     VMA      LMA     Size Align Out     In      Symbol";

    fn record(address: u64, size: u64, level: usize, tok: &str) -> String {
        format!("{address:x} {address:x} {size:x} 1 {}{tok}", " ".repeat((level - 1) * 8))
    }

    fn map(records: &[String]) -> String {
        let mut content = String::from(HEADER);
        for record in records {
            content.push('\n');
            content.push_str(record);
        }
        content
    }

    fn sym(addr: u64, size: u64, name: &str, compile_unit: &str, section: &str) -> Symbol {
        Symbol {
            name: name.to_string(),
            compile_unit: compile_unit.to_string(),
            section: section.to_string(),
            addr,
            size,
        }
    }

    /// Runs the builder by hand so the counters stay observable.
    fn build(content: &str) -> (Vec<Symbol>, SymbolBuilder) {
        let mut builder = SymbolBuilder::default();
        for token in Tokenizer::new(content).unwrap() {
            builder.process(&token.unwrap()).unwrap();
        }
        (builder.syms.clone(), builder)
    }

    #[test]
    fn test_header_only_yields_no_symbols() {
        let content = "     VMA      LMA     Size Align Out     In      Symbol\n";
        assert_eq!(parse_link_map(content).unwrap(), []);
    }

    #[test]
    fn test_single_function() {
        let content = map(&[
            record(0x400, 0x123400, 1, ".text"),
            record(0x600, 0x14, 2, "obj.o:(.text.foo)"),
            record(0x600, 0x0, 3, "$x.0"),
            record(0x600, 0x14, 3, "foo"),
        ]);

        assert_eq!(
            parse_link_map(&content).unwrap(),
            [sym(0x600, 0x14, "foo", "obj.o", ".text")]
        );
    }

    #[test]
    fn test_merge_strings() {
        let content = map(&[
            record(0x4380, 0x20000, 1, ".rodata"),
            record(0x4394, 0x8a18, 2, "<internal>:(.rodata)"),
        ]);

        assert_eq!(
            parse_link_map(&content).unwrap(),
            [sym(0x4394, 0x8a18, "** lld merge strings", "", ".rodata")]
        );
    }

    #[test]
    fn test_internal_thunk_outside_rodata() {
        let content = map(&[
            record(0x400, 0x1000, 1, ".text"),
            record(0x500, 0x10, 2, "<internal>:(.text.thunk)"),
        ]);

        assert_eq!(
            parse_link_map(&content).unwrap(),
            [sym(0x500, 0x10, "** thunk", "", ".text")]
        );
    }

    #[test]
    fn test_promoted_global_is_stripped_and_counted() {
        let content = map(&[
            record(0x123800, 0x20000, 1, ".rodata"),
            record(0x123800, 0x4, 2, "obj:(.rodata.foo.llvm.1234)"),
            record(0x123800, 0x4, 3, "foo.llvm.1234"),
        ]);
        let (syms, builder) = build(&content);

        assert_eq!(syms, [sym(0x123800, 0x4, "foo", "obj", ".rodata")]);
        assert_eq!(builder.promoted_name_count, 1);
    }

    #[test]
    fn test_thumb_annotation_rounds_address() {
        let content = map(&[
            record(0x400, 0x1000, 1, ".text"),
            record(0x600, 0x14, 2, "obj.o:(.text.foo)"),
            record(0x600, 0x0, 3, "$t"),
            record(0x601, 0x14, 3, "foo"),
        ]);

        assert_eq!(
            parse_link_map(&content).unwrap(),
            [sym(0x600, 0x14, "foo", "obj.o", ".text")]
        );
    }

    #[test]
    fn test_cfi_jump_table() {
        let content = map(&[
            record(0x400, 0x10000, 1, ".text"),
            record(0x800, 0x40, 2, "lto.tmp:(.text..L.cfi.jumptable)"),
            record(0x800, 0x8, 3, "func1.cfi"),
            record(0x808, 0x8, 3, "__typeid_foo_global_addr"),
            record(0x810, 0x8, 3, "func2.cfi"),
        ]);
        let (syms, builder) = build(&content);

        assert_eq!(syms, [sym(0x800, 0x40, "** CFI jump table", "", ".text")]);
        assert_eq!(builder.jump_tables_count, 1);
        // `__typeid_` rows do not count as entries.
        assert_eq!(builder.jump_entries_count, 2);
    }

    #[test]
    fn test_aliased_addresses_keep_the_last_record() {
        let content = map(&[
            record(0x1000, 0x100, 1, ".rodata"),
            record(0x1000, 0x30, 2, "obj.o:(.rodata.stuff)"),
            record(0x1000, 0x0, 3, "a"),
            record(0x1000, 0x0, 3, "b"),
            record(0x1010, 0x20, 3, "c"),
        ]);

        // `a` has span 0 and is dropped; `b` wins the address and takes its
        // effective size from the span to `c`.
        assert_eq!(
            parse_link_map(&content).unwrap(),
            [
                sym(0x1000, 0x10, "b", "obj.o", ".rodata"),
                sym(0x1010, 0x20, "c", "obj.o", ".rodata"),
            ]
        );
    }

    #[test]
    fn test_partial_symbol_is_truncated() {
        let content = map(&[
            record(0x2000, 0x100, 1, ".data"),
            record(0x2000, 0x40, 2, "obj.o:(.data.blob)"),
            record(0x2010, 0x30, 3, "member"),
        ]);

        // The placeholder keeps its mangled name for the leading bytes.
        assert_eq!(
            parse_link_map(&content).unwrap(),
            [
                sym(0x2000, 0x10, "blob", "obj.o", ".data"),
                sym(0x2010, 0x30, "member", "obj.o", ".data"),
            ]
        );
    }

    #[test]
    fn test_assembly_labels_are_suppressed() {
        let content = map(&[
            record(0x400, 0x1000, 1, ".text"),
            record(0x7000, 0x30, 2, "obj/chacha-armv4.o:(.text.asm)"),
            record(0x7000, 0x30, 3, "fn1"),
            record(0x7010, 0x0, 3, "label1"),
            record(0x7020, 0x0, 3, "label2"),
        ]);

        assert_eq!(
            parse_link_map(&content).unwrap(),
            [sym(0x7000, 0x30, "fn1", "obj/chacha-armv4.o", ".text")]
        );
    }

    #[test]
    fn test_string_literals_are_renamed() {
        let content = map(&[
            record(0x3000, 0x100, 1, ".rodata"),
            record(0x3000, 0x10, 2, "obj.o:(.rodata..L.str.42)"),
            record(0x3000, 0x10, 3, ".L.str.42"),
        ]);

        assert_eq!(
            parse_link_map(&content).unwrap(),
            [sym(0x3000, 0x10, "string literal", "obj.o", ".rodata")]
        );
    }

    #[test]
    fn test_lto_objects_lose_their_compile_unit() {
        let content = map(&[
            record(0x400, 0x1000, 1, ".text"),
            record(0x500, 0x10, 2, "lto.tmp:(.text.func)"),
            record(0x500, 0x10, 3, "func"),
            record(0x510, 0x10, 2, "/b/s/thinlto-cache/llvmcache-9a1e:(.text.other)"),
            record(0x510, 0x10, 3, "other"),
        ]);

        assert_eq!(
            parse_link_map(&content).unwrap(),
            [sym(0x500, 0x10, "func", "", ".text"), sym(0x510, 0x10, "other", "", ".text")]
        );
    }

    #[test]
    fn test_merged_globals_are_skipped() {
        let content = map(&[
            record(0x900000, 0x100, 1, ".bss"),
            record(0x900000, 0x20, 2, "obj/foo.o:(.bss)"),
            record(0x900000, 0x10, 3, ".L_MergedGlobals"),
            record(0x900000, 0x4, 3, "g_counter"),
            record(0x900004, 0x4, 3, "g_flag"),
        ]);

        assert_eq!(
            parse_link_map(&content).unwrap(),
            [
                sym(0x900000, 0x4, "g_counter", "obj/foo.o", ".bss"),
                sym(0x900004, 0x4, "g_flag", "obj/foo.o", ".bss"),
            ]
        );
    }

    #[test]
    fn test_byte_array_size_comes_from_the_span() {
        let content = map(&[
            record(0x5000, 0x100, 1, ".rodata"),
            record(0x5000, 0x40, 2, "obj.o:(.rodata.x)"),
            record(0x5000, 0x8, 3, "zzz"),
            record(0x5008, 0x1, 3, "__typeid_a_byte_array"),
            record(0x5010, 0x8, 3, "after"),
        ]);

        assert_eq!(
            parse_link_map(&content).unwrap(),
            [
                sym(0x5000, 0x8, "zzz", "obj.o", ".rodata"),
                sym(0x5008, 0x8, "__typeid_a_byte_array", "obj.o", ".rodata"),
                sym(0x5010, 0x8, "after", "obj.o", ".rodata"),
            ]
        );
    }

    #[test]
    fn test_byte_array_with_wrong_size_is_fatal() {
        let content = map(&[
            record(0x5000, 0x100, 1, ".rodata"),
            record(0x5000, 0x40, 2, "obj.o:(.rodata.x)"),
            record(0x5000, 0x8, 3, "zzz"),
            record(0x5008, 0x2, 3, "__typeid_a_byte_array"),
        ]);

        assert!(matches!(parse_link_map(&content), Err(Error::ByteArraySize(_))));
    }

    #[test]
    fn test_unrecognized_typeid_is_skipped() {
        let content = map(&[
            record(0x5000, 0x100, 1, ".rodata"),
            record(0x5000, 0x40, 2, "obj.o:(.rodata.x)"),
            record(0x5000, 0x8, 3, "zzz"),
            record(0x5008, 0x1, 3, "__typeid_a_global_addr"),
            record(0x5010, 0x8, 3, "after"),
        ]);

        assert_eq!(
            parse_link_map(&content).unwrap(),
            [
                sym(0x5000, 0x8, "zzz", "obj.o", ".rodata"),
                sym(0x5010, 0x8, "after", "obj.o", ".rodata"),
            ]
        );
    }

    #[test]
    fn test_partitions_are_ignored_until_part_end() {
        let content = map(&[
            record(0x400, 0x1000, 1, ".text"),
            record(0x600, 0x14, 2, "obj.o:(.text.main)"),
            record(0x600, 0x14, 3, "main"),
            record(0x1000000, 0x5000, 1, "vr_partition"),
            record(0x1000000, 0x4000, 1, ".text"),
            record(0x1000000, 0x20, 2, "obj.o:(.text.vr_main)"),
            record(0x1000000, 0x20, 3, "vr_main"),
            record(0x0, 0x1000, 1, ".part.end"),
            record(0x0, 0x1000, 2, "<internal>:(.part.end)"),
        ]);

        assert_eq!(
            parse_link_map(&content).unwrap(),
            [
                sym(0x600, 0x14, "main", "obj.o", ".text"),
                sym(0x0, 0x1000, "** ", "", ".part.end"),
            ]
        );
    }

    #[test]
    fn test_uninteresting_sections_are_skipped() {
        let content = map(&[
            record(0x194, 0x13, 1, ".interp"),
            record(0x194, 0x13, 2, "<internal>:(.interp)"),
            record(0x1a8, 0x22d8, 1, ".ARM.exidx"),
            record(0x1b0, 0x8, 2, "obj/sandbox/syscall.o:(.ARM.exidx)"),
        ]);

        assert_eq!(parse_link_map(&content).unwrap(), []);
    }

    #[test]
    fn test_data_prefix_sections_are_useful() {
        let content = map(&[
            record(0x1ff610, 0x1000, 1, ".data.rel.ro"),
            record(0x1ff610, 0x30, 2, "obj.o:(.data.rel.ro.desc)"),
            record(0x1ff610, 0x30, 3, "desc"),
        ]);

        assert_eq!(
            parse_link_map(&content).unwrap(),
            [sym(0x1ff610, 0x30, "desc", "obj.o", ".data.rel.ro")]
        );
    }

    #[test]
    fn test_placeholders_may_share_an_address() {
        let content = map(&[
            record(0x9000, 0x100, 1, ".rodata"),
            record(0x9000, 0x0, 2, "obj.o:(.rodata.anon1)"),
            record(0x9000, 0x8, 2, "obj.o:(.rodata.anon2)"),
        ]);

        // A zero-sized placeholder followed by another object record at the
        // same address survives as-is; deduplication only applies to
        // symbol records.
        assert_eq!(
            parse_link_map(&content).unwrap(),
            [
                sym(0x9000, 0x0, "anon1", "obj.o", ".rodata"),
                sym(0x9000, 0x8, "anon2", "obj.o", ".rodata"),
            ]
        );
    }

    #[test]
    fn test_zero_size_is_preserved_when_span_allows() {
        let content = map(&[
            record(0x2828, 0x100, 1, ".rodata"),
            record(0x2828, 0x0, 2, "obj.o:(.rodata.anon.5)"),
            record(0x2828, 0x0, 3, ".Lanon.745d.5"),
            record(0x2828, 0x33, 2, "obj.o:(.rodata.anon.13)"),
            record(0x2828, 0x33, 3, ".Lanon.745d.13"),
        ]);

        // The first placeholder's only symbol record has span 0 against the
        // follow-up object record's contents, so the placeholder keeps its
        // zero size and mangled name.
        assert_eq!(
            parse_link_map(&content).unwrap(),
            [
                sym(0x2828, 0x0, "anon.5", "obj.o", ".rodata"),
                sym(0x2828, 0x33, ".Lanon.745d.13", "obj.o", ".rodata"),
            ]
        );
    }

    #[test]
    fn test_malformed_object_record_is_fatal() {
        let content = map(&[
            record(0x400, 0x1000, 1, ".text"),
            record(0x600, 0x14, 2, "obj.o.text.foo"),
        ]);

        assert!(matches!(parse_link_map(&content), Err(Error::MalformedObjectRecord(_))));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let content = map(&[
            record(0x400, 0x1000, 1, ".text"),
            record(0x600, 0x1c, 2, "obj.o:(.text.foo)"),
            record(0x600, 0x14, 3, "foo"),
            record(0x614, 0x8, 3, "bar (.cfi)"),
        ]);

        let first = parse_link_map(&content).unwrap();
        let second = parse_link_map(&content).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[1].name, "bar");
    }

    const BLOBFS_MAP: &str = include_str!("../tests/fixtures/blobfs.map");
    const BROWSER_ARM32_MAP: &str = include_str!("../tests/fixtures/browser_arm32.map");

    /// Strips the `#` comments the fixture files carry.
    fn load_fixture(raw: &str) -> String {
        raw.lines()
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_blobfs_map_goldens() {
        let (syms, builder) = build(&load_fixture(BLOBFS_MAP));

        assert_eq!(
            syms,
            [
                sym(0x4380, 0x14, "main", "obj/zircon/system/uapp/blobfs/blobfs.main.cc.o", ".rodata"),
                sym(0x4394, 0x8a18, "** lld merge strings", "", ".rodata"),
                sym(
                    0xcdb0,
                    0x27,
                    "string literal",
                    "obj/out/default/fidling/gen/sdk/fidl/fuchsia.io/\
                     fuchsia.io_tables.fuchsia.io.fidl.tables.c.o",
                    ".rodata",
                ),
                sym(
                    0xcdd8,
                    0x4,
                    "_ZN4core3fmtE",
                    "./exe.unstripped/\
                     component_manager.core-6a4b1e7af979d229.core.3ocx6h1n-cgu.0.rcgu.o.rcgu.o",
                    ".rodata",
                ),
                sym(
                    0x21000,
                    0x14,
                    "_start",
                    "/usr/local/google/home/yifeit/vg/out/default.zircon/\
                     user-arm64-clang.shlib/obj/system/ulib/c/crt1.Scrt1.cc.o",
                    ".text",
                ),
                sym(0x21014, 0x494, "main", "obj/zircon/system/uapp/blobfs/blobfs.main.cc.o", ".text"),
                sym(0x214a8, 0x10, "OUTLINED_FUNCTION_0", "", ".text"),
            ]
        );
        assert_eq!(builder.promoted_name_count, 1);
    }

    #[test]
    fn test_browser_arm32_map_goldens() {
        let (syms, builder) = build(&load_fixture(BROWSER_ARM32_MAP));

        assert_eq!(
            syms,
            [
                sym(
                    0x213200,
                    0xc0,
                    "std::__ndk1::(anonymous namespace)::small_primes",
                    "../../third_party/libc++_static.a(hash.o)",
                    ".rodata",
                ),
                sym(0x2132c0, 0x200, "** cfi", "", ".rodata"),
                sym(0x2132c0, 0x10, "__typeid_bar_byte_array", "", ".rodata"),
                sym(0x2132e0, 0x20, "kLogTag", "obj/base/base.logging.o", ".rodata"),
                sym(0x830000, 0x3f0, "ChaCha20_ctr32", "obj/third_party/boringssl/chacha-armv4.o", ".text"),
                sym(0x8303f0, 0x14, "tfunc", "obj/skia/skia.fontmgr.o", ".text"),
                sym(0x840000, 0x100, "** CFI jump table", "", ".text"),
                sym(0x900000, 0x4, "g_counter", "obj/gl/gl.context.o", ".bss"),
                sym(0x900004, 0x4, "g_flag", "obj/gl/gl.context.o", ".bss"),
                sym(0x0, 0x1000, "** ", "", ".part.end"),
            ]
        );
        assert_eq!(builder.jump_tables_count, 1);
        assert_eq!(builder.jump_entries_count, 2);
        assert_eq!(builder.promoted_name_count, 0);
    }

    #[test]
    fn test_symbols_lie_within_their_sections() {
        for raw in [BLOBFS_MAP, BROWSER_ARM32_MAP] {
            let content = load_fixture(raw);
            let sections = crate::parse_link_map_sections(&content).unwrap();
            for symbol in parse_link_map(&content).unwrap() {
                assert!(
                    sections.iter().any(|section| {
                        section.name == symbol.section
                            && section.addr <= symbol.addr
                            && symbol.addr + symbol.size <= section.addr + section.size
                    }),
                    "{symbol:?} lies outside its section",
                );
            }
        }
    }
}
