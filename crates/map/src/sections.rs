//! Section listing: the Level-1 reduction of a map.

use crate::{
    error::Error,
    token::{Level, Tokenizer},
};

/// An output section of the linked binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section name as spelled in the `Out` column.
    pub name: String,
    /// Start address (LMA).
    pub addr: u64,
    /// Size in bytes, spanning all nested records.
    pub size: u64,
}

/// Lists every output section of a link map, in file order.
///
/// Unlike [`parse_link_map`](crate::parse_link_map), nothing is filtered:
/// debug sections, exception tables and feature partitions are all
/// reported.
pub fn parse_link_map_sections(content: &str) -> Result<Vec<Section>, Error> {
    let mut sections = Vec::new();
    for token in Tokenizer::new(content)? {
        let token = token?;
        if token.level == Level::Section {
            sections.push(Section {
                name: token.tok.to_string(),
                addr: token.address,
                size: token.size,
            });
        }
    }

    Ok(sections)
}
