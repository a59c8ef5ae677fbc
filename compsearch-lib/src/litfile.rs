//! Parsing of tag-annotated literature compound lists.

use crate::composition::Composition;
use crate::error::{CompSearchError, Result};

/// One formula line from a literature list, with the reference tags that
/// were in effect when it was read.
#[derive(Debug, Clone, PartialEq)]
pub struct LitEntry {
    /// 1-based position in the raw file, counting tag and blank lines.
    pub line_no: usize,
    /// Reduced pretty formula of the compound.
    pub formula: String,
    pub ref1: String,
    pub ref2: String,
    pub ref3: String,
}

/// Parses the text of a literature list.
///
/// Lines starting with `#`, `##` and `###` set the level-1/2/3 reference
/// tags for the formula lines that follow. A level-1 tag clears levels 2
/// and 3; a level-2 tag clears level 3. Blank lines are skipped but still
/// count toward line numbers. The first malformed formula aborts the load.
pub fn parse_lit_text(text: &str) -> Result<Vec<LitEntry>> {
    let mut entries = Vec::new();
    let mut ref1 = String::new();
    let mut ref2 = String::new();
    let mut ref3 = String::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if let Some(tag) = line.strip_prefix("###") {
            ref3 = tag.to_string();
        } else if let Some(tag) = line.strip_prefix("##") {
            ref2 = tag.to_string();
            ref3.clear();
        } else if let Some(tag) = line.strip_prefix('#') {
            ref1 = tag.to_string();
            ref2.clear();
            ref3.clear();
        } else if !line.is_empty() {
            let comp = Composition::parse(line).map_err(|e| CompSearchError::LitLine {
                line: line_no,
                text: line.to_string(),
                reason: e.to_string(),
            })?;
            entries.push(LitEntry {
                line_no,
                formula: comp.reduced_formula(),
                ref1: ref1.clone(),
                ref2: ref2.clone(),
                ref3: ref3.clone(),
            });
        }
    }

    Ok(entries)
}
