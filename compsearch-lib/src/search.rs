use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::composition::Composition;
use crate::error::{CompSearchError, Result};
use crate::litfile::{parse_lit_text, LitEntry};
use crate::matching::{score_compositions, MatchKind};

const DEFAULT_LIT_TEXT: &str = include_str!("../../data/thermoelectrics.txt");

/// A literature entry that scored above zero against a search target.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub entry: LitEntry,
    pub score: u32,
    pub matches: Vec<MatchKind>,
}

/// A searchable literature compound list.
///
/// Built once from a resource and read-only afterwards.
#[derive(Debug)]
pub struct CompoundSearch {
    entries: Vec<LitEntry>,
}

impl CompoundSearch {
    /// Uses the bundled thermoelectrics list.
    pub fn new() -> Self {
        CompoundSearch {
            entries: parse_lit_text(DEFAULT_LIT_TEXT)
                .expect("bundled literature list is malformed"),
        }
    }

    /// Loads a literature list from a file, failing fast when it is missing.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CompSearchError::LitFileNotFound(
                path.display().to_string(),
            ));
        }
        let text = fs::read_to_string(path).map_err(CompSearchError::Io)?;
        Self::from_text(&text)
    }

    /// Parses a literature list from caller-supplied text.
    pub fn from_text(text: &str) -> Result<Self> {
        Ok(CompoundSearch {
            entries: parse_lit_text(text)?,
        })
    }

    pub fn entries(&self) -> &[LitEntry] {
        &self.entries
    }

    /// Scores every entry against the target formula.
    ///
    /// Entries scoring zero are omitted. Hits come back sorted by descending
    /// score, ties by line number.
    pub fn search(&self, target_formula: &str) -> Result<Vec<SearchHit>> {
        let target = Composition::parse(target_formula)?;

        let mut hits = Vec::new();
        for entry in &self.entries {
            let comp = Composition::parse(&entry.formula)?;
            let result = score_compositions(&comp, &target);
            if result.score > 0 {
                hits.push(SearchHit {
                    entry: entry.clone(),
                    score: result.score,
                    matches: result.matches,
                });
            }
        }

        hits.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.entry.line_no.cmp(&b.entry.line_no))
        });
        Ok(hits)
    }
}

impl Default for CompoundSearch {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes hits as a tab-separated table with a header row.
pub fn write_table<W: Write>(out: &mut W, hits: &[SearchHit]) -> io::Result<()> {
    writeln!(
        out,
        "formula_pretty\tscore\tmatches\tline_no\tref1\tref2\tref3"
    )?;
    for hit in hits {
        let matches = hit
            .matches
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            hit.entry.formula,
            hit.score,
            matches,
            hit.entry.line_no,
            hit.entry.ref1,
            hit.entry.ref2,
            hit.entry.ref3
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_list_loads() {
        let cs = CompoundSearch::new();
        assert!(!cs.entries().is_empty());

        // every stored formula must round-trip through the parser
        for entry in cs.entries() {
            assert!(Composition::parse(&entry.formula).is_ok(), "{}", entry.formula);
        }
    }

    #[test]
    fn test_bundled_list_exact_hit() {
        let cs = CompoundSearch::new();
        let hits = cs.search("Bi2Te3").unwrap();
        assert_eq!(hits[0].score, 100);
        assert_eq!(hits[0].entry.formula, "Bi2Te3");
        assert_eq!(hits[0].matches, vec![MatchKind::ExactFormula]);
    }

    #[test]
    fn test_missing_file_fails_fast() {
        let err = CompoundSearch::from_path("/no/such/literature.txt").unwrap_err();
        match err {
            CompSearchError::LitFileNotFound(path) => {
                assert!(path.contains("literature.txt"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_scores_omitted() {
        let cs = CompoundSearch::from_text("NaCl\n").unwrap();
        let hits = cs.search("O2").unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_end_to_end_scoring() {
        let cs = CompoundSearch::from_text("#Thermo\nFe2O3\nCrO\n##Sub\nAl2O3\n").unwrap();
        let hits = cs.search("Cr2O3").unwrap();
        assert_eq!(hits.len(), 3);

        // sorted by descending score
        assert_eq!(hits[0].entry.formula, "Fe2O3");
        assert_eq!(hits[0].entry.line_no, 2);
        assert_eq!(hits[0].score, 35);

        assert_eq!(hits[1].entry.formula, "CrO");
        assert_eq!(hits[1].entry.line_no, 3);
        assert_eq!(hits[1].score, 25);
        assert_eq!(hits[1].matches, vec![MatchKind::ChemicalSystem]);

        assert_eq!(hits[2].entry.formula, "Al2O3");
        assert_eq!(hits[2].entry.line_no, 5);
        assert_eq!(hits[2].score, 15);
        assert_eq!(hits[2].entry.ref1, "Thermo");
        assert_eq!(hits[2].entry.ref2, "Sub");
    }

    #[test]
    fn test_score_ties_keep_line_order() {
        let cs = CompoundSearch::from_text("NaCl\nKCl\n").unwrap();
        let hits = cs.search("RbCl").unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].score, hits[1].score);
        assert_eq!(hits[0].entry.line_no, 1);
        assert_eq!(hits[1].entry.line_no, 2);
    }

    #[test]
    fn test_invalid_target_is_an_error() {
        let cs = CompoundSearch::from_text("NaCl\n").unwrap();
        assert!(cs.search("Xx2").is_err());
    }

    #[test]
    fn test_write_table() {
        let cs = CompoundSearch::from_text("#Ref\nNaCl\n").unwrap();
        let hits = cs.search("KCl").unwrap();

        let mut buf = Vec::new();
        write_table(&mut buf, &hits).unwrap();
        let table = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "formula_pretty\tscore\tmatches\tline_no\tref1\tref2\tref3"
        );
        assert_eq!(
            lines[1],
            "NaCl\t65\tanonymized formula, group formula, fuzzy formula (strict)\t2\tRef\t\t"
        );
    }
}
