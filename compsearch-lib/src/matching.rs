use std::fmt;

use crate::composition::Composition;
use crate::error::Result;
use crate::formulas::{fuzzy_formula, fuzzy_formula_strict, group_formula};

/// How two compositions were found to be similar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    ExactFormula,
    AnonymizedFormula,
    ChemicalSystem,
    GroupFormula,
    FuzzyFormulaStrict,
    FuzzyFormula,
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ExactFormula => "exact formula",
            Self::AnonymizedFormula => "anonymized formula",
            Self::ChemicalSystem => "chemical system",
            Self::GroupFormula => "group formula",
            Self::FuzzyFormulaStrict => "fuzzy formula (strict)",
            Self::FuzzyFormula => "fuzzy formula",
        };
        f.write_str(label)
    }
}

/// Result of scoring one pair of formulas.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub score: u32,
    pub matches: Vec<MatchKind>,
}

/// Scores two parsed compositions.
///
/// Both sides are reduced first. An exact match scores 100 and
/// short-circuits; otherwise the looser heuristics accumulate, to at most 90.
pub fn score_compositions(a: &Composition, b: &Composition) -> MatchResult {
    let (c1, _) = a.reduced_composition_and_factor();
    let (c2, _) = b.reduced_composition_and_factor();

    if c1.almost_equals(&c2) {
        return MatchResult {
            score: 100,
            matches: vec![MatchKind::ExactFormula],
        };
    }

    let mut score = 0;
    let mut matches = Vec::new();

    if c1.anonymized_formula() == c2.anonymized_formula() {
        score += 15;
        matches.push(MatchKind::AnonymizedFormula);
    }

    if c1.elements().eq(c2.elements()) {
        score += 25;
        matches.push(MatchKind::ChemicalSystem);
    }

    if group_formula(&c1) == group_formula(&c2) {
        score += 30;
        matches.push(MatchKind::GroupFormula);
    }

    if fuzzy_formula_strict(&c1) == fuzzy_formula_strict(&c2) {
        score += 20;
        matches.push(MatchKind::FuzzyFormulaStrict);
    } else if fuzzy_formula(&c1) == fuzzy_formula(&c2) {
        score += 15;
        matches.push(MatchKind::FuzzyFormula);
    }

    MatchResult { score, matches }
}

/// Parses two formula strings and scores them with [`score_compositions`].
pub fn match_compositions(formula1: &str, formula2: &str) -> Result<MatchResult> {
    let c1 = Composition::parse(formula1)?;
    let c2 = Composition::parse(formula2)?;
    Ok(score_compositions(&c1, &c2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_short_circuits() {
        for formula in ["NaCl", "Fe2O3", "Y2SiO5", "Mg2Si"] {
            let result = match_compositions(formula, formula).unwrap();
            assert_eq!(result.score, 100);
            assert_eq!(result.matches, vec![MatchKind::ExactFormula]);
        }
    }

    #[test]
    fn test_exact_match_ignores_scale() {
        let result = match_compositions("Fe2O3", "Fe4O6").unwrap();
        assert_eq!(result.score, 100);
        assert_eq!(result.matches, vec![MatchKind::ExactFormula]);
    }

    #[test]
    fn test_fe2o3_vs_cr2o3() {
        let result = match_compositions("Fe2O3", "Cr2O3").unwrap();
        // same A3B2 pattern and same strict classes, but the groups differ
        assert_eq!(result.score, 35);
        assert_eq!(
            result.matches,
            vec![MatchKind::AnonymizedFormula, MatchKind::FuzzyFormulaStrict]
        );
    }

    #[test]
    fn test_nacl_vs_kcl() {
        let result = match_compositions("NaCl", "KCl").unwrap();
        // different chemical systems, but Na and K share group and class
        assert_eq!(result.score, 65);
        assert_eq!(
            result.matches,
            vec![
                MatchKind::AnonymizedFormula,
                MatchKind::GroupFormula,
                MatchKind::FuzzyFormulaStrict,
            ]
        );
    }

    #[test]
    fn test_loose_fuzzy_only_when_strict_fails() {
        // Na/Mg and Cl/S fall into one loose class each, but differ strictly
        let result = match_compositions("NaCl", "MgS").unwrap();
        assert_eq!(result.score, 30);
        assert_eq!(
            result.matches,
            vec![MatchKind::AnonymizedFormula, MatchKind::FuzzyFormula]
        );
    }

    #[test]
    fn test_chemical_system_without_ratio_match() {
        let result = match_compositions("CrO", "Cr2O3").unwrap();
        assert_eq!(result.score, 25);
        assert_eq!(result.matches, vec![MatchKind::ChemicalSystem]);
    }

    #[test]
    fn test_no_similarity_scores_zero() {
        let result = match_compositions("O2", "NaCl").unwrap();
        assert_eq!(result.score, 0);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_parse_errors_propagate() {
        assert!(match_compositions("Xx2", "NaCl").is_err());
        assert!(match_compositions("NaCl", "co").is_err());
    }

    #[test]
    fn test_label_strings() {
        assert_eq!(MatchKind::ExactFormula.to_string(), "exact formula");
        assert_eq!(MatchKind::FuzzyFormulaStrict.to_string(), "fuzzy formula (strict)");
    }
}
