//! Alternative formula renderings used as similarity heuristics.

use std::collections::{BTreeMap, HashMap};

use crate::composition::{format_amount, reduction_factor, Composition};
use crate::elements::Element;

// Al, Ga, In, Sn, Tl, Pb, Bi
const POST_TRANSITION_METALS: &[u16] = &[13, 31, 49, 50, 81, 82, 83];

// C, N, O, P, S, Se
const COVALENT_NONMETALS: &[u16] = &[6, 7, 8, 15, 16, 34];

/// Formula with elements replaced by their periodic-table group number.
///
/// Group amounts are accumulated, reduced, and rendered in ascending group
/// order: `Y2SiO5` becomes `(3)2-(14)1-(16)5`.
pub fn group_formula(comp: &Composition) -> String {
    let mut groups: BTreeMap<u16, f64> = BTreeMap::new();
    for (el, amt) in comp.iter() {
        *groups.entry(el.group()).or_insert(0.0) += amt;
    }

    let amounts: Vec<f64> = groups.values().copied().collect();
    let factor = reduction_factor(&amounts);

    groups
        .iter()
        .map(|(group, amt)| format!("({group}){}", format_amount(amt / factor)))
        .collect::<Vec<_>>()
        .join("-")
}

type Bucket = (&'static str, fn(Element) -> bool);

/// Loose classification, first match wins.
const FUZZY_BUCKETS: &[Bucket] = &[
    ("Re", |e| e.is_lanthanoid() || e.is_actinoid()),
    ("A", |e| e.is_alkali() || e.is_alkaline_earth()),
    ("Tm", |e| e.is_transition_metal()),
    ("B", |e| POST_TRANSITION_METALS.contains(&e.atomic_number())),
    ("Y", |e| {
        e.is_metalloid() || COVALENT_NONMETALS.contains(&e.atomic_number()) || e.is_halogen()
    }),
    ("Nb", |e| e.is_noble_gas()),
    ("U", |_| true),
];

const FUZZY_ORDER: &[&str] = &["A", "B", "Tm", "Re", "Y", "Nb", "U"];

/// Strict classification, first match wins.
const FUZZY_STRICT_BUCKETS: &[Bucket] = &[
    ("Ln", |e| e.is_lanthanoid()),
    ("Ac", |e| e.is_actinoid()),
    ("A", |e| e.is_alkali()),
    ("B", |e| e.is_alkaline_earth()),
    ("Tm", |e| e.is_transition_metal()),
    ("X", |e| e.is_metalloid()),
    ("C", |e| POST_TRANSITION_METALS.contains(&e.atomic_number())),
    ("Y", |e| COVALENT_NONMETALS.contains(&e.atomic_number())),
    ("Z", |e| e.is_halogen()),
    ("Nb", |e| e.is_noble_gas()),
    ("U", |_| true),
];

const FUZZY_STRICT_ORDER: &[&str] = &[
    "A", "B", "C", "Tm", "Ln", "Ac", "X", "Y", "Z", "Nb", "U",
];

/// Formula with elements anonymized into 7 coarse classes.
///
/// `Y2SiO5` becomes `Tm1Y3`.
pub fn fuzzy_formula(comp: &Composition) -> String {
    bucket_formula(comp, FUZZY_BUCKETS, FUZZY_ORDER)
}

/// Formula with elements anonymized into 11 finer classes.
///
/// `Y2SiO5` becomes `Tm2X1Y5`.
pub fn fuzzy_formula_strict(comp: &Composition) -> String {
    bucket_formula(comp, FUZZY_STRICT_BUCKETS, FUZZY_STRICT_ORDER)
}

fn bucket_formula(comp: &Composition, buckets: &[Bucket], order: &[&str]) -> String {
    let mut sums: HashMap<&str, f64> = HashMap::new();
    for (el, amt) in comp.iter() {
        let label = buckets
            .iter()
            .find(|(_, matches)| matches(el))
            .map_or("U", |(label, _)| *label);
        *sums.entry(label).or_insert(0.0) += amt;
    }

    let amounts: Vec<f64> = sums.values().copied().collect();
    let factor = reduction_factor(&amounts);

    let mut out = String::new();
    for &label in order {
        if let Some(&amt) = sums.get(label) {
            out.push_str(label);
            out.push_str(&format_amount(amt / factor));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp(formula: &str) -> Composition {
        Composition::parse(formula).unwrap()
    }

    #[test]
    fn test_group_formula() {
        assert_eq!(group_formula(&comp("Y2SiO5")), "(3)2-(14)1-(16)5");
        assert_eq!(group_formula(&comp("NaCl")), "(1)1-(17)1");
        assert_eq!(group_formula(&comp("Fe2O3")), "(8)2-(16)3");
    }

    #[test]
    fn test_group_formula_reduces() {
        assert_eq!(group_formula(&comp("Fe4O6")), "(8)2-(16)3");
        // elements of the same group accumulate before reduction
        assert_eq!(group_formula(&comp("CaMgO2")), "(2)1-(16)1");
        assert_eq!(group_formula(&comp("MgO")), "(2)1-(16)1");
    }

    #[test]
    fn test_group_formula_insertion_order_invariant() {
        assert_eq!(group_formula(&comp("O5SiY2")), group_formula(&comp("Y2SiO5")));
        assert_eq!(group_formula(&comp("ClNa")), group_formula(&comp("NaCl")));
    }

    #[test]
    fn test_fuzzy_formula() {
        assert_eq!(fuzzy_formula(&comp("Y2SiO5")), "Tm1Y3");
        assert_eq!(fuzzy_formula(&comp("NaCl")), "A1Y1");
        // alkali and alkaline-earth merge into one class
        assert_eq!(fuzzy_formula(&comp("NaCl")), fuzzy_formula(&comp("MgS")));
    }

    #[test]
    fn test_fuzzy_formula_strict() {
        assert_eq!(fuzzy_formula_strict(&comp("Y2SiO5")), "Tm2X1Y5");
        assert_eq!(fuzzy_formula_strict(&comp("NaCl")), "A1Z1");
        // halogen and chalcogen stay distinct classes here
        assert_ne!(
            fuzzy_formula_strict(&comp("NaCl")),
            fuzzy_formula_strict(&comp("MgS"))
        );
    }

    #[test]
    fn test_fuzzy_priority_order() {
        // La is both lanthanoid and d-block; the rare-earth bucket wins
        assert_eq!(fuzzy_formula(&comp("LaB6")), "Re1Y6");
        assert_eq!(fuzzy_formula_strict(&comp("LaB6")), "Ln1X6");
        // U falls into the actinoid bucket, not the catch-all
        assert_eq!(fuzzy_formula_strict(&comp("UO2")), "Ac1Y2");
    }

    #[test]
    fn test_fuzzy_formula_renders_non_integral_amounts() {
        // Fe0.7Mg0.3O: Tm 0.7, A 0.3, Y 1 -- no reduction possible
        assert_eq!(fuzzy_formula(&comp("Fe0.7Mg0.3O")), "A0.3Tm0.7Y1");
    }
}
