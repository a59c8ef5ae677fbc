use std::collections::BTreeMap;
use std::fmt;

use crate::chemparser::chemparse;
use crate::elements::Element;
use crate::error::Result;

/// Tolerance used when comparing per-element amounts.
pub(crate) const AMOUNT_TOLERANCE: f64 = 1e-8;

/// A chemical composition: a mapping from element to amount per formula unit.
///
/// Amounts are kept ordered by atomic number; near-zero amounts are dropped
/// at construction.
#[derive(Debug, Clone, Default)]
pub struct Composition {
    amounts: BTreeMap<Element, f64>,
}

impl Composition {
    /// Parses a formula string.
    pub fn parse(formula: &str) -> Result<Self> {
        chemparse(formula)
    }

    pub fn from_amounts(amounts: impl IntoIterator<Item = (Element, f64)>) -> Self {
        let mut map: BTreeMap<Element, f64> = BTreeMap::new();
        for (element, amt) in amounts {
            if amt.abs() >= AMOUNT_TOLERANCE {
                *map.entry(element).or_insert(0.0) += amt;
            }
        }
        Composition { amounts: map }
    }

    /// Constituent elements, in ascending atomic number.
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.amounts.keys().copied()
    }

    /// Amount of an element, 0.0 when absent.
    pub fn amount(&self, element: Element) -> f64 {
        self.amounts.get(&element).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Element, f64)> + '_ {
        self.amounts.iter().map(|(&el, &amt)| (el, amt))
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Smallest integer-ratio form of this composition, with the factor that
    /// was divided out: `Fe4O6` becomes (`Fe2O3`, 2).
    ///
    /// Compositions with non-integral amounts are returned unchanged with a
    /// factor of 1.
    pub fn reduced_composition_and_factor(&self) -> (Composition, f64) {
        let amounts: Vec<f64> = self.amounts.values().copied().collect();
        let factor = reduction_factor(&amounts);
        if factor == 1.0 {
            return (self.clone(), 1.0);
        }
        let reduced = self
            .amounts
            .iter()
            .map(|(&el, &amt)| (el, amt / factor))
            .collect::<BTreeMap<_, _>>();
        (Composition { amounts: reduced }, factor)
    }

    /// True when both compositions hold the same elements with amounts equal
    /// within [`AMOUNT_TOLERANCE`]. Amounts are compared as-is; reduce both
    /// sides first to compare formula ratios.
    pub fn almost_equals(&self, other: &Composition) -> bool {
        if self.amounts.len() != other.amounts.len() {
            return false;
        }
        self.iter()
            .all(|(el, amt)| (other.amount(el) - amt).abs() < AMOUNT_TOLERANCE)
    }

    /// Formula string with elements ordered by ascending electronegativity,
    /// then symbol. Amounts equal to 1 are omitted: `NaCl`, `Fe2O3`.
    pub fn formula(&self) -> String {
        let mut elements: Vec<Element> = self.amounts.keys().copied().collect();
        elements.sort_by(|a, b| {
            let xa = a.electronegativity().unwrap_or(f64::MAX);
            let xb = b.electronegativity().unwrap_or(f64::MAX);
            xa.total_cmp(&xb).then_with(|| a.symbol().cmp(b.symbol()))
        });

        let mut out = String::new();
        for el in elements {
            out.push_str(el.symbol());
            let amt = self.amount(el);
            if amt != 1.0 {
                out.push_str(&format_amount(amt));
            }
        }
        out
    }

    /// Pretty formula of the reduced composition.
    pub fn reduced_formula(&self) -> String {
        self.reduced_composition_and_factor().0.formula()
    }

    /// Formula with elements replaced by placeholders ordered by descending
    /// amount, amounts always rendered: `Fe2O3` becomes `A3B2`.
    pub fn anonymized_formula(&self) -> String {
        let (reduced, _) = self.reduced_composition_and_factor();

        let mut entries: Vec<(Element, f64)> = reduced.iter().collect();
        entries.sort_by(|(ea, aa), (eb, ab)| ab.total_cmp(aa).then_with(|| ea.cmp(eb)));

        let mut out = String::new();
        for (i, (_, amt)) in entries.iter().enumerate() {
            out.push_str(&placeholder(i));
            out.push_str(&format_amount(*amt));
        }
        out
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formula())
    }
}

/// Renders an amount as an integer literal when it is exactly integral.
pub(crate) fn format_amount(amt: f64) -> String {
    if amt == amt.trunc() {
        format!("{}", amt as i64)
    } else {
        format!("{amt}")
    }
}

/// Greatest common divisor of the amounts, when all of them are integral
/// within [`AMOUNT_TOLERANCE`]; 1.0 otherwise.
pub(crate) fn reduction_factor(amounts: &[f64]) -> f64 {
    if amounts.is_empty() {
        return 1.0;
    }
    let all_integral = amounts
        .iter()
        .all(|a| (a - a.round()).abs() < AMOUNT_TOLERANCE);
    if !all_integral {
        return 1.0;
    }
    let gcd = amounts
        .iter()
        .fold(0u64, |acc, a| gcd_u64(acc, a.round() as u64));
    if gcd <= 1 { 1.0 } else { gcd as f64 }
}

fn gcd_u64(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

fn placeholder(i: usize) -> String {
    let letter = |n: usize| (b'A' + n as u8) as char;
    if i < 26 {
        letter(i).to_string()
    } else {
        format!("{}{}", letter(i / 26 - 1), letter(i % 26))
    }
}
