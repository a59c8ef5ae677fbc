use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::error::{CompSearchError, Result};

const ELEMENTS_JSON: &str = include_str!("../../data/elements.json");

/// One row of the embedded element table.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementRecord {
    pub atomic_number: u16,
    pub symbol: String,
    pub electronegativity: Option<f64>,
}

struct ElementTable {
    records: Vec<ElementRecord>,
    symbol_to_z: HashMap<String, u16>,
}

static TABLE: OnceLock<ElementTable> = OnceLock::new();

fn table() -> &'static ElementTable {
    TABLE.get_or_init(|| {
        let records: Vec<ElementRecord> =
            serde_json::from_str(ELEMENTS_JSON).expect("failed to deserialize element table");

        let mut symbol_to_z = HashMap::new();
        for (i, rec) in records.iter().enumerate() {
            // Records must be dense and ordered by Z so lookups can index directly.
            assert_eq!(rec.atomic_number as usize, i + 1, "element table out of order");
            symbol_to_z.insert(rec.symbol.clone(), rec.atomic_number);
        }

        ElementTable {
            records,
            symbol_to_z,
        }
    })
}

/// A chemical element, identified by its atomic number.
///
/// Resolved through the embedded element table; supports Z = 1..=103.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Element(u16);

impl Element {
    /// Looks up an element by symbol.
    ///
    /// # Examples
    /// ```
    /// let fe = compsearch::Element::from_symbol("Fe").unwrap();
    /// assert_eq!(fe.atomic_number(), 26);
    /// ```
    pub fn from_symbol(symbol: &str) -> Result<Self> {
        // D is an alias for H
        let resolved = if symbol == "D" { "H" } else { symbol };
        table()
            .symbol_to_z
            .get(resolved)
            .map(|&z| Element(z))
            .ok_or_else(|| CompSearchError::UnknownElement(symbol.to_string()))
    }

    pub fn from_atomic_number(z: u16) -> Option<Self> {
        if z >= 1 && z as usize <= table().records.len() {
            Some(Element(z))
        } else {
            None
        }
    }

    fn record(&self) -> &'static ElementRecord {
        &table().records[(self.0 - 1) as usize]
    }

    pub fn atomic_number(&self) -> u16 {
        self.0
    }

    pub fn symbol(&self) -> &'static str {
        &self.record().symbol
    }

    /// Pauling electronegativity. `None` for He, Ne and Ar.
    pub fn electronegativity(&self) -> Option<f64> {
        self.record().electronegativity
    }

    /// Periodic table group number.
    ///
    /// Computed from Z over the long-form (32-column) table, so s/p/d-block
    /// elements get the usual 1-18 and f-block elements are numbered
    /// sequentially between groups 3 and 17.
    pub fn group(&self) -> u16 {
        let z = self.0;
        if z == 1 {
            return 1;
        }
        if z == 2 {
            return 18;
        }
        if z <= 18 {
            return match (z - 2) % 8 {
                0 => 18,
                r @ 1..=2 => r,
                r => 10 + r,
            };
        }
        if z <= 54 {
            return match (z - 18) % 18 {
                0 => 18,
                r => r,
            };
        }
        match (z - 54) % 32 {
            0 => 18,
            r if r >= 18 => r - 14,
            r => r,
        }
    }

    pub fn is_alkali(&self) -> bool {
        matches!(self.0, 3 | 11 | 19 | 37 | 55 | 87)
    }

    pub fn is_alkaline_earth(&self) -> bool {
        matches!(self.0, 4 | 12 | 20 | 38 | 56 | 88)
    }

    pub fn is_halogen(&self) -> bool {
        matches!(self.0, 9 | 17 | 35 | 53 | 85)
    }

    pub fn is_noble_gas(&self) -> bool {
        matches!(self.0, 2 | 10 | 18 | 36 | 54 | 86)
    }

    /// B, Si, Ge, As, Sb, Te, Po.
    pub fn is_metalloid(&self) -> bool {
        matches!(self.0, 5 | 14 | 32 | 33 | 51 | 52 | 84)
    }

    pub fn is_lanthanoid(&self) -> bool {
        (57..=71).contains(&self.0)
    }

    pub fn is_actinoid(&self) -> bool {
        (89..=103).contains(&self.0)
    }

    /// d-block metals. La and Ac are included here as well as in the
    /// lanthanoid/actinoid categories; classifier priority decides.
    pub fn is_transition_metal(&self) -> bool {
        matches!(self.0, 21..=30 | 39..=48 | 57 | 72..=80 | 89)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.symbol(), f)
    }
}
