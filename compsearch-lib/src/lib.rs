pub mod chemparser;
pub mod composition;
pub mod elements;
pub mod error;
pub mod formulas;
pub mod litfile;
pub mod matching;
pub mod search;

pub use chemparser::{chemparse, validate_formula};
pub use composition::Composition;
pub use elements::Element;
pub use error::{CompSearchError, Result};
pub use formulas::{fuzzy_formula, fuzzy_formula_strict, group_formula};
pub use litfile::LitEntry;
pub use matching::{match_compositions, score_compositions, MatchKind, MatchResult};
pub use search::{write_table, CompoundSearch, SearchHit};
