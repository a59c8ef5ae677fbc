use std::collections::HashMap;

use crate::composition::Composition;
use crate::elements::Element;
use crate::error::{CompSearchError, Result};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Symbol(String),
    Num(f64),
    LParen,
    RParen,
    Eos,
}

struct Tokenizer {
    chars: Vec<char>,
    pos: usize,
}

impl Tokenizer {
    fn new(input: &str) -> Self {
        Tokenizer {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn next_token(&mut self) -> std::result::Result<Token, String> {
        if self.pos >= self.chars.len() {
            return Ok(Token::Eos);
        }

        let ch = self.chars[self.pos];

        if ch == '(' {
            self.pos += 1;
            return Ok(Token::LParen);
        }
        if ch == ')' {
            self.pos += 1;
            return Ok(Token::RParen);
        }

        // Number: starts with a digit or '.'
        if ch.is_ascii_digit() || ch == '.' {
            return self.read_number();
        }

        // Element symbol: one uppercase letter plus trailing lowercase
        if ch.is_ascii_uppercase() {
            let start = self.pos;
            self.pos += 1;
            while self.pos < self.chars.len() && self.chars[self.pos].is_ascii_lowercase() {
                self.pos += 1;
            }
            let symbol: String = self.chars[start..self.pos].iter().collect();
            return Ok(Token::Symbol(symbol));
        }

        Err(format!(
            "unrecognized character '{}' at position {}",
            ch, self.pos
        ))
    }

    fn read_number(&mut self) -> std::result::Result<Token, String> {
        let start = self.pos;

        while self.pos < self.chars.len() && self.chars[self.pos].is_ascii_digit() {
            self.pos += 1;
        }

        if self.pos < self.chars.len() && self.chars[self.pos] == '.' {
            self.pos += 1;
            while self.pos < self.chars.len() && self.chars[self.pos].is_ascii_digit() {
                self.pos += 1;
            }
        }

        // Optional exponent
        if self.pos < self.chars.len() && (self.chars[self.pos] == 'e' || self.chars[self.pos] == 'E')
        {
            self.pos += 1;
            if self.pos < self.chars.len()
                && (self.chars[self.pos] == '+' || self.chars[self.pos] == '-')
            {
                self.pos += 1;
            }
            while self.pos < self.chars.len() && self.chars[self.pos].is_ascii_digit() {
                self.pos += 1;
            }
        }

        let s: String = self.chars[start..self.pos].iter().collect();
        s.parse::<f64>()
            .map(Token::Num)
            .map_err(|_| format!("invalid number '{s}'"))
    }
}

/// Parse a chemical formula into a [`Composition`].
///
/// Supports nested parentheses, floating-point stoichiometries, and
/// scientific notation.
///
/// # Examples
/// ```
/// let water = compsearch::chemparser::chemparse("H2O").unwrap();
/// let h = compsearch::Element::from_symbol("H").unwrap();
/// assert_eq!(water.amount(h), 2.0);
/// ```
pub fn chemparse(formula: &str) -> Result<Composition> {
    // Numbers may start with '.': "Fe.7Mg.3O" -> "Fe0.7Mg0.3O"
    let formula = preprocess_formula(formula);

    let mut tokenizer = Tokenizer::new(&formula);
    let current = tokenizer
        .next_token()
        .map_err(CompSearchError::InvalidFormula)?;

    let (amounts, next) = parse_sequence(&mut tokenizer, current)?;

    if next != Token::Eos {
        return Err(CompSearchError::InvalidFormula(format!(
            "unexpected token after formula: {formula}"
        )));
    }

    Ok(Composition::from_amounts(amounts))
}

/// Returns true if the formula can be successfully parsed.
pub fn validate_formula(formula: &str) -> bool {
    chemparse(formula).is_ok()
}

fn preprocess_formula(formula: &str) -> String {
    let formula = formula.replace(' ', "");
    let chars: Vec<char> = formula.chars().collect();
    let mut result = String::with_capacity(formula.len() + 10);

    for (i, &ch) in chars.iter().enumerate() {
        if ch == '.' && (i == 0 || !chars[i - 1].is_ascii_digit()) {
            result.push('0');
        }
        result.push(ch);
    }

    result
}

/// Parses a run of element/group items, merging weighted amounts into one map.
/// Stops at the first token that cannot start an item and hands it back.
fn parse_sequence(
    tokenizer: &mut Tokenizer,
    mut current: Token,
) -> Result<(HashMap<Element, f64>, Token)> {
    let mut amounts: HashMap<Element, f64> = HashMap::new();

    loop {
        match &current {
            Token::LParen => {
                current = tokenizer
                    .next_token()
                    .map_err(CompSearchError::InvalidFormula)?;
                let (inner, next) = parse_sequence(tokenizer, current)?;
                if next != Token::RParen {
                    return Err(CompSearchError::InvalidFormula(
                        "expected closing parenthesis".to_string(),
                    ));
                }
                current = tokenizer
                    .next_token()
                    .map_err(CompSearchError::InvalidFormula)?;

                // Optional count after ')'
                let count = if let Token::Num(n) = current {
                    current = tokenizer
                        .next_token()
                        .map_err(CompSearchError::InvalidFormula)?;
                    n
                } else {
                    1.0
                };
                for (element, amt) in inner {
                    *amounts.entry(element).or_insert(0.0) += amt * count;
                }
            }
            Token::Symbol(symbol) => {
                let element = Element::from_symbol(symbol).map_err(|_| {
                    CompSearchError::InvalidFormula(format!("'{symbol}' is not an element symbol"))
                })?;
                current = tokenizer
                    .next_token()
                    .map_err(CompSearchError::InvalidFormula)?;

                // Optional count after the symbol
                let count = if let Token::Num(n) = current {
                    current = tokenizer
                        .next_token()
                        .map_err(CompSearchError::InvalidFormula)?;
                    n
                } else {
                    1.0
                };
                *amounts.entry(element).or_insert(0.0) += count;
            }
            _ => break,
        }
    }

    Ok((amounts, current))
}
