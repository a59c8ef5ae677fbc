use std::fmt;

#[derive(Debug)]
pub enum CompSearchError {
    UnknownElement(String),
    InvalidFormula(String),
    LitFileNotFound(String),
    LitLine {
        line: usize,
        text: String,
        reason: String,
    },
    Io(std::io::Error),
}

pub type Result<T> = std::result::Result<T, CompSearchError>;

impl fmt::Display for CompSearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownElement(e) => write!(f, "unknown element: {e}"),
            Self::InvalidFormula(formula) => write!(f, "invalid chemical formula: {formula}"),
            Self::LitFileNotFound(path) => write!(f, "cannot find literature file: {path}"),
            Self::LitLine { line, text, reason } => {
                write!(f, "line {line}: cannot parse '{text}': {reason}")
            }
            Self::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for CompSearchError {}
