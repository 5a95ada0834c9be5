use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    UnmatchedOpen(usize),                // '(' at this position was never closed
    UnmatchedClose(usize),               // ')' at this position has no matching '('
    InvalidToken(String, String, usize), // invalid token, source and position
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureError::UnmatchedOpen(i) => {
                write!(f, "Unmatched '(' at position {}", i)
            }
            StructureError::UnmatchedClose(i) => {
                write!(f, "Unmatched ')' at position {}", i)
            }
            StructureError::InvalidToken(tok, src, i) => {
                write!(f, "Invalid {} in {} at position {}", tok, src, i)
            }
        }
    }
}

impl std::error::Error for StructureError {}

