use std::fmt;
use std::borrow::Borrow;
use std::ops::Deref;


/// Why raw request text was not accepted as a [`Sequence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Nothing but whitespace (or nothing at all) was submitted.
    EmptyInput,
    /// The first character outside of {G, C, A, U}.
    InvalidAlphabet { found: char, position: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyInput => {
                write!(f, "Please enter an RNA sequence.")
            }
            ValidationError::InvalidAlphabet { found, position } => {
                write!(f, "Only the characters G, C, U, and A are allowed (found {:?} at position {}).", found, position)
            }
        }
    }
}

impl std::error::Error for ValidationError {}


#[derive(Clone, Hash, Copy, Debug, Eq, PartialEq)]
pub enum Base { A, C, G, U }

impl Base {
    /// The Watson-Crick partner.
    pub fn complement(self) -> Base {
        match self {
            Base::A => Base::U,
            Base::U => Base::A,
            Base::G => Base::C,
            Base::C => Base::G,
        }
    }

    pub fn pairs_with(self, other: Base) -> bool {
        self.complement() == other
    }

    pub fn is_gc(self) -> bool {
        matches!(self, Base::G | Base::C)
    }
}

/// Case-sensitive: only the uppercase letters are nucleotides.
impl TryFrom<char> for Base {
    type Error = ValidationError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'A' => Ok(Base::A),
            'C' => Ok(Base::C),
            'G' => Ok(Base::G),
            'U' => Ok(Base::U),
            _ => Err(ValidationError::InvalidAlphabet { found: c, position: 0 }),
        }
    }
}

impl From<Base> for char {
    fn from(b: Base) -> Self {
        match b {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::U => 'U',
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}


/// An RNA sequence over {G, C, A, U}. May be empty.
#[derive(Clone, Hash, Debug, Default, Eq, PartialEq)]
pub struct Sequence(pub Vec<Base>);

impl Deref for Sequence {
    type Target = [Base];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Borrow<[Base]> for Sequence {
    fn borrow(&self) -> &[Base] {
        &self.0
    }
}

impl TryFrom<&str> for Sequence {
    type Error = ValidationError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut vec = Vec::with_capacity(s.len());
        for (i, c) in s.chars().enumerate() {
            match Base::try_from(c) {
                Ok(b) => vec.push(b),
                Err(ValidationError::InvalidAlphabet { found, .. }) => {
                    return Err(ValidationError::InvalidAlphabet { found, position: i });
                }
                Err(e) => return Err(e),
            }
        }
        Ok(Sequence(vec))
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for base in &self.0 {
            write!(f, "{}", base)?;
        }
        Ok(())
    }
}

/// Validate raw request text.
///
/// Blank input is rejected as [`ValidationError::EmptyInput`] before the
/// alphabet is checked. The text is not trimmed: whitespace around an
/// otherwise valid sequence is an [`ValidationError::InvalidAlphabet`].
pub fn validate(raw: &str) -> Result<Sequence, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    Sequence::try_from(raw)
}
