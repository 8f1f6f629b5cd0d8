//! Repetition quantifiers.

use serde::Serialize;

/// How many times an element may match.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantifier {
    /// No quantifier - exactly one match.
    #[default]
    None,
    /// `?` - zero or one.
    Optional,
    /// `*` - zero or more.
    Star,
    /// `+` - one or more.
    Plus,
}

impl Quantifier {
    /// Parse a quantifier suffix character.
    pub fn from_suffix(c: char) -> Option<Self> {
        match c {
            '?' => Some(Self::Optional),
            '*' => Some(Self::Star),
            '+' => Some(Self::Plus),
            _ => None,
        }
    }

    /// Grammar suffix (`""` for no quantifier).
    pub fn suffix(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Optional => "?",
            Self::Star => "*",
            Self::Plus => "+",
        }
    }

    /// Whether zero matches is acceptable.
    pub fn can_be_empty(self) -> bool {
        matches!(self, Self::Optional | Self::Star)
    }

    /// Whether matching continues after the first success.
    pub fn is_repeating(self) -> bool {
        matches!(self, Self::Star | Self::Plus)
    }

    /// `(min, max)` match counts; `None` max means unbounded.
    pub fn bounds(self) -> (usize, Option<usize>) {
        match self {
            Self::None => (1, Some(1)),
            Self::Optional => (0, Some(1)),
            Self::Star => (0, None),
            Self::Plus => (1, None),
        }
    }
}
