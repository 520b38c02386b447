//! Correction coefficient slots.
//!
//! Every correction table contributes to exactly one of five coefficients,
//! selected by the last letter of its name. Each slot has a fixed combination
//! rule:
//!
//! | letter | quantity            | rule           | identity |
//! |--------|---------------------|----------------|----------|
//! | A      | Output              | multiplicative | 1        |
//! | B      | Heat Rate           | multiplicative | 1        |
//! | C      | Heat Consumption    | multiplicative | 1        |
//! | D      | Exhaust Temperature | additive       | 0        |
//! | E      | Exhaust Flow        | multiplicative | 1        |

use crate::error::GtError;
use std::fmt;

/// How a correction value is folded into a running coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Combination {
    /// Corrections multiply; starts at 1.
    Multiplicative,
    /// Corrections add; starts at 0.
    Additive,
}

impl Combination {
    /// Neutral element of the rule.
    pub fn identity(self) -> f64 {
        match self {
            Combination::Multiplicative => 1.0,
            Combination::Additive => 0.0,
        }
    }

    /// Fold `correction` into `acc`.
    pub fn apply(self, acc: f64, correction: f64) -> f64 {
        match self {
            Combination::Multiplicative => acc * correction,
            Combination::Additive => acc + correction,
        }
    }
}

/// One of the five coefficient slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoefficientIndex {
    A,
    B,
    C,
    D,
    E,
}

impl CoefficientIndex {
    /// All slots in letter order.
    pub const ALL: [CoefficientIndex; 5] = [
        CoefficientIndex::A,
        CoefficientIndex::B,
        CoefficientIndex::C,
        CoefficientIndex::D,
        CoefficientIndex::E,
    ];

    pub fn from_letter(letter: char) -> Result<Self, GtError> {
        match letter {
            'A' => Ok(CoefficientIndex::A),
            'B' => Ok(CoefficientIndex::B),
            'C' => Ok(CoefficientIndex::C),
            'D' => Ok(CoefficientIndex::D),
            'E' => Ok(CoefficientIndex::E),
            other => Err(GtError::UnknownCoefficient { letter: other }),
        }
    }

    pub fn letter(self) -> char {
        match self {
            CoefficientIndex::A => 'A',
            CoefficientIndex::B => 'B',
            CoefficientIndex::C => 'C',
            CoefficientIndex::D => 'D',
            CoefficientIndex::E => 'E',
        }
    }

    /// Position in [`CoefficientIndex::ALL`], for array-backed storage.
    pub fn position(self) -> usize {
        self as usize
    }

    /// Exhaust temperature corrections are offsets; everything else scales.
    pub fn combination(self) -> Combination {
        match self {
            CoefficientIndex::D => Combination::Additive,
            _ => Combination::Multiplicative,
        }
    }

    /// Name of the physical quantity this slot corrects.
    pub fn quantity_name(self) -> &'static str {
        match self {
            CoefficientIndex::A => "Output",
            CoefficientIndex::B => "Heat Rate",
            CoefficientIndex::C => "Heat Consumption",
            CoefficientIndex::D => "Exhaust Temperature",
            CoefficientIndex::E => "Exhaust Flow",
        }
    }
}

impl fmt::Display for CoefficientIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl TryFrom<char> for CoefficientIndex {
    type Error = GtError;

    fn try_from(letter: char) -> Result<Self, Self::Error> {
        Self::from_letter(letter)
    }
}
