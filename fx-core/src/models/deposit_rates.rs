use serde::{Deserialize, Serialize};

/// Length of a term deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    OneMonth,
    ThreeMonths,
}

impl Term {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMonth => "1",
            Self::ThreeMonths => "3",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "1" => Some(Self::OneMonth),
            "3" => Some(Self::ThreeMonths),
            _ => None,
        }
    }

    pub fn months(&self) -> u32 {
        match self {
            Self::OneMonth => 1,
            Self::ThreeMonths => 3,
        }
    }
}

/// Published rate tier of a term deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Regular,
    Special,
}

/// Annual interest rates of one term, as fractions (0.0305 is 3.05%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermRates {
    pub regular: f64,
    pub special: f64,
}

impl TermRates {
    pub fn rate(
        &self,
        tier: Tier,
    ) -> f64 {
        match tier {
            Tier::Regular => self.regular,
            Tier::Special => self.special,
        }
    }
}

/// The fixed rate table offered for term deposits.
pub const RATES: [(Term, TermRates); 2] = [
    (
        Term::OneMonth,
        TermRates {
            regular: 0.0305,
            special: 0.06,
        },
    ),
    (
        Term::ThreeMonths,
        TermRates {
            regular: 0.0345,
            special: 0.054,
        },
    ),
];

/// Looks up the rates of `term` in [`RATES`].
pub fn term_rates(term: Term) -> TermRates {
    match term {
        Term::OneMonth => RATES[0].1,
        Term::ThreeMonths => RATES[1].1,
    }
}
