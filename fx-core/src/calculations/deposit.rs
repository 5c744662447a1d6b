//! Term-deposit conversion and interest comparison.
//!
//! Derives what a deposit is worth at the buy and sell rates, the loss of
//! converting it back and forth, and the regular and special interest it
//! earns over one and three months at the fixed [`RATES`](crate::RATES).
//!
//! Interest for a term of `m` months at annual rate `r` is
//! `round5(termDepositAmt × ((r ÷ 12) × m))`.
//!
//! The converted interest figures are not rounded consistently: the special
//! tier's `interest × sellRate` is rounded to five decimals (midpoints
//! toward positive infinity, see [`round5_half_up`]) while the
//! regular tier's is left as is, and the special net figure is unrounded.
//! Views depend on this exact behaviour.

use serde::{Deserialize, Serialize};

use super::common::{round5, round5_half_up};
use super::graph::{Dependency, Derivation, DerivedValues};
use crate::models::{DepositField, DepositInputs, Term, Tier, term_rates};

/// Nodes of the term-deposit derivation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepositOutput {
    SellRateAmt,
    BuyRateAmt,
    SellBuyLossAmt,
    Interest(Term, Tier),
    /// Regular interest × sell rate, unrounded.
    RegularConverted(Term),
    /// Special interest × sell rate, rounded to five decimals.
    SpecialConverted(Term),
    /// Special interest × sell rate − sell/buy loss, unrounded.
    SpecialNet(Term),
}

type Dep = Dependency<DepositField, DepositOutput>;

impl Derivation for DepositOutput {
    type Field = DepositField;

    const ORDER: &'static [Self] = &[
        Self::SellRateAmt,
        Self::BuyRateAmt,
        Self::SellBuyLossAmt,
        Self::Interest(Term::ThreeMonths, Tier::Regular),
        Self::Interest(Term::ThreeMonths, Tier::Special),
        Self::Interest(Term::OneMonth, Tier::Regular),
        Self::Interest(Term::OneMonth, Tier::Special),
        Self::RegularConverted(Term::ThreeMonths),
        Self::SpecialConverted(Term::ThreeMonths),
        Self::SpecialNet(Term::ThreeMonths),
        Self::RegularConverted(Term::OneMonth),
        Self::SpecialConverted(Term::OneMonth),
        Self::SpecialNet(Term::OneMonth),
    ];

    fn dependencies(&self) -> &'static [Dep] {
        use DepositField::*;
        use Dependency::{Derived, Input};
        use Term::{OneMonth, ThreeMonths};
        use Tier::{Regular, Special};

        match self {
            Self::SellRateAmt => &[Input(TermDepositAmt), Input(SellRate)],
            Self::BuyRateAmt => &[Input(TermDepositAmt), Input(BuyRate)],
            Self::SellBuyLossAmt => &[Input(TermDepositAmt), Input(SellRate), Input(BuyRate)],
            Self::Interest(..) => &[Input(TermDepositAmt)],
            Self::RegularConverted(ThreeMonths) => &[
                Derived(DepositOutput::Interest(ThreeMonths, Regular)),
                Input(SellRate),
            ],
            Self::RegularConverted(OneMonth) => &[
                Derived(DepositOutput::Interest(OneMonth, Regular)),
                Input(SellRate),
            ],
            Self::SpecialConverted(ThreeMonths) => &[
                Derived(DepositOutput::Interest(ThreeMonths, Special)),
                Input(SellRate),
            ],
            Self::SpecialConverted(OneMonth) => &[
                Derived(DepositOutput::Interest(OneMonth, Special)),
                Input(SellRate),
            ],
            Self::SpecialNet(ThreeMonths) => &[
                Derived(DepositOutput::Interest(ThreeMonths, Special)),
                Input(SellRate),
                Derived(DepositOutput::SellBuyLossAmt),
            ],
            Self::SpecialNet(OneMonth) => &[
                Derived(DepositOutput::Interest(OneMonth, Special)),
                Input(SellRate),
                Derived(DepositOutput::SellBuyLossAmt),
            ],
        }
    }

    fn name(&self) -> &'static str {
        use Term::{OneMonth, ThreeMonths};
        use Tier::{Regular, Special};

        match self {
            Self::SellRateAmt => "sellRateAmt",
            Self::BuyRateAmt => "buyRateAmt",
            Self::SellBuyLossAmt => "sellBuyLossAmt",
            Self::Interest(ThreeMonths, Regular) => "regularInterestAmt3m",
            Self::Interest(ThreeMonths, Special) => "specialInterestAmt3m",
            Self::Interest(OneMonth, Regular) => "regularInterestAmt1m",
            Self::Interest(OneMonth, Special) => "specialInterestAmt1m",
            Self::RegularConverted(ThreeMonths) => "regularConverted3m",
            Self::RegularConverted(OneMonth) => "regularConverted1m",
            Self::SpecialConverted(ThreeMonths) => "specialConverted3m",
            Self::SpecialConverted(OneMonth) => "specialConverted1m",
            Self::SpecialNet(ThreeMonths) => "specialNet3m",
            Self::SpecialNet(OneMonth) => "specialNet1m",
        }
    }
}

/// Interest figures for one term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermInterest {
    pub regular: f64,
    pub special: f64,
    pub regular_converted: f64,
    pub special_converted: f64,
    pub special_net: f64,
}

impl TermInterest {
    pub fn interest(
        &self,
        tier: Tier,
    ) -> f64 {
        match tier {
            Tier::Regular => self.regular,
            Tier::Special => self.special,
        }
    }
}

/// Derived values of the term-deposit calculator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositResult {
    pub sell_rate_amt: f64,
    pub buy_rate_amt: f64,
    pub sell_buy_loss_amt: f64,
    pub three_months: TermInterest,
    pub one_month: TermInterest,
}

impl DepositResult {
    pub fn term(
        &self,
        term: Term,
    ) -> &TermInterest {
        match term {
            Term::OneMonth => &self.one_month,
            Term::ThreeMonths => &self.three_months,
        }
    }

    fn term_mut(
        &mut self,
        term: Term,
    ) -> &mut TermInterest {
        match term {
            Term::OneMonth => &mut self.one_month,
            Term::ThreeMonths => &mut self.three_months,
        }
    }
}

/// Interest earned by `amount` over `term` at the tier's annual rate.
pub fn term_interest(
    amount: f64,
    term: Term,
    tier: Tier,
) -> f64 {
    let annual = term_rates(term).rate(tier);
    round5(amount * (annual / 12.0 * f64::from(term.months())))
}

impl DerivedValues for DepositResult {
    type Inputs = DepositInputs;
    type Node = DepositOutput;

    fn update(
        &mut self,
        node: DepositOutput,
        inputs: &DepositInputs,
    ) {
        let amount = inputs.term_deposit_amt;
        let sell_rate = inputs.sell_rate;

        match node {
            DepositOutput::SellRateAmt => {
                self.sell_rate_amt = round5(sell_rate * amount);
            }
            DepositOutput::BuyRateAmt => {
                self.buy_rate_amt = round5(inputs.buy_rate * amount);
            }
            DepositOutput::SellBuyLossAmt => {
                self.sell_buy_loss_amt = round5((inputs.buy_rate - sell_rate) * amount);
            }
            DepositOutput::Interest(term, tier) => {
                let value = term_interest(amount, term, tier);
                let slot = self.term_mut(term);
                match tier {
                    Tier::Regular => slot.regular = value,
                    Tier::Special => slot.special = value,
                }
            }
            DepositOutput::RegularConverted(term) => {
                let slot = self.term_mut(term);
                slot.regular_converted = slot.regular * sell_rate;
            }
            DepositOutput::SpecialConverted(term) => {
                let slot = self.term_mut(term);
                slot.special_converted = round5_half_up(slot.special * sell_rate);
            }
            DepositOutput::SpecialNet(term) => {
                let loss = self.sell_buy_loss_amt;
                let slot = self.term_mut(term);
                slot.special_net = slot.special * sell_rate - loss;
            }
        }
    }
}
