//! Sell-and-buy versus direct transfer comparison.
//!
//! Moving `amt` from currency A to currency B can be done either by selling
//! A for local currency at one bank and buying B at another, or by a direct
//! foreign-currency transfer with a flat fee. This module derives both
//! outcomes and recommends the cheaper one.
//!
//! # Derived values
//!
//! | Node                  | Formula |
//! |-----------------------|---------|
//! | `afterSellRateAmt`    | round5(amt × sellRate) |
//! | `afterLocalFeeAmt`    | afterSellRateAmt − localCurrencyTransferFee |
//! | `afterSellBuyAmt`     | round5((afterSellRateAmt − localCurrencyTransferFee) ÷ buyRate) |
//! | `directTransferAmt`   | amt − transferFee |
//! | `minAmtForTransfer`   | (−transferFee × buyRate + localCurrencyTransferFee) ÷ (sellRate − buyRate) |
//! | `sellAndBuyLoss`      | afterSellBuyAmt − amt |
//! | `directLoss`          | −transferFee |
//! | `recommendation`      | SellAndBuy if sellAndBuyLoss > directLoss, else transfer |
//!
//! Divisions are not guarded: a zero `buyRate` or equal rates yield
//! infinities or NaN, which are carried through to the view.
//!
//! # Example
//!
//! ```
//! use fx_core::TransferInputs;
//! use fx_core::calculations::{DerivedValues, Recommendation, TransferResult};
//!
//! let inputs = TransferInputs {
//!     amt: 1000.0,
//!     buy_rate: 1.3,
//!     sell_rate: 1.35,
//!     local_currency_transfer_fee: 5.0,
//!     transfer_fee: 10.0,
//! };
//!
//! let result = TransferResult::from_inputs(&inputs);
//!
//! assert_eq!(result.after_sell_rate_amt, 1350.0);
//! assert_eq!(result.after_sell_buy_amt, 1034.61538);
//! assert_eq!(result.recommendation, Recommendation::SellAndBuy);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::common::round5;
use super::graph::{Dependency, Derivation, DerivedValues};
use crate::models::{TransferField, TransferInputs};

/// Which way of moving the money loses less.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    SellAndBuy,
    #[default]
    Transfer,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SellAndBuy => "SellAndBuy",
            Self::Transfer => "transfer",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nodes of the transfer derivation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferOutput {
    AfterSellRateAmt,
    AfterLocalFeeAmt,
    AfterSellBuyAmt,
    DirectTransferAmt,
    MinAmtForTransfer,
    SellAndBuyLoss,
    DirectLoss,
    Recommendation,
}

type Dep = Dependency<TransferField, TransferOutput>;

impl Derivation for TransferOutput {
    type Field = TransferField;

    const ORDER: &'static [Self] = &[
        Self::AfterSellRateAmt,
        Self::AfterLocalFeeAmt,
        Self::AfterSellBuyAmt,
        Self::DirectTransferAmt,
        Self::MinAmtForTransfer,
        Self::SellAndBuyLoss,
        Self::DirectLoss,
        Self::Recommendation,
    ];

    fn dependencies(&self) -> &'static [Dep] {
        use Dependency::{Derived, Input};
        use TransferField::*;

        match self {
            Self::AfterSellRateAmt => &[Input(Amt), Input(SellRate)],
            Self::AfterLocalFeeAmt => &[
                Derived(TransferOutput::AfterSellRateAmt),
                Input(LocalCurrencyTransferFee),
            ],
            Self::AfterSellBuyAmt => &[
                Derived(TransferOutput::AfterSellRateAmt),
                Input(LocalCurrencyTransferFee),
                Input(BuyRate),
            ],
            Self::DirectTransferAmt => &[Input(Amt), Input(TransferFee)],
            Self::MinAmtForTransfer => &[
                Input(TransferFee),
                Input(BuyRate),
                Input(LocalCurrencyTransferFee),
                Input(SellRate),
            ],
            Self::SellAndBuyLoss => &[Derived(TransferOutput::AfterSellBuyAmt), Input(Amt)],
            Self::DirectLoss => &[Input(TransferFee)],
            Self::Recommendation => &[
                Derived(TransferOutput::SellAndBuyLoss),
                Derived(TransferOutput::DirectLoss),
            ],
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::AfterSellRateAmt => "afterSellRateAmt",
            Self::AfterLocalFeeAmt => "afterLocalFeeAmt",
            Self::AfterSellBuyAmt => "afterSellBuyAmt",
            Self::DirectTransferAmt => "directTransferAmt",
            Self::MinAmtForTransfer => "minAmtForTransfer",
            Self::SellAndBuyLoss => "sellAndBuyLoss",
            Self::DirectLoss => "directLoss",
            Self::Recommendation => "recommendation",
        }
    }
}

/// Derived values of the transfer calculator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResult {
    /// Local currency received from selling `amt`.
    pub after_sell_rate_amt: f64,
    /// Local currency left after the bank-to-bank fee.
    pub after_local_fee_amt: f64,
    /// Target currency bought with what is left.
    pub after_sell_buy_amt: f64,
    /// Amount arriving through a direct transfer.
    pub direct_transfer_amt: f64,
    /// Amount above which a direct transfer is preferable. Not rounded.
    pub min_amt_for_transfer: f64,
    pub sell_and_buy_loss: f64,
    pub direct_loss: f64,
    pub recommendation: Recommendation,
}

impl DerivedValues for TransferResult {
    type Inputs = TransferInputs;
    type Node = TransferOutput;

    fn update(
        &mut self,
        node: TransferOutput,
        inputs: &TransferInputs,
    ) {
        match node {
            TransferOutput::AfterSellRateAmt => {
                self.after_sell_rate_amt = round5(inputs.amt * inputs.sell_rate);
            }
            TransferOutput::AfterLocalFeeAmt => {
                self.after_local_fee_amt =
                    self.after_sell_rate_amt - inputs.local_currency_transfer_fee;
            }
            TransferOutput::AfterSellBuyAmt => {
                self.after_sell_buy_amt = round5(
                    (self.after_sell_rate_amt - inputs.local_currency_transfer_fee)
                        / inputs.buy_rate,
                );
            }
            TransferOutput::DirectTransferAmt => {
                self.direct_transfer_amt = inputs.amt - inputs.transfer_fee;
            }
            TransferOutput::MinAmtForTransfer => {
                self.min_amt_for_transfer = (-inputs.transfer_fee * inputs.buy_rate
                    + inputs.local_currency_transfer_fee)
                    / (inputs.sell_rate - inputs.buy_rate);
            }
            TransferOutput::SellAndBuyLoss => {
                self.sell_and_buy_loss = self.after_sell_buy_amt - inputs.amt;
            }
            TransferOutput::DirectLoss => {
                self.direct_loss = -inputs.transfer_fee;
            }
            TransferOutput::Recommendation => {
                self.recommendation = if self.sell_and_buy_loss > self.direct_loss {
                    Recommendation::SellAndBuy
                } else {
                    Recommendation::Transfer
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::calculations::graph::{affected_by, is_topological};
    use crate::store::InputSnapshot;

    fn reference_inputs() -> TransferInputs {
        TransferInputs {
            amt: 1000.0,
            buy_rate: 1.3,
            sell_rate: 1.35,
            local_currency_transfer_fee: 5.0,
            transfer_fee: 10.0,
        }
    }

    /// Compares through `Debug` so NaN fields count as equal.
    fn assert_same(
        left: &TransferResult,
        right: &TransferResult,
    ) {
        assert_eq!(format!("{left:?}"), format!("{right:?}"));
    }

    // =========================================================================
    // graph shape tests
    // =========================================================================

    #[test]
    fn order_is_topological() {
        assert!(is_topological::<TransferOutput>());
    }

    #[test]
    fn amount_change_skips_fee_only_nodes() {
        let affected = affected_by::<TransferOutput>(TransferField::Amt);

        assert_eq!(
            affected,
            vec![
                TransferOutput::AfterSellRateAmt,
                TransferOutput::AfterLocalFeeAmt,
                TransferOutput::AfterSellBuyAmt,
                TransferOutput::DirectTransferAmt,
                TransferOutput::SellAndBuyLoss,
                TransferOutput::Recommendation,
            ]
        );
    }

    #[test]
    fn transfer_fee_change_reaches_recommendation() {
        let affected = affected_by::<TransferOutput>(TransferField::TransferFee);

        assert_eq!(
            affected,
            vec![
                TransferOutput::DirectTransferAmt,
                TransferOutput::MinAmtForTransfer,
                TransferOutput::DirectLoss,
                TransferOutput::Recommendation,
            ]
        );
    }

    #[test]
    fn buy_rate_change_skips_first_tier() {
        let affected = affected_by::<TransferOutput>(TransferField::BuyRate);

        assert!(!affected.contains(&TransferOutput::AfterSellRateAmt));
        assert_eq!(affected.first(), Some(&TransferOutput::AfterSellBuyAmt));
    }

    // =========================================================================
    // formula tests
    // =========================================================================

    #[test]
    fn reference_example_matches() {
        let result = TransferResult::from_inputs(&reference_inputs());

        assert_eq!(result.after_sell_rate_amt, 1350.0);
        assert_eq!(result.after_local_fee_amt, 1345.0);
        assert_eq!(result.after_sell_buy_amt, 1034.61538);
        assert_eq!(result.direct_transfer_amt, 990.0);
        assert_eq!(result.sell_and_buy_loss, 1034.61538 - 1000.0);
        assert_eq!(result.direct_loss, -10.0);
        assert_eq!(result.recommendation, Recommendation::SellAndBuy);
    }

    #[test]
    fn min_amount_is_not_rounded() {
        let result = TransferResult::from_inputs(&reference_inputs());

        assert_eq!(result.min_amt_for_transfer, (-10.0 * 1.3 + 5.0) / (1.35 - 1.3));
        assert!((result.min_amt_for_transfer + 160.0).abs() < 1e-9);
    }

    #[test]
    fn after_sell_rate_amount_is_rounded() {
        let inputs = TransferInputs {
            amt: 3.0,
            sell_rate: 0.123456789,
            ..reference_inputs()
        };

        let result = TransferResult::from_inputs(&inputs);

        assert_eq!(result.after_sell_rate_amt, 0.37037);
    }

    #[test]
    fn zero_inputs_yield_nan_and_transfer() {
        let result = TransferResult::from_inputs(&TransferInputs::default());

        assert_eq!(result.after_sell_rate_amt, 0.0);
        assert!(result.after_sell_buy_amt.is_nan());
        assert!(result.min_amt_for_transfer.is_nan());
        assert_eq!(result.recommendation, Recommendation::Transfer);
    }

    #[test]
    fn zero_buy_rate_yields_infinity() {
        let inputs = TransferInputs {
            buy_rate: 0.0,
            ..reference_inputs()
        };

        let result = TransferResult::from_inputs(&inputs);

        assert_eq!(result.after_sell_buy_amt, f64::INFINITY);
        assert_eq!(result.sell_and_buy_loss, f64::INFINITY);
        assert_eq!(result.recommendation, Recommendation::SellAndBuy);
    }

    #[test]
    fn equal_rates_make_min_amount_infinite() {
        let inputs = TransferInputs {
            buy_rate: 1.3,
            sell_rate: 1.3,
            ..reference_inputs()
        };

        let result = TransferResult::from_inputs(&inputs);

        assert_eq!(result.min_amt_for_transfer, f64::NEG_INFINITY);
    }

    // =========================================================================
    // recommendation boundary tests
    // =========================================================================

    fn boundary_inputs(transfer_fee: f64) -> TransferInputs {
        // Sell-and-buy loses exactly the 10 local-currency fee.
        TransferInputs {
            amt: 100.0,
            buy_rate: 1.0,
            sell_rate: 1.0,
            local_currency_transfer_fee: 10.0,
            transfer_fee,
        }
    }

    #[test]
    fn recommendation_is_transfer_at_boundary() {
        let result = TransferResult::from_inputs(&boundary_inputs(10.0));

        assert_eq!(result.sell_and_buy_loss, result.direct_loss);
        assert_eq!(result.recommendation, Recommendation::Transfer);
    }

    #[test]
    fn recommendation_is_sell_and_buy_above_boundary() {
        let result = TransferResult::from_inputs(&boundary_inputs(10.5));

        assert_eq!(result.recommendation, Recommendation::SellAndBuy);
    }

    #[test]
    fn recommendation_is_transfer_below_boundary() {
        let result = TransferResult::from_inputs(&boundary_inputs(9.5));

        assert_eq!(result.recommendation, Recommendation::Transfer);
    }

    #[test]
    fn recommendation_renders_like_the_page() {
        assert_eq!(Recommendation::SellAndBuy.to_string(), "SellAndBuy");
        assert_eq!(Recommendation::Transfer.to_string(), "transfer");
    }

    // =========================================================================
    // incremental recompute tests
    // =========================================================================

    #[test]
    fn sell_rate_change_propagates_through_second_tier() {
        let mut inputs = reference_inputs();
        let mut result = TransferResult::from_inputs(&inputs);

        inputs.sell_rate = 1.4;
        result.recompute_after(TransferField::SellRate, &inputs);

        assert_eq!(result.after_sell_rate_amt, 1400.0);
        assert_eq!(result.after_sell_buy_amt, 1073.07692);
    }

    #[test]
    fn incremental_recompute_matches_full_recompute() {
        let changes: &[(TransferField, f64)] = &[
            (TransferField::Amt, 250.0),
            (TransferField::BuyRate, 0.0),
            (TransferField::SellRate, 1.1),
            (TransferField::BuyRate, 1.1),
            (TransferField::LocalCurrencyTransferFee, -3.0),
            (TransferField::TransferFee, 7.25),
            (TransferField::Amt, 0.0),
            (TransferField::BuyRate, 0.97),
        ];

        let mut inputs = reference_inputs();
        let mut result = TransferResult::from_inputs(&inputs);

        for &(field, value) in changes {
            inputs.set_value(field, value);
            result.recompute_after(field, &inputs);

            assert_same(&result, &TransferResult::from_inputs(&inputs));
        }
    }
}
