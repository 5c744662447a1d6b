//! Input store shared by both calculators.
//!
//! An [`InputStore`] owns the current raw input values of one calculator and
//! turns the text of a change event into a number. It never fails: text that
//! does not read as a number is stored as 0.

use std::fmt::Debug;
use std::hash::Hash;

use tracing::trace;

use crate::calculations::common::parse_number;

/// A named, settable input field of a calculator.
pub trait InputField: Copy + Eq + Hash + Debug + 'static {
    /// Every field, in display order.
    const ALL: &'static [Self];

    /// Wire name of the field, as used in stored snapshots and change events.
    fn as_str(&self) -> &'static str;

    /// Looks a field up by its wire name.
    fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.as_str() == s)
    }
}

/// A full set of input values, addressable per field.
pub trait InputSnapshot: Copy + Default + PartialEq + Debug {
    type Field: InputField;

    fn value(
        &self,
        field: Self::Field,
    ) -> f64;

    fn set_value(
        &mut self,
        field: Self::Field,
        value: f64,
    );
}

/// Holds the current inputs of one calculator instance.
#[derive(Debug, Clone, Default)]
pub struct InputStore<S: InputSnapshot> {
    values: S,
}

impl<S: InputSnapshot> InputStore<S> {
    /// Create a store seeded with `initial` values.
    pub fn new(initial: S) -> Self {
        Self { values: initial }
    }

    /// Parse `raw` and store it as the value of `field`.
    ///
    /// Returns the number that was stored.
    pub fn set(
        &mut self,
        field: S::Field,
        raw: &str,
    ) -> f64 {
        let value = parse_number(raw);
        trace!(field = field.as_str(), raw, value, "input changed");
        self.values.set_value(field, value);
        value
    }

    /// Current value of a single field.
    pub fn get(
        &self,
        field: S::Field,
    ) -> f64 {
        self.values.value(field)
    }

    /// Copy of every current value, e.g. for persistence.
    pub fn snapshot(&self) -> S {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{DepositField, DepositInputs, TransferField, TransferInputs};

    #[test]
    fn set_stores_parsed_value() {
        let mut store = InputStore::new(TransferInputs::default());

        let stored = store.set(TransferField::SellRate, "1.35");

        assert_eq!(stored, 1.35);
        assert_eq!(store.get(TransferField::SellRate), 1.35);
    }

    #[test]
    fn set_coerces_invalid_text_to_zero() {
        let mut store = InputStore::new(TransferInputs {
            amt: 500.0,
            ..Default::default()
        });

        let stored = store.set(TransferField::Amt, "abc");

        assert_eq!(stored, 0.0);
        assert_eq!(store.snapshot().amt, 0.0);
    }

    #[test]
    fn set_accepts_negative_values() {
        let mut store = InputStore::new(DepositInputs::default());

        store.set(DepositField::BuyRate, "-0.5");

        assert_eq!(store.get(DepositField::BuyRate), -0.5);
    }

    #[test]
    fn set_only_touches_the_named_field() {
        let initial = TransferInputs {
            amt: 1.0,
            buy_rate: 2.0,
            sell_rate: 3.0,
            local_currency_transfer_fee: 4.0,
            transfer_fee: 5.0,
        };
        let mut store = InputStore::new(initial);

        store.set(TransferField::TransferFee, "9");

        assert_eq!(
            store.snapshot(),
            TransferInputs {
                transfer_fee: 9.0,
                ..initial
            }
        );
    }

    #[test]
    fn parse_finds_fields_by_wire_name() {
        assert_eq!(
            DepositField::parse("termDepositAmt"),
            Some(DepositField::TermDepositAmt)
        );
        assert_eq!(
            TransferField::parse("localCurrencyTransferFee"),
            Some(TransferField::LocalCurrencyTransferFee)
        );
        assert_eq!(DepositField::parse("amt"), None);
    }
}
