use serde::{Deserialize, Serialize};

use crate::store::{InputField, InputSnapshot};

/// Raw inputs of the term-deposit comparison calculator.
///
/// These are never persisted; every session starts from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositInputs {
    pub term_deposit_amt: f64,
    pub buy_rate: f64,
    pub sell_rate: f64,
}

impl InputSnapshot for DepositInputs {
    type Field = DepositField;

    fn value(
        &self,
        field: DepositField,
    ) -> f64 {
        match field {
            DepositField::TermDepositAmt => self.term_deposit_amt,
            DepositField::BuyRate => self.buy_rate,
            DepositField::SellRate => self.sell_rate,
        }
    }

    fn set_value(
        &mut self,
        field: DepositField,
        value: f64,
    ) {
        match field {
            DepositField::TermDepositAmt => self.term_deposit_amt = value,
            DepositField::BuyRate => self.buy_rate = value,
            DepositField::SellRate => self.sell_rate = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepositField {
    TermDepositAmt,
    BuyRate,
    SellRate,
}

impl InputField for DepositField {
    const ALL: &'static [Self] = &[Self::TermDepositAmt, Self::BuyRate, Self::SellRate];

    fn as_str(&self) -> &'static str {
        match self {
            Self::TermDepositAmt => "termDepositAmt",
            Self::BuyRate => "buyRate",
            Self::SellRate => "sellRate",
        }
    }
}
