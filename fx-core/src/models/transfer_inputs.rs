use serde::{Deserialize, Deserializer, Serialize};

use crate::store::{InputField, InputSnapshot};

/// Raw inputs of the sell-and-buy versus direct-transfer calculator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferInputs {
    /// Money to convert, in the source currency.
    #[serde(default, deserialize_with = "number_or_zero")]
    pub amt: f64,
    /// Rate applied when buying the target currency with local currency.
    #[serde(default, deserialize_with = "number_or_zero")]
    pub buy_rate: f64,
    /// Rate applied when selling the source currency for local currency.
    #[serde(default, deserialize_with = "number_or_zero")]
    pub sell_rate: f64,
    /// Flat fee, in local currency, between the sell and buy legs.
    #[serde(default, deserialize_with = "number_or_zero")]
    pub local_currency_transfer_fee: f64,
    /// Flat fee of a direct transfer, in the source currency.
    #[serde(default, deserialize_with = "number_or_zero")]
    pub transfer_fee: f64,
}

impl TransferInputs {
    /// Whether every field is non-negative, the condition for persisting.
    pub fn is_persistable(&self) -> bool {
        TransferField::ALL.iter().all(|&field| self.value(field) >= 0.0)
    }
}

impl InputSnapshot for TransferInputs {
    type Field = TransferField;

    fn value(
        &self,
        field: TransferField,
    ) -> f64 {
        match field {
            TransferField::Amt => self.amt,
            TransferField::BuyRate => self.buy_rate,
            TransferField::SellRate => self.sell_rate,
            TransferField::LocalCurrencyTransferFee => self.local_currency_transfer_fee,
            TransferField::TransferFee => self.transfer_fee,
        }
    }

    fn set_value(
        &mut self,
        field: TransferField,
        value: f64,
    ) {
        let slot = match field {
            TransferField::Amt => &mut self.amt,
            TransferField::BuyRate => &mut self.buy_rate,
            TransferField::SellRate => &mut self.sell_rate,
            TransferField::LocalCurrencyTransferFee => &mut self.local_currency_transfer_fee,
            TransferField::TransferFee => &mut self.transfer_fee,
        };
        *slot = value;
    }
}

/// Stored snapshots may carry `null` for numbers that were not finite.
fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferField {
    Amt,
    BuyRate,
    SellRate,
    LocalCurrencyTransferFee,
    TransferFee,
}

impl InputField for TransferField {
    const ALL: &'static [Self] = &[
        Self::Amt,
        Self::BuyRate,
        Self::SellRate,
        Self::LocalCurrencyTransferFee,
        Self::TransferFee,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Amt => "amt",
            Self::BuyRate => "buyRate",
            Self::SellRate => "sellRate",
            Self::LocalCurrencyTransferFee => "localCurrencyTransferFee",
            Self::TransferFee => "transferFee",
        }
    }
}
