//! Sell-and-buy versus direct transfer page.

use fx_core::TransferInputs;
use fx_core::calculations::TransferResult;

use crate::utils::format_number as n;

const INTRO: &str = "This is a simple calculator to help you decide whether to transfer \
between foreign currencies via exchange or through a direct transfer.";

pub fn render(
    inputs: &TransferInputs,
    result: &TransferResult,
) -> String {
    let lines = [
        "What is this?".to_string(),
        INTRO.to_string(),
        String::new(),
        format!("Amount $ {}", n(inputs.amt)),
        String::new(),
        "Sell and Buy".to_string(),
        format!(
            "  Sell (Bank A)             {} * {} = {}",
            n(inputs.amt),
            n(inputs.sell_rate),
            n(result.after_sell_rate_amt)
        ),
        format!(
            "  Bank A to B transfer fee  {} - {} = {}",
            n(result.after_sell_rate_amt),
            n(inputs.local_currency_transfer_fee),
            n(result.after_local_fee_amt)
        ),
        format!(
            "  Buy (Bank B)              {} / {} = {}",
            n(result.after_local_fee_amt),
            n(inputs.buy_rate),
            n(result.after_sell_buy_amt)
        ),
        format!("  Loss: {}", n(result.sell_and_buy_loss)),
        String::new(),
        "Direct foreign currency transfer".to_string(),
        format!(
            "  Transfer Fee              {} - {} = {}",
            n(inputs.amt),
            n(inputs.transfer_fee),
            n(result.direct_transfer_amt)
        ),
        format!("  Loss: {}", n(result.direct_loss)),
        String::new(),
        format!("Better to transfer by: {}", result.recommendation),
        format!(
            "Minimum amount for direct transfer: ${}",
            n(result.min_amt_for_transfer)
        ),
    ];

    let mut page = lines.join("\n");
    page.push('\n');
    page
}
