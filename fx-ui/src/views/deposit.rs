//! Term-deposit interest page.

use fx_core::calculations::DepositResult;
use fx_core::{DepositInputs, Term, Tier, term_rates};

use crate::utils::format_number as n;

fn tier_label(tier: Tier) -> &'static str {
    match tier {
        Tier::Regular => "Regular",
        Tier::Special => "Special",
    }
}

fn term_label(term: Term) -> &'static str {
    match term {
        Term::OneMonth => "1 month",
        Term::ThreeMonths => "3 months",
    }
}

fn term_section(
    term: Term,
    inputs: &DepositInputs,
    result: &DepositResult,
) -> Vec<String> {
    let rates = term_rates(term);
    let figures = result.term(term);
    let mut lines = vec![format!("{}m", term.as_str())];

    for tier in [Tier::Regular, Tier::Special] {
        let percent = n(rates.rate(tier) * 100.0);
        let converted = match tier {
            Tier::Regular => n(figures.regular_converted),
            Tier::Special => format!(
                "{} - {} = {}",
                n(figures.special_converted),
                n(result.sell_buy_loss_amt),
                n(figures.special_net)
            ),
        };
        lines.push(format!(
            "  {} Interest {}%  {} * ({}% / {}) = {} ({})",
            tier_label(tier),
            percent,
            n(inputs.term_deposit_amt),
            percent,
            term_label(term),
            n(figures.interest(tier)),
            converted
        ));
    }
    lines
}

pub fn render(
    inputs: &DepositInputs,
    result: &DepositResult,
) -> String {
    let mut lines = vec![
        "Sell and Buy term deposit".to_string(),
        format!("  Deposit amount  {}", n(inputs.term_deposit_amt)),
        format!(
            "  Sell Rate       {} * {} = {}",
            n(inputs.sell_rate),
            n(inputs.term_deposit_amt),
            n(result.sell_rate_amt)
        ),
        format!(
            "  Buy Rate        {} * {} = {}",
            n(inputs.buy_rate),
            n(inputs.term_deposit_amt),
            n(result.buy_rate_amt)
        ),
        format!("  (Loss: {})", n(result.sell_buy_loss_amt)),
        String::new(),
    ];
    lines.extend(term_section(Term::ThreeMonths, inputs, result));
    lines.extend(term_section(Term::OneMonth, inputs, result));

    let mut page = lines.join("\n");
    page.push('\n');
    page
}
