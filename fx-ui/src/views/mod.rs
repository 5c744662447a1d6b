//! Plain-text pages of the calculator.
//!
//! - `home` - landing page
//! - `transfer` - sell-and-buy versus direct transfer (`/calc1`)
//! - `deposit` - term-deposit interest (`/calc2`)
//!
//! Every page is wrapped in the shared layout: a navigation bar followed by
//! a rule.

pub mod deposit;
pub mod home;
pub mod transfer;

use crate::routes::Route;

const RULE_WIDTH: usize = 60;

/// Navigation bar with the current page bracketed.
pub fn nav_bar(current: Route) -> String {
    Route::ALL
        .iter()
        .map(|route| {
            if *route == current {
                format!("[{}]", route.label())
            } else {
                format!(" {} ", route.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Wrap a page body in the shared layout.
pub fn layout(
    current: Route,
    body: &str,
) -> String {
    format!("{}\n{}\n{}", nav_bar(current), "-".repeat(RULE_WIDTH), body)
}
