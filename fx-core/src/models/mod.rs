mod deposit_inputs;
mod deposit_rates;
mod transfer_inputs;

pub use deposit_inputs::{DepositField, DepositInputs};
pub use deposit_rates::{RATES, Term, TermRates, Tier, term_rates};
pub use transfer_inputs::{TransferField, TransferInputs};
