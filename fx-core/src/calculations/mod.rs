//! Derivation engines for the two calculators.
//!
//! Each calculator describes its derived values as an explicit dependency
//! graph (see [`graph`]) and recomputes only what a change reaches.

pub mod common;
pub mod deposit;
pub mod graph;
pub mod transfer;

pub use deposit::{DepositOutput, DepositResult, TermInterest};
pub use graph::{Dependency, Derivation, DerivedValues};
pub use transfer::{Recommendation, TransferOutput, TransferResult};
