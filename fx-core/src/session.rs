//! Calculator instances driven by change events.
//!
//! A [`Calculator`] pairs an [`InputStore`] with the derived values computed
//! from it. Every change event is handled to completion: the input is
//! stored, the affected nodes are recomputed in dependency order, and only
//! then does the call return.
//!
//! [`TransferSession`] adds persistence on top: it loads the saved inputs
//! once when opened and saves after every change.

use tracing::{debug, info};

use crate::calculations::{DepositResult, DerivedValues, TransferOutput, TransferResult};
use crate::db::RepositoryError;
use crate::persistence::TransferSnapshotStore;
use crate::store::{InputField, InputSnapshot, InputStore};
use crate::{TransferField, TransferInputs};

/// What a single change event did.
#[derive(Debug, Clone, PartialEq)]
pub struct Update<N> {
    /// The number stored for the changed field.
    pub value: f64,
    /// Derived nodes that were recomputed, in evaluation order.
    pub recomputed: Vec<N>,
    /// Whether the inputs were written to storage.
    pub persisted: bool,
}

type FieldOf<R> = <<R as DerivedValues>::Inputs as InputSnapshot>::Field;

/// Inputs and derived values of one calculator instance.
#[derive(Debug, Clone)]
pub struct Calculator<R: DerivedValues> {
    inputs: InputStore<R::Inputs>,
    derived: R,
}

impl<R: DerivedValues> Calculator<R> {
    /// Create a calculator seeded with `initial` inputs, fully computed.
    pub fn new(initial: R::Inputs) -> Self {
        Self {
            derived: R::from_inputs(&initial),
            inputs: InputStore::new(initial),
        }
    }

    /// Apply the raw text of a change event to `field`.
    pub fn change(
        &mut self,
        field: FieldOf<R>,
        raw: &str,
    ) -> Update<R::Node> {
        let value = self.inputs.set(field, raw);
        let recomputed = self
            .derived
            .recompute_after(field, &self.inputs.snapshot());

        Update {
            value,
            recomputed,
            persisted: false,
        }
    }

    pub fn inputs(&self) -> R::Inputs {
        self.inputs.snapshot()
    }

    pub fn derived(&self) -> &R {
        &self.derived
    }
}

impl<R: DerivedValues> Default for Calculator<R> {
    fn default() -> Self {
        Self::new(R::Inputs::default())
    }
}

/// Term-deposit calculator. Always starts from zero and is never saved.
pub type DepositCalculator = Calculator<DepositResult>;

/// Transfer calculator backed by saved inputs.
pub struct TransferSession {
    calculator: Calculator<TransferResult>,
    snapshots: TransferSnapshotStore,
}

impl TransferSession {
    /// Load the saved inputs (or zeros) and compute every derived value.
    ///
    /// Storage is read only here; later writes by anyone else do not reach
    /// an open session.
    pub async fn open(snapshots: TransferSnapshotStore) -> Result<Self, RepositoryError> {
        let initial = snapshots.load().await?;
        info!(?initial, "transfer calculator opened");

        Ok(Self {
            calculator: Calculator::new(initial),
            snapshots,
        })
    }

    /// Apply a change event, then save the inputs if they are all non-negative.
    pub async fn change(
        &mut self,
        field: TransferField,
        raw: &str,
    ) -> Result<Update<TransferOutput>, RepositoryError> {
        let mut update = self.calculator.change(field, raw);
        update.persisted = self.snapshots.save(&self.calculator.inputs()).await?;
        debug!(
            field = field.as_str(),
            value = update.value,
            persisted = update.persisted,
            "transfer input changed"
        );
        Ok(update)
    }

    pub fn inputs(&self) -> TransferInputs {
        self.calculator.inputs()
    }

    pub fn derived(&self) -> &TransferResult {
        self.calculator.derived()
    }
}
