//! Explicit dependency graph of derived values.
//!
//! Each calculator lists its derived values as the nodes of a small DAG.
//! Every node names the inputs and upstream nodes it reads, and all nodes
//! are kept in one fixed topological order. A change to one input then
//! recomputes exactly the nodes downstream of it, upstream first, so no node
//! ever reads a stale value within the same update.

use std::fmt::Debug;
use std::hash::Hash;

use tracing::trace;

use crate::store::{InputField, InputSnapshot};

/// Something a derived value reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency<F, D> {
    /// A raw input field.
    Input(F),
    /// Another derived value, which must come earlier in the order.
    Derived(D),
}

/// A node of a calculator's derivation graph.
pub trait Derivation: Copy + Eq + Hash + Debug + 'static {
    type Field: InputField;

    /// Every node, each listed after all nodes it depends on.
    const ORDER: &'static [Self];

    /// What this node reads.
    fn dependencies(&self) -> &'static [Dependency<Self::Field, Self>];

    /// Short name used in logs and views.
    fn name(&self) -> &'static str;
}

/// Nodes that must be recomputed after `changed`, in evaluation order.
pub fn affected_by<D: Derivation>(changed: D::Field) -> Vec<D> {
    let mut affected: Vec<D> = Vec::new();

    for &node in D::ORDER {
        let reads_changed = node.dependencies().iter().any(|dependency| match *dependency {
            Dependency::Input(field) => field == changed,
            Dependency::Derived(upstream) => affected.contains(&upstream),
        });
        if reads_changed {
            affected.push(node);
        }
    }

    affected
}

/// Whether `D::ORDER` lists every node after its derived dependencies.
pub fn is_topological<D: Derivation>() -> bool {
    D::ORDER.iter().enumerate().all(|(position, node)| {
        node.dependencies().iter().all(|dependency| match dependency {
            Dependency::Input(_) => true,
            Dependency::Derived(upstream) => D::ORDER[..position].contains(upstream),
        })
    })
}

/// The full set of derived values of one calculator.
pub trait DerivedValues: Debug + Clone + Default {
    type Inputs: InputSnapshot;
    type Node: Derivation<Field = <Self::Inputs as InputSnapshot>::Field>;

    /// Recomputes a single node from the inputs and the nodes already held.
    fn update(
        &mut self,
        node: Self::Node,
        inputs: &Self::Inputs,
    );

    /// Computes every node from scratch.
    fn from_inputs(inputs: &Self::Inputs) -> Self {
        let mut values = Self::default();
        for &node in <Self::Node as Derivation>::ORDER {
            values.update(node, inputs);
        }
        values
    }

    /// Recomputes the nodes downstream of `changed` and returns them.
    fn recompute_after(
        &mut self,
        changed: <Self::Inputs as InputSnapshot>::Field,
        inputs: &Self::Inputs,
    ) -> Vec<Self::Node> {
        let affected = affected_by::<Self::Node>(changed);
        for &node in &affected {
            self.update(node, inputs);
        }
        trace!(
            field = changed.as_str(),
            nodes = ?affected.iter().map(|node| node.name()).collect::<Vec<_>>(),
            "recomputed"
        );
        affected
    }
}
