/*!
# Node Label Sets

This module defines the per-node record kept by the label-setting engine: the
labels reached so far (one per predecessor slot), the paths that realised
them, and the bookkeeping of which predecessors have already been treated
under the current frontier.
*/

use std::collections::{BTreeMap, BTreeSet};

use crate::core::error::PathinaError;
use crate::core::types::NodeId;

/// A cumulative `(weight, cost)` pair for some path from the source to a node.
///
/// The derived ordering is lexicographic by `(weight, cost)`, which is the
/// order used when selecting the lowest-weight label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label {
    pub weight: u64,
    pub cost: u64,
}

impl Label {
    /// Creates a new label.
    pub fn new(weight: u64, cost: u64) -> Self {
        Self { weight, cost }
    }

    /// Textbook Pareto dominance: `self` dominates `other` when it is no
    /// worse on both components and the two labels differ.
    pub fn dominates(&self, other: &Label) -> bool {
        self.weight <= other.weight && self.cost <= other.cost && self != other
    }
}

/// The label store of a single node.
///
/// Labels are indexed by the predecessor through which they were last
/// achieved; only one label is retained per slot at a time. The source node
/// is *seeded*: it carries the single pseudo-slot `k = node` holding the
/// label `(0, 0)` with an empty path, and that slot is the only one that
/// takes part in its treatment.
#[derive(Debug, Clone)]
pub struct NodeLabels {
    node: NodeId,
    incoming: Vec<NodeId>,
    outgoing: Vec<NodeId>,
    seeded: bool,
    labels: BTreeMap<NodeId, Label>,
    paths: BTreeMap<NodeId, Vec<NodeId>>,
    treated: BTreeSet<NodeId>,
}

impl NodeLabels {
    /// Creates an empty label store for `node` with the given adjacency.
    pub fn new(node: NodeId, incoming: Vec<NodeId>, outgoing: Vec<NodeId>) -> Self {
        Self {
            node,
            incoming,
            outgoing,
            seeded: false,
            labels: BTreeMap::new(),
            paths: BTreeMap::new(),
            treated: BTreeSet::new(),
        }
    }

    /// Creates the source's label store, seeded with `(0, 0)` and the empty
    /// path under the pseudo-slot `k = node`.
    pub fn seeded(node: NodeId, incoming: Vec<NodeId>, outgoing: Vec<NodeId>) -> Self {
        let mut store = Self::new(node, incoming, outgoing);
        store.seeded = true;
        store.labels.insert(node, Label::new(0, 0));
        store.paths.insert(node, Vec::new());
        store
    }

    /// Returns the identifier of the node this store belongs to.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Returns the structural predecessors of the node, ascending.
    pub fn incoming(&self) -> &[NodeId] {
        &self.incoming
    }

    /// Returns the structural successors of the node, ascending.
    pub fn outgoing(&self) -> &[NodeId] {
        &self.outgoing
    }

    /// Returns true if this store carries the source seed.
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Returns true if the node holds at least one label.
    pub fn has_labels(&self) -> bool {
        !self.labels.is_empty()
    }

    /// Returns the label currently held under `slot`, if any.
    pub fn label(&self, slot: NodeId) -> Option<&Label> {
        self.labels.get(&slot)
    }

    /// Returns the path recorded under `slot`, if any.
    pub fn path(&self, slot: NodeId) -> Option<&[NodeId]> {
        self.paths.get(&slot).map(Vec::as_slice)
    }

    /// Returns an iterator over `(slot, label)` pairs, ascending by slot.
    pub fn labels(&self) -> impl Iterator<Item = (NodeId, &Label)> + '_ {
        self.labels.iter().map(|(&slot, label)| (slot, label))
    }

    /// Writes `label` and its realising `path` under the slot of the
    /// predecessor `from`, replacing whatever the slot held.
    ///
    /// No dominance test is performed here; callers decide what is worth
    /// storing. A predecessor not present in the adjacency is recorded as a
    /// new slot.
    pub fn add(&mut self, label: Label, from: NodeId, path: Vec<NodeId>) {
        if !self.seeded {
            if let Err(pos) = self.incoming.binary_search(&from) {
                self.incoming.insert(pos, from);
            }
        }
        self.labels.insert(from, label);
        self.paths.insert(from, path);
    }

    /// Returns true if `label` is dominated by the stored labels: some
    /// stored `(W', C')` satisfies `W' <= W` and `C' <= C`. An identical
    /// stored label counts as dominating.
    pub fn is_dominated(&self, label: &Label) -> bool {
        self.labels
            .values()
            .any(|held| held.weight <= label.weight && held.cost <= label.cost)
    }

    /// Returns the `(slot, label)` pairs not dominated by any other stored
    /// label, ascending by slot.
    pub fn efficient_labels(&self) -> Vec<(NodeId, Label)> {
        let mut efficient = Vec::new();
        for (&slot, &label) in &self.labels {
            let dominated = self
                .labels
                .iter()
                .any(|(&other, held)| other != slot && held.dominates(&label));
            if !dominated {
                efficient.push((slot, label));
            }
        }
        efficient
    }

    /// Returns the stored `(slot, label)` pair with the smallest weight,
    /// ties broken by smaller cost and then by ascending slot.
    ///
    /// # Errors
    ///
    /// Returns `EmptyLabelSet` when the node holds no labels.
    pub fn lowest_weight_label(&self) -> Result<(NodeId, Label), PathinaError> {
        self.labels
            .iter()
            .min_by_key(|(_, label)| **label)
            .map(|(&slot, &label)| (slot, label))
            .ok_or_else(|| {
                PathinaError::empty_label_set(format!("node {} holds no labels", self.node))
            })
    }

    /// Returns the path recorded under the lowest-weight label's slot.
    ///
    /// # Errors
    ///
    /// Returns `EmptyLabelSet` when the node holds no labels.
    pub fn lowest_weight_path(&self) -> Result<&[NodeId], PathinaError> {
        let (slot, _) = self.lowest_weight_label()?;
        self.paths.get(&slot).map(Vec::as_slice).ok_or_else(|| {
            PathinaError::empty_label_set(format!(
                "node {} holds no path for slot {}",
                self.node, slot
            ))
        })
    }

    /// Returns the untreated predecessor slots, ascending. For a seeded
    /// store this is the seed slot alone, until it is treated.
    pub fn untreated(&self) -> Vec<NodeId> {
        if self.seeded {
            if self.treated.contains(&self.node) {
                Vec::new()
            } else {
                vec![self.node]
            }
        } else {
            self.incoming
                .iter()
                .copied()
                .filter(|slot| !self.treated.contains(slot))
                .collect()
        }
    }

    /// Returns true if any predecessor slot is untreated.
    pub fn has_untreated(&self) -> bool {
        if self.seeded {
            !self.treated.contains(&self.node)
        } else {
            self.incoming
                .iter()
                .any(|slot| !self.treated.contains(slot))
        }
    }

    /// Returns true if `slot` is currently marked treated.
    pub fn is_treated(&self, slot: NodeId) -> bool {
        self.treated.contains(&slot)
    }

    /// Marks `slot` as treated under the current frontier.
    pub fn mark_treated(&mut self, slot: NodeId) {
        self.treated.insert(slot);
    }

    /// Clears the treatment mark of `slot`, scheduling it for re-treatment.
    pub fn unmark_treated(&mut self, slot: NodeId) {
        self.treated.remove(&slot);
    }
}
