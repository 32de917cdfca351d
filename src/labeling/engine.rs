/*!
# Label-Setting Engine

The engine drives the label-setting algorithm: it initialises a label store
per node, repeatedly selects a node with an untreated predecessor, extends
that predecessor's lowest-weight label across the node's outgoing edges, and
stops once every predecessor of every non-source node has been treated. At
that point the destination's store holds the efficient frontier.

Two selection strategies are used over the course of a run. While many nodes
still have untreated predecessors, the engine walks forward from the source
and treats the first node it finds, which keeps the wavefront compact. Once
the fraction of such nodes drops to `min_percent_remain` or below, it walks
*backward* from each straggler to its deepest untreated ancestor instead,
which avoids repeated deep descents when only a handful of nodes remain.

Treatment marks are a cache: adding a label to a node clears the mark its
successors held for it, so tightened labels are re-propagated until the
store reaches a fixed point.
*/

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use crate::core::error::PathinaError;
use crate::core::types::{NodeId, WcGraph};
use crate::labeling::node_labels::{Label, NodeLabels};

/// Default fraction of remaining nodes at which the engine switches from
/// forward descent to the earliest-remainder selection.
pub const DEFAULT_MIN_PERCENT_REMAIN: f64 = 0.1;

/// Configuration of a label-setting run.
#[derive(Debug, Clone)]
pub struct LabelSettingConfig {
    /// Upper bound on the cumulative weight of any stored label.
    pub max_weight: u64,
    /// Fraction of remaining nodes at which the selection strategy switches.
    pub min_percent_remain: f64,
    /// Optional cap on the number of treatment iterations; exhausting it
    /// stops the run early without error.
    pub expansion_budget: Option<usize>,
}

impl LabelSettingConfig {
    /// Creates a configuration with the given weight bound and defaults for
    /// everything else.
    pub fn new(max_weight: u64) -> Self {
        Self {
            max_weight,
            min_percent_remain: DEFAULT_MIN_PERCENT_REMAIN,
            expansion_budget: None,
        }
    }

    /// Sets the strategy-switch fraction.
    pub fn with_min_percent_remain(mut self, fraction: f64) -> Self {
        self.min_percent_remain = fraction;
        self
    }

    /// Caps the number of treatment iterations.
    pub fn with_expansion_budget(mut self, budget: usize) -> Self {
        self.expansion_budget = Some(budget);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Constrained,
    AllLabels,
}

/// A finished (or cancelled) label-setting run and its per-node stores.
#[derive(Debug)]
pub struct LabelSetting {
    source: NodeId,
    config: LabelSettingConfig,
    node_labels: BTreeMap<NodeId, NodeLabels>,
    expansions: usize,
    completed: bool,
}

impl LabelSetting {
    /// Runs the label-setting algorithm on `graph` from `source`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an unknown source or a strategy-switch
    /// fraction outside `[0, 1]`, `DegenerateSelection` if the selection
    /// procedure finds no treatable node while untreated predecessors
    /// remain.
    pub fn run(
        graph: &WcGraph,
        source: NodeId,
        config: LabelSettingConfig,
    ) -> Result<Self, PathinaError> {
        Self::execute(graph, source, config, Mode::Constrained)
    }

    /// Runs the generate-all-labels diagnostic: the weight bound and the
    /// dominance test are both ignored, so every propagated label lands in
    /// its slot (later arrivals still replace earlier ones).
    ///
    /// The result is not meant for path recovery; it exists to inspect the
    /// raw label flow. Meaningful for acyclic inputs, where the propagation
    /// reaches a fixed point.
    pub fn run_all_labels(
        graph: &WcGraph,
        source: NodeId,
        config: LabelSettingConfig,
    ) -> Result<Self, PathinaError> {
        Self::execute(graph, source, config, Mode::AllLabels)
    }

    fn execute(
        graph: &WcGraph,
        source: NodeId,
        config: LabelSettingConfig,
        mode: Mode,
    ) -> Result<Self, PathinaError> {
        if !graph.contains_node(source) {
            return Err(PathinaError::invalid_argument(format!(
                "source node {} is not in the graph",
                source
            )));
        }
        if !(0.0..=1.0).contains(&config.min_percent_remain) {
            return Err(PathinaError::invalid_argument(format!(
                "min_percent_remain must lie in [0, 1], got {}",
                config.min_percent_remain
            )));
        }

        let mut node_labels = BTreeMap::new();
        for node in graph.nodes() {
            let incoming = graph.incoming_nodes(node).to_vec();
            let outgoing = graph.outgoing_nodes(node).to_vec();
            let store = if node == source {
                NodeLabels::seeded(node, incoming, outgoing)
            } else {
                NodeLabels::new(node, incoming, outgoing)
            };
            node_labels.insert(node, store);
        }

        let mut run = Self {
            source,
            config,
            node_labels,
            expansions: 0,
            completed: false,
        };
        debug!(
            source,
            max_weight = run.config.max_weight,
            nodes = run.node_labels.len(),
            "label setting initialised"
        );

        while run.has_remaining() {
            if let Some(budget) = run.config.expansion_budget {
                if run.expansions >= budget {
                    debug!(
                        expansions = run.expansions,
                        "expansion budget exhausted, stopping early"
                    );
                    return Ok(run);
                }
            }
            let node = run.select_next()?;
            run.treat_node(graph, node, mode)?;
            run.expansions += 1;
        }
        run.completed = true;
        debug!(expansions = run.expansions, "label setting finished");
        Ok(run)
    }

    /// Returns the source node of the run.
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &LabelSettingConfig {
        &self.config
    }

    /// Returns true if the run reached its fixed point, false if it was
    /// stopped by the expansion budget.
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the number of treatment iterations performed.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Returns the label store of `node`, if the node exists.
    pub fn node_labels(&self, node: NodeId) -> Option<&NodeLabels> {
        self.node_labels.get(&node)
    }

    /// Returns an iterator over every node's label store, ascending by node.
    pub fn all_node_labels(&self) -> impl Iterator<Item = &NodeLabels> + '_ {
        self.node_labels.values()
    }

    /// True while some non-source node has an untreated predecessor slot.
    fn has_remaining(&self) -> bool {
        self.node_labels
            .values()
            .any(|store| store.node() != self.source && store.has_untreated())
    }

    /// Picks the next node to treat, switching strategies on the fraction of
    /// nodes that still have untreated predecessors.
    fn select_next(&self) -> Result<NodeId, PathinaError> {
        let remaining: Vec<NodeId> = self
            .node_labels
            .values()
            .filter(|store| store.has_untreated())
            .map(NodeLabels::node)
            .collect();
        let fraction = remaining.len() as f64 / self.node_labels.len() as f64;

        let picked = if fraction > self.config.min_percent_remain {
            trace!(fraction, "selecting by forward descent");
            self.descend_from(self.source, &mut BTreeSet::new())
        } else {
            trace!(fraction, remaining = ?remaining, "selecting by earliest remainder");
            self.earliest_remaining(&remaining)
        };
        picked.ok_or_else(|| {
            PathinaError::degenerate_selection(format!(
                "{} nodes still have untreated predecessors but none was reachable for treatment",
                remaining.len()
            ))
        })
    }

    /// Walks forward from `from` and returns the first node with an
    /// untreated predecessor: the node itself, then any direct successor,
    /// then recursively the successors' subtrees.
    fn descend_from(&self, from: NodeId, visited: &mut BTreeSet<NodeId>) -> Option<NodeId> {
        if !visited.insert(from) {
            return None;
        }
        let store = &self.node_labels[&from];
        if store.has_untreated() {
            return Some(from);
        }
        for &child in store.outgoing() {
            if self.node_labels[&child].has_untreated() {
                return Some(child);
            }
        }
        for &child in store.outgoing() {
            if let Some(found) = self.descend_from(child, visited) {
                return Some(found);
            }
        }
        None
    }

    /// Starting from the first remaining node, walks backward along
    /// predecessors that themselves have untreated predecessors and returns
    /// the deepest such ancestor.
    fn earliest_remaining(&self, remaining: &[NodeId]) -> Option<NodeId> {
        remaining
            .first()
            .map(|&node| self.earliest_from(node, &mut BTreeSet::new()))
    }

    fn earliest_from(&self, node: NodeId, visited: &mut BTreeSet<NodeId>) -> NodeId {
        visited.insert(node);
        for &pred in self.node_labels[&node].incoming() {
            if !visited.contains(&pred) && self.node_labels[&pred].has_untreated() {
                return self.earliest_from(pred, visited);
            }
        }
        node
    }

    /// Performs one treatment iteration at `node`: selects the predecessor
    /// slot, extends its label over the outgoing edges, and marks the slot.
    fn treat_node(
        &mut self,
        graph: &WcGraph,
        node: NodeId,
        mode: Mode,
    ) -> Result<(), PathinaError> {
        let Some((slot, base, base_path)) = self.select_predecessor(graph, node)? else {
            return Ok(());
        };
        debug!(
            node,
            slot,
            weight = base.weight,
            cost = base.cost,
            "treating node"
        );

        let successors = self.node_labels[&node].outgoing().to_vec();
        for next in successors {
            let edge = graph.weight_cost(node, next)?;
            let label = Label::new(base.weight + edge.weight, base.cost + edge.cost);
            if mode == Mode::Constrained {
                if label.weight > self.config.max_weight {
                    trace!(node = next, weight = label.weight, "label over the bound");
                    continue;
                }
                if self.node_labels[&next].is_dominated(&label) {
                    trace!(node = next, weight = label.weight, cost = label.cost, "label dominated");
                    continue;
                }
            }
            let mut path = Vec::with_capacity(base_path.len() + 2);
            path.extend_from_slice(&base_path);
            path.push(node);
            path.push(next);
            if let Some(store) = self.node_labels.get_mut(&next) {
                store.add(label, node, path);
            }
            // The stores downstream of `next` saw an outdated label; their
            // treatment of `next` has to be redone.
            let watchers = self.node_labels[&next].outgoing().to_vec();
            for watcher in watchers {
                if let Some(store) = self.node_labels.get_mut(&watcher) {
                    if store.is_treated(next) {
                        store.unmark_treated(next);
                    }
                }
            }
        }

        if let Some(store) = self.node_labels.get_mut(&node) {
            store.mark_treated(slot);
        }
        Ok(())
    }

    /// Selects the untreated predecessor whose lowest-weight label is
    /// smallest by `(weight, cost)`, ascending id on ties, and returns the
    /// slot together with that label extended over the `(slot, node)` edge
    /// and the path that realised it.
    ///
    /// Returns `None` when only unlabelled predecessors remain untreated; in
    /// that case the first of them is set aside as treated for this pass
    /// (upstream activity unmarks it once labels appear). For the source the
    /// seed slot is returned as is.
    fn select_predecessor(
        &mut self,
        graph: &WcGraph,
        node: NodeId,
    ) -> Result<Option<(NodeId, Label, Vec<NodeId>)>, PathinaError> {
        if node == self.source {
            return Ok(Some((node, Label::new(0, 0), Vec::new())));
        }

        let untreated = self.node_labels[&node].untreated();
        let mut best: Option<(NodeId, Label)> = None;
        for &candidate in &untreated {
            let store = &self.node_labels[&candidate];
            if !store.has_labels() {
                continue;
            }
            let (_, label) = store.lowest_weight_label()?;
            let replace = match best {
                None => true,
                Some((_, incumbent)) => label < incumbent,
            };
            if replace {
                best = Some((candidate, label));
            }
        }

        let Some((slot, label)) = best else {
            let Some(&skip) = untreated.first() else {
                return Ok(None);
            };
            trace!(node, slot = skip, "setting aside unlabelled predecessor");
            if let Some(store) = self.node_labels.get_mut(&node) {
                store.mark_treated(skip);
            }
            return Ok(None);
        };

        let edge = graph.weight_cost(slot, node)?;
        let base_path = {
            let path = self.node_labels[&slot].lowest_weight_path()?;
            if path.is_empty() {
                // The seed's stored path is empty; extending through the
                // source starts the walk at the source itself.
                vec![slot]
            } else {
                path.to_vec()
            }
        };
        Ok(Some((
            slot,
            Label::new(label.weight + edge.weight, label.cost + edge.cost),
            base_path,
        )))
    }
}
