/*!
# Weight-Constrained Graph Types

This module defines the core graph type used throughout Pathina. `WcGraph` is a
wrapper around petgraph's `StableGraph` that models a directed graph whose edges
carry a pair of non-negative integer attributes: a *weight* and a *cost*. Nodes
are identified by plain non-negative integers chosen by the caller; the wrapper
maintains the mapping to petgraph indices together with materialised incoming
and outgoing adjacency lists, so that all iteration orders are deterministic
(ascending by node identifier).

The adjacency lists are built once at construction and never mutated afterwards;
algorithm runs rely on this.

# Examples

```rust
use pathina::core::types::WcGraph;

let graph = WcGraph::from_edges([
    ((0, 1), (1, 1)),
    ((1, 2), (2, 5)),
]).expect("valid edge list");

assert_eq!(graph.node_count(), 3);
assert_eq!(graph.weight(0, 1).unwrap(), 1);
assert_eq!(graph.outgoing_nodes(1), &[2]);
```
*/

use std::collections::BTreeMap;

use petgraph::Directed;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableGraph;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use serde::{Deserialize, Serialize};

use crate::core::error::PathinaError;

/// External identifier of a node, chosen by the caller.
pub type NodeId = u32;

/// The pair of edge attributes of a weight-constrained graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeightCost {
    /// Weight of the edge, counted against the run's weight bound.
    pub weight: u64,
    /// Cost of the edge, the quantity being minimised.
    pub cost: u64,
}

impl WeightCost {
    /// Creates a new weight-cost record.
    pub fn new(weight: u64, cost: u64) -> Self {
        Self { weight, cost }
    }
}

const NO_NEIGHBOURS: &[NodeId] = &[];

/// A directed graph whose edges carry a [`WeightCost`] record.
#[derive(Debug, Clone)]
pub struct WcGraph {
    inner: StableGraph<NodeId, WeightCost, Directed>,
    index: BTreeMap<NodeId, NodeIndex>,
    incoming: BTreeMap<NodeId, Vec<NodeId>>,
    outgoing: BTreeMap<NodeId, Vec<NodeId>>,
}

impl WcGraph {
    /// Builds a graph from a sequence of `((from, to), (weight, cost))` edges.
    ///
    /// The node set is the union of all endpoints. Repeating an edge keeps the
    /// last record, matching mapping semantics.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if an edge connects a node to itself.
    pub fn from_edges(
        edges: impl IntoIterator<Item = ((NodeId, NodeId), (u64, u64))>,
    ) -> Result<Self, PathinaError> {
        let mut records: BTreeMap<(NodeId, NodeId), WeightCost> = BTreeMap::new();
        for ((u, v), (weight, cost)) in edges {
            if u == v {
                return Err(PathinaError::invalid_argument(format!(
                    "edge endpoints must be distinct, got ({}, {})",
                    u, v
                )));
            }
            records.insert((u, v), WeightCost::new(weight, cost));
        }

        let mut inner = StableGraph::with_capacity(0, records.len());
        let mut index: BTreeMap<NodeId, NodeIndex> = BTreeMap::new();
        let mut incoming: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
        let mut outgoing: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();

        for &(u, v) in records.keys() {
            for node in [u, v] {
                index.entry(node).or_insert_with(|| inner.add_node(node));
                incoming.entry(node).or_default();
                outgoing.entry(node).or_default();
            }
        }
        // Iterating the records ascending by (from, to) keeps every adjacency
        // list sorted without a second pass.
        for (&(u, v), &wc) in &records {
            inner.add_edge(index[&u], index[&v], wc);
            outgoing.entry(u).or_default().push(v);
            incoming.entry(v).or_default().push(u);
        }

        Ok(Self {
            inner,
            index,
            incoming,
            outgoing,
        })
    }

    /// Returns an iterator over the node identifiers in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.index.keys().copied()
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Returns true if the node is part of the graph.
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.index.contains_key(&node)
    }

    /// Returns true if there is an edge from `from` to `to`.
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.find_edge(from, to).is_some()
    }

    fn find_edge(&self, from: NodeId, to: NodeId) -> Option<petgraph::graph::EdgeIndex> {
        let u = self.index.get(&from)?;
        let v = self.index.get(&to)?;
        self.inner.find_edge(*u, *v)
    }

    /// Returns the weight-cost record of the edge `(from, to)`.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchEdge` if the edge is absent.
    pub fn weight_cost(&self, from: NodeId, to: NodeId) -> Result<WeightCost, PathinaError> {
        self.find_edge(from, to)
            .and_then(|e| self.inner.edge_weight(e))
            .copied()
            .ok_or_else(|| PathinaError::no_such_edge(format!("({}, {})", from, to)))
    }

    /// Returns the weight of the edge `(from, to)`, or `NoSuchEdge`.
    pub fn weight(&self, from: NodeId, to: NodeId) -> Result<u64, PathinaError> {
        Ok(self.weight_cost(from, to)?.weight)
    }

    /// Returns the cost of the edge `(from, to)`, or `NoSuchEdge`.
    pub fn cost(&self, from: NodeId, to: NodeId) -> Result<u64, PathinaError> {
        Ok(self.weight_cost(from, to)?.cost)
    }

    /// Returns the predecessors of `node`, ascending. Unknown nodes have none.
    pub fn incoming_nodes(&self, node: NodeId) -> &[NodeId] {
        self.incoming
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(NO_NEIGHBOURS)
    }

    /// Returns the successors of `node`, ascending. Unknown nodes have none.
    pub fn outgoing_nodes(&self, node: NodeId) -> &[NodeId] {
        self.outgoing
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(NO_NEIGHBOURS)
    }

    /// Returns an iterator over all edges as `(from, to, record)`, ascending
    /// by `(from, to)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, WeightCost)> + '_ {
        self.inner
            .edge_references()
            .map(|e| (self.inner[e.source()], self.inner[e.target()], *e.weight()))
    }

    /// Sums the weight and cost along the consecutive pairs of `path`.
    ///
    /// Empty and single-node paths accumulate to `(0, 0)`.
    ///
    /// # Errors
    ///
    /// Returns `BrokenPath` if any consecutive pair is not an edge.
    pub fn path_weight_cost(&self, path: &[NodeId]) -> Result<WeightCost, PathinaError> {
        let mut total = WeightCost::new(0, 0);
        for pair in path.windows(2) {
            let wc = self.weight_cost(pair[0], pair[1]).map_err(|_| {
                PathinaError::broken_path(format!(
                    "path step ({}, {}) is not an edge",
                    pair[0], pair[1]
                ))
            })?;
            total.weight += wc.weight;
            total.cost += wc.cost;
        }
        Ok(total)
    }

    /// Enumerates every simple path from `source` to `target`.
    ///
    /// Intended for verification and test oracles, not for the algorithm hot
    /// path; the number of simple paths can be exponential in the node count.
    pub fn simple_paths(&self, source: NodeId, target: NodeId) -> Vec<Vec<NodeId>> {
        if !self.contains_node(source) || !self.contains_node(target) {
            return Vec::new();
        }
        if source == target {
            return vec![vec![source]];
        }
        let mut paths = Vec::new();
        let mut current = vec![source];
        self.collect_simple_paths(target, &mut current, &mut paths);
        paths
    }

    fn collect_simple_paths(
        &self,
        target: NodeId,
        current: &mut Vec<NodeId>,
        paths: &mut Vec<Vec<NodeId>>,
    ) {
        let last = match current.last() {
            Some(&node) => node,
            None => return,
        };
        for &next in self.outgoing_nodes(last) {
            if current.contains(&next) {
                continue;
            }
            current.push(next);
            if next == target {
                paths.push(current.clone());
            } else {
                self.collect_simple_paths(target, current, paths);
            }
            current.pop();
        }
    }

    /// Enumerates the simple paths from `source` to `target` whose total
    /// weight does not exceed `max_weight`. Reference implementation used as
    /// a test oracle.
    pub fn weight_feasible_simple_paths(
        &self,
        source: NodeId,
        target: NodeId,
        max_weight: u64,
    ) -> Vec<Vec<NodeId>> {
        self.simple_paths(source, target)
            .into_iter()
            .filter(|path| {
                self.path_weight_cost(path)
                    .map(|wc| wc.weight <= max_weight)
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Scans `paths` and returns the one with the smallest total cost, ties
    /// broken by smaller total weight and then by lexicographically smaller
    /// path. Returns `None` for an empty slice.
    ///
    /// # Errors
    ///
    /// Returns `BrokenPath` if any candidate contains a missing edge.
    pub fn min_cost_path_among<'a>(
        &self,
        paths: &'a [Vec<NodeId>],
    ) -> Result<Option<&'a [NodeId]>, PathinaError> {
        let mut best: Option<(u64, u64, &'a [NodeId])> = None;
        for path in paths {
            let wc = self.path_weight_cost(path)?;
            let better = match best {
                None => true,
                Some((cost, weight, incumbent)) => {
                    (wc.cost, wc.weight, path.as_slice()) < (cost, weight, incumbent)
                }
            };
            if better {
                best = Some((wc.cost, wc.weight, path.as_slice()));
            }
        }
        Ok(best.map(|(_, _, path)| path))
    }
}
