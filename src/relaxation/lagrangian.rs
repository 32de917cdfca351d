/*!
# Lagrangian Shortest Path

For a fixed multiplier `alpha >= 0` the weight-cost pair of every edge is
reduced to the scalar `weight + alpha * cost`, and a binary-heap Dijkstra
over the reduced graph returns the relaxed shortest path from the source.
*/

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use ordered_float::NotNan;
use tracing::debug;

use crate::core::error::PathinaError;
use crate::core::types::{NodeId, WcGraph, WeightCost};

/// Reduces a weight-cost record to its Lagrangian scalar `w + alpha * c`.
pub fn lagrangian_scalar(wc: WeightCost, alpha: f64) -> f64 {
    wc.weight as f64 + alpha * wc.cost as f64
}

/// Computes the shortest path from `source` to `target` under the reduced
/// scalar `w + alpha * c`.
///
/// # Returns
///
/// `Ok(Some((scalar, path)))` with the total reduced value and the node
/// sequence (source and target included), or `Ok(None)` when `target` is
/// unreachable.
///
/// # Errors
///
/// Returns `InvalidArgument` for a negative or non-finite `alpha` and for
/// endpoints that are not in the graph.
pub fn lagrangian_shortest_path(
    graph: &WcGraph,
    source: NodeId,
    target: NodeId,
    alpha: f64,
) -> Result<Option<(f64, Vec<NodeId>)>, PathinaError> {
    if !alpha.is_finite() || alpha < 0.0 {
        return Err(PathinaError::invalid_argument(format!(
            "alpha must be a finite nonnegative multiplier, got {}",
            alpha
        )));
    }
    if !graph.contains_node(source) || !graph.contains_node(target) {
        return Err(PathinaError::invalid_argument(format!(
            "both endpoints must be in the graph, got ({}, {})",
            source, target
        )));
    }

    let mut dist: BTreeMap<NodeId, Option<NotNan<f64>>> =
        graph.nodes().map(|node| (node, None)).collect();
    let mut trace: BTreeMap<NodeId, Option<NodeId>> =
        graph.nodes().map(|node| (node, None)).collect();
    let mut heap = BinaryHeap::new();

    let zero = NotNan::new(0.0).unwrap();
    dist.insert(source, Some(zero));
    heap.push(Reverse((zero, source)));

    while let Some(Reverse((d, u))) = heap.pop() {
        if let Some(current) = dist[&u] {
            if d > current {
                continue;
            }
        }
        for &v in graph.outgoing_nodes(u) {
            let wc = graph.weight_cost(u, v)?;
            let Ok(reduced) = NotNan::new(lagrangian_scalar(wc, alpha)) else {
                return Err(PathinaError::invalid_argument(format!(
                    "reduced value of edge ({}, {}) is not a number",
                    u, v
                )));
            };
            let next = d + reduced;
            if dist[&v].is_none() || Some(next) < dist[&v] {
                dist.insert(v, Some(next));
                trace.insert(v, Some(u));
                heap.push(Reverse((next, v)));
            }
        }
    }

    let Some(total) = dist[&target] else {
        debug!(source, target, alpha, "target unreachable under relaxation");
        return Ok(None);
    };

    let mut path = Vec::new();
    let mut current = target;
    while current != source {
        path.push(current);
        current = trace[&current].ok_or_else(|| {
            PathinaError::algorithm("path reconstruction failed unexpectedly")
        })?;
    }
    path.push(source);
    path.reverse();
    debug!(source, target, alpha, scalar = total.into_inner(), "relaxed path found");
    Ok(Some((total.into_inner(), path)))
}
