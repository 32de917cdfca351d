/*!
# Graph Generators

This module generates random weight-constrained graphs for benchmarks and
tests. Edges always point from a lower to a higher node identifier, so the
output is acyclic and node `0` reaches every other node, which makes the
graphs directly usable as label-setting inputs with source `0` and
destination `n - 1`.

The generator is seeded for reproducibility. Invalid parameters return a
`Result` with a relevant error from `pathina::core::error::PathinaError`.

# Examples

```rust
use pathina::core::generators::arbitrary_wc_graph;

let graph = arbitrary_wc_graph(20, 10.0, 5.0, 2.0, 2.0, 4, 42)
    .expect("Failed to generate weight-cost graph");
assert_eq!(graph.node_count(), 20);
```
*/

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::core::error::PathinaError;
use crate::core::types::{NodeId, WcGraph};

/// Generates an arbitrary weight-constrained graph with `n` nodes.
///
/// For every node `i < n - 1` the generator draws an out-degree `d` in
/// `[1, min(n - i - 1, peak)]` and connects `i` to `d` distinct successors
/// chosen from `(i, min(n - 1, i + peak)]`. Each edge receives a
/// truncated-normal `(weight, cost)` pair with both components at least `1`.
/// Any node other than `0` that ends up without a predecessor is given one,
/// picked from `[max(0, i - peak), i - 1]`.
///
/// # Arguments
///
/// * `n` - The number of nodes (must be at least 2).
/// * `mean_weight` / `mean_cost` - The means of the normal draws.
/// * `std_weight` / `std_cost` - The standard deviations of the normal draws.
/// * `peak` - The maximum out-degree and forward reach of a node (must be > 0).
/// * `seed` - The seed for the random number generator.
///
/// # Returns
///
/// * `Result<WcGraph, PathinaError>` - The generated graph, or an
///   `InvalidArgument` error if the parameters are out of range.
pub fn arbitrary_wc_graph(
    n: usize,
    mean_weight: f64,
    mean_cost: f64,
    std_weight: f64,
    std_cost: f64,
    peak: usize,
    seed: u64,
) -> Result<WcGraph, PathinaError> {
    if n < 2 {
        return Err(PathinaError::invalid_argument(
            "Number of nodes must be at least two.",
        ));
    }
    if peak == 0 {
        return Err(PathinaError::invalid_argument(
            "Peak out-degree must be greater than zero.",
        ));
    }
    let weight_dist = Normal::new(mean_weight, std_weight).map_err(|e| {
        PathinaError::invalid_argument(format!("Bad weight distribution parameters: {}", e))
    })?;
    let cost_dist = Normal::new(mean_cost, std_cost).map_err(|e| {
        PathinaError::invalid_argument(format!("Bad cost distribution parameters: {}", e))
    })?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges: Vec<((NodeId, NodeId), (u64, u64))> = Vec::new();

    for i in 0..n - 1 {
        let span = (n - i - 1).min(peak);
        let degree = rng.random_range(1..=span);
        let reach = (n - 1).min(i + peak);
        let candidates: Vec<usize> = (i + 1..=reach).collect();
        for pick in rand::seq::index::sample(&mut rng, candidates.len(), degree).iter() {
            let j = candidates[pick];
            edges.push((
                (i as NodeId, j as NodeId),
                draw_weight_cost(&mut rng, &weight_dist, &cost_dist),
            ));
        }
        // Successors only ever point forward, so by the time node i is
        // processed its full predecessor set is known.
        let has_predecessor = edges.iter().any(|&((_, to), _)| to == i as NodeId);
        if i > 0 && !has_predecessor {
            let from = rng.random_range(i.saturating_sub(peak)..i);
            edges.push((
                (from as NodeId, i as NodeId),
                draw_weight_cost(&mut rng, &weight_dist, &cost_dist),
            ));
        }
    }

    WcGraph::from_edges(edges)
}

/// Draws a truncated-normal weight-cost pair with both components at least 1.
fn draw_weight_cost(
    rng: &mut StdRng,
    weight_dist: &Normal<f64>,
    cost_dist: &Normal<f64>,
) -> (u64, u64) {
    let weight = weight_dist.sample(rng).floor().max(1.0) as u64;
    let cost = cost_dist.sample(rng).floor().max(1.0) as u64;
    (weight, cost)
}
