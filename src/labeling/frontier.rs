/*!
# Frontier Extraction

Reads the finished label stores of a run and answers the two questions the
algorithm exists for: which `(weight, cost)` trade-offs reach the
destination, and which stored path realises the cheapest weight-feasible one.

Extraction also works on a cancelled run, in which case it reports the best
path found so far.
*/

use crate::core::error::PathinaError;
use crate::core::types::NodeId;
use crate::labeling::engine::LabelSetting;
use crate::labeling::node_labels::Label;

/// Returns the efficient frontier at `target`: the `(slot, label)` pairs not
/// dominated by any other label stored there, ascending by slot. Unknown or
/// unlabelled targets have an empty frontier.
pub fn efficient_frontier(run: &LabelSetting, target: NodeId) -> Vec<(NodeId, Label)> {
    run.node_labels(target)
        .map(|store| store.efficient_labels())
        .unwrap_or_default()
}

/// Returns the cheapest weight-feasible path to `target` together with its
/// label, scanning the efficient frontier with ties broken by smaller
/// weight, then shorter path, then lexicographically smaller path.
///
/// # Errors
///
/// Returns `Infeasible` when no label reaches `target`.
pub fn best_feasible_path(
    run: &LabelSetting,
    target: NodeId,
) -> Result<(Vec<NodeId>, Label), PathinaError> {
    let Some(store) = run.node_labels(target) else {
        return Err(PathinaError::infeasible(format!(
            "node {} is not in the graph",
            target
        )));
    };

    let mut best: Option<(Vec<NodeId>, Label)> = None;
    for (slot, label) in store.efficient_labels() {
        let path = store.path(slot).unwrap_or_default().to_vec();
        let better = match &best {
            None => true,
            Some((incumbent_path, incumbent)) => {
                (label.cost, label.weight, path.len(), path.as_slice())
                    < (
                        incumbent.cost,
                        incumbent.weight,
                        incumbent_path.len(),
                        incumbent_path.as_slice(),
                    )
            }
        };
        if better {
            best = Some((path, label));
        }
    }

    best.ok_or_else(|| {
        PathinaError::infeasible(format!(
            "no weight-feasible path reaches node {} under bound {}",
            target,
            run.config().max_weight
        ))
    })
}
