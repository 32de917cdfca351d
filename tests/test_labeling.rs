/*!
Integration tests of the label-setting engine against the graphs of
"Algorithms for the weight constrained shortest path problem": the efficient
frontier, the best feasible path, the run invariants, and the equivalence of
the two selection strategies.
*/

use pathina::core::error::PathinaError;
use pathina::core::types::{NodeId, WcGraph};
use pathina::labeling::engine::{LabelSetting, LabelSettingConfig};
use pathina::labeling::frontier::{best_feasible_path, efficient_frontier};
use pathina::labeling::node_labels::Label;

/// Seven-edge diamond with two efficient trade-offs at node 4.
fn diamond_graph() -> WcGraph {
    WcGraph::from_edges([
        ((0, 1), (1, 1)),
        ((0, 3), (1, 1)),
        ((1, 2), (2, 5)),
        ((1, 3), (2, 2)),
        ((1, 4), (2, 8)),
        ((2, 4), (1, 2)),
        ((3, 4), (6, 2)),
    ])
    .expect("valid edge list")
}

/// The diamond with a direct, heavy but cheap edge from source to sink.
fn diamond_with_shortcut() -> WcGraph {
    WcGraph::from_edges([
        ((0, 1), (1, 1)),
        ((0, 3), (1, 1)),
        ((0, 4), (6, 3)),
        ((1, 2), (2, 5)),
        ((1, 3), (2, 2)),
        ((1, 4), (2, 8)),
        ((2, 4), (1, 2)),
        ((3, 4), (6, 2)),
    ])
    .expect("valid edge list")
}

/// Two incomparable routes: light-but-expensive against heavy-but-cheap.
fn incomparable_routes_graph() -> WcGraph {
    WcGraph::from_edges([
        ((0, 1), (1, 10)),
        ((0, 2), (2, 1)),
        ((1, 3), (1, 10)),
        ((2, 3), (1, 1)),
    ])
    .expect("valid edge list")
}

fn run(graph: &WcGraph, max_weight: u64) -> LabelSetting {
    LabelSetting::run(graph, 0, LabelSettingConfig::new(max_weight)).expect("run succeeds")
}

/// Checks the invariants every finished run has to satisfy.
fn assert_run_well_formed(graph: &WcGraph, run: &LabelSetting) {
    for store in run.all_node_labels() {
        // Stored labels respect the weight bound.
        for (_, label) in store.labels() {
            assert!(
                label.weight <= run.config().max_weight,
                "label {:?} at node {} exceeds the bound",
                label,
                store.node()
            );
        }
        // Termination: nothing is left untreated.
        if run.completed() && store.node() != run.source() {
            assert!(
                !store.has_untreated(),
                "node {} still has untreated predecessors",
                store.node()
            );
        }
        // The efficient set is pairwise incomparable.
        let efficient = store.efficient_labels();
        for (i, (_, a)) in efficient.iter().enumerate() {
            for (j, (_, b)) in efficient.iter().enumerate() {
                if i != j {
                    assert!(!a.dominates(b), "{:?} dominates {:?}", a, b);
                }
            }
        }
        // Every stored label reconstructs its own path.
        for (slot, &label) in store.labels() {
            let path = store.path(slot).expect("label without a path");
            if store.node() == run.source() && slot == run.source() {
                assert!(path.is_empty(), "the seed keeps an empty path");
                assert_eq!(label, Label::new(0, 0));
                continue;
            }
            let wc = graph.path_weight_cost(path).expect("stored path is broken");
            assert_eq!((wc.weight, wc.cost), (label.weight, label.cost));
            assert_eq!(path.first().copied(), Some(run.source()));
            assert_eq!(path.last().copied(), Some(store.node()));
            assert_eq!(path[path.len() - 2], slot);
        }
    }
    // The source store holds exactly its seed.
    let source = run.node_labels(run.source()).expect("source store exists");
    let labels: Vec<_> = source.labels().map(|(slot, &label)| (slot, label)).collect();
    assert_eq!(labels, vec![(run.source(), Label::new(0, 0))]);
}

#[test]
fn test_diamond_frontier_and_best_path() {
    let graph = diamond_graph();
    let run = run(&graph, 6);
    assert!(run.completed());

    let frontier = efficient_frontier(&run, 4);
    assert_eq!(
        frontier,
        vec![(1, Label::new(3, 9)), (2, Label::new(4, 8))]
    );

    let (path, label) = best_feasible_path(&run, 4).unwrap();
    assert_eq!(path, vec![0, 1, 2, 4]);
    assert_eq!(label, Label::new(4, 8));
    assert_run_well_formed(&graph, &run);
}

#[test]
fn test_tight_bound_is_infeasible() {
    let graph = diamond_graph();
    let run = run(&graph, 2);
    assert!(run.completed());
    assert!(efficient_frontier(&run, 4).is_empty());
    assert!(matches!(
        best_feasible_path(&run, 4),
        Err(PathinaError::Infeasible(_))
    ));
    assert_run_well_formed(&graph, &run);
}

#[test]
fn test_source_equals_destination() {
    let graph = diamond_graph();
    let run = run(&graph, 6);
    assert_eq!(efficient_frontier(&run, 0), vec![(0, Label::new(0, 0))]);
    let (path, label) = best_feasible_path(&run, 0).unwrap();
    assert!(path.is_empty());
    assert_eq!(label, Label::new(0, 0));
}

#[test]
fn test_parallel_shortcut_wins_on_cost() {
    let graph = diamond_with_shortcut();
    let run = run(&graph, 6);

    let frontier = efficient_frontier(&run, 4);
    assert_eq!(
        frontier,
        vec![
            (0, Label::new(6, 3)),
            (1, Label::new(3, 9)),
            (2, Label::new(4, 8)),
        ]
    );

    let (path, label) = best_feasible_path(&run, 4).unwrap();
    assert_eq!(path, vec![0, 4]);
    assert_eq!(label, Label::new(6, 3));
    assert_run_well_formed(&graph, &run);
}

#[test]
fn test_incomparable_labels_are_both_kept() {
    let graph = incomparable_routes_graph();
    let run = run(&graph, 3);

    let frontier = efficient_frontier(&run, 3);
    assert_eq!(
        frontier,
        vec![(1, Label::new(2, 20)), (2, Label::new(3, 2))]
    );
    assert_run_well_formed(&graph, &run);
}

#[test]
fn test_selection_strategies_agree_on_every_scenario() {
    let scenarios: Vec<(WcGraph, u64)> = vec![
        (diamond_graph(), 6),
        (diamond_graph(), 2),
        (diamond_graph(), 10),
        (diamond_with_shortcut(), 6),
        (incomparable_routes_graph(), 3),
    ];
    for (graph, max_weight) in scenarios {
        let mut frontiers = Vec::new();
        for theta in [0.0, 0.05, 0.5, 1.0] {
            let config = LabelSettingConfig::new(max_weight).with_min_percent_remain(theta);
            let run = LabelSetting::run(&graph, 0, config).expect("run succeeds");
            assert!(run.completed());
            let per_node: Vec<(NodeId, Vec<(NodeId, Label)>)> = graph
                .nodes()
                .map(|node| (node, efficient_frontier(&run, node)))
                .collect();
            frontiers.push((theta, per_node));
        }
        for window in frontiers.windows(2) {
            assert_eq!(
                window[0].1, window[1].1,
                "strategies theta={} and theta={} disagree under bound {}",
                window[0].0, window[1].0, max_weight
            );
        }
    }
}

#[test]
fn test_raising_the_bound_never_removes_frontier_labels() {
    for graph in [
        diamond_graph(),
        diamond_with_shortcut(),
        incomparable_routes_graph(),
    ] {
        let mut previous: Option<Vec<Vec<Label>>> = None;
        for max_weight in 0..=12 {
            let run = run(&graph, max_weight);
            let current: Vec<Vec<Label>> = graph
                .nodes()
                .map(|node| {
                    efficient_frontier(&run, node)
                        .into_iter()
                        .map(|(_, label)| label)
                        .collect()
                })
                .collect();
            if let Some(previous) = &previous {
                for (older, newer) in previous.iter().zip(&current) {
                    for label in older {
                        assert!(
                            newer.contains(label),
                            "label {:?} vanished when the bound grew to {}",
                            label,
                            max_weight
                        );
                    }
                }
            }
            previous = Some(current);
        }
    }
}

#[test]
fn test_cancelled_run_is_well_formed() {
    let graph = diamond_graph();
    let config = LabelSettingConfig::new(6).with_expansion_budget(2);
    let run = LabelSetting::run(&graph, 0, config).unwrap();
    assert!(!run.completed());
    assert_eq!(run.expansions(), 2);

    // Stored labels still respect the bound and reconstruct their paths.
    for store in run.all_node_labels() {
        for (slot, &label) in store.labels() {
            assert!(label.weight <= 6);
            if store.node() != 0 {
                let path = store.path(slot).unwrap();
                let wc = graph.path_weight_cost(path).unwrap();
                assert_eq!((wc.weight, wc.cost), (label.weight, label.cost));
            }
        }
    }
    // Extraction is permitted and reports what was found so far.
    match best_feasible_path(&run, 4) {
        Ok((path, _)) => assert_eq!(path.last().copied(), Some(4)),
        Err(PathinaError::Infeasible(_)) => {}
        Err(e) => panic!("unexpected error on a cancelled run: {}", e),
    }
}

#[test]
fn test_unreachable_stragglers_need_the_backward_strategy() {
    // Node 3 waits on node 2, which the forward walk from node 0 never
    // reaches.
    let graph = WcGraph::from_edges([((0, 1), (1, 1)), ((2, 3), (1, 1))]).unwrap();

    let forward_only = LabelSettingConfig::new(5).with_min_percent_remain(0.0);
    assert!(matches!(
        LabelSetting::run(&graph, 0, forward_only),
        Err(PathinaError::DegenerateSelection(_))
    ));

    let backward = LabelSettingConfig::new(5).with_min_percent_remain(1.0);
    let run = LabelSetting::run(&graph, 0, backward).unwrap();
    assert!(run.completed());
    assert!(efficient_frontier(&run, 3).is_empty());
    assert!(matches!(
        best_feasible_path(&run, 3),
        Err(PathinaError::Infeasible(_))
    ));
}

#[test]
fn test_generate_all_labels_keeps_dominated_and_overweight_labels() {
    let graph = diamond_graph();
    let run = LabelSetting::run_all_labels(&graph, 0, LabelSettingConfig::new(6)).unwrap();
    assert!(run.completed());

    // Node 3 keeps the label that the constrained run discards as dominated.
    let store = run.node_labels(3).unwrap();
    assert_eq!(store.label(0), Some(&Label::new(1, 1)));
    assert_eq!(store.label(1), Some(&Label::new(3, 3)));

    // Node 4 keeps a label far beyond the bound; the slot holds the last
    // propagation through it.
    let store = run.node_labels(4).unwrap();
    assert_eq!(store.label(3), Some(&Label::new(9, 5)));
}

#[test]
fn test_deep_chain_treats_every_node() {
    let edges: Vec<((NodeId, NodeId), (u64, u64))> =
        (0..40).map(|i| ((i, i + 1), (1, 2))).collect();
    let graph = WcGraph::from_edges(edges).unwrap();
    let run = run(&graph, 40);
    assert!(run.completed());
    let (path, label) = best_feasible_path(&run, 40).unwrap();
    assert_eq!(path.len(), 41);
    assert_eq!(label, Label::new(40, 80));
    assert_run_well_formed(&graph, &run);
}
