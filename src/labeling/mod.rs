/*!
# Label-Setting for the Weight-Constrained Shortest Path Problem

This module implements the label-setting algorithm described in "Algorithms
for the weight constrained shortest path problem" by Irina Dumitrescu and
Natashia Boland. Every node keeps a set of `(weight, cost)` labels indexed by
the predecessor through which they were reached; dominated labels are pruned
as they appear, and the surviving labels at the destination form the
efficient frontier from which the cheapest weight-feasible path is read off.
*/

pub mod engine;
pub mod frontier;
pub mod node_labels;
