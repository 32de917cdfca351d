/*!
# Lagrangian Relaxation

The weight constraint can be folded into the objective: for a multiplier
`alpha >= 0` every edge gets the scalar value `weight + alpha * cost`, and a
single-objective shortest path over the scalars yields a relaxed solution.
The family of relaxed solutions indexed by `alpha` supplies upper bounds and
baseline paths for the label-setting algorithm; tuning `alpha` is left to
the caller.
*/

pub mod lagrangian;
