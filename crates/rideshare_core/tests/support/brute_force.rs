//! Exhaustive oracles for small graphs.

use rideshare_core::{BipartiteGraph, Objective};

/// Lexicographic key of a matching: per driver row, the matched column or
/// `usize::MAX` when unmatched.
pub type LexKey = Vec<usize>;

/// Best objective value and the lexicographically smallest matching that
/// reaches it, as `(row, col)` pairs. Under `MaximizeWeight` only edges with
/// positive weight are eligible, matching what the solvers report.
pub fn optimum(graph: &BipartiteGraph, objective: Objective) -> (f64, Vec<(usize, usize)>) {
    let mut best: Option<(f64, LexKey)> = None;
    let mut current = vec![usize::MAX; graph.num_drivers()];
    let mut rider_used = vec![false; graph.num_riders()];
    enumerate(graph, objective, 0, 0.0, &mut current, &mut rider_used, &mut best);

    let (value, key) = best.unwrap_or((0.0, Vec::new()));
    let pairs = key
        .iter()
        .enumerate()
        .filter(|(_, &col)| col != usize::MAX)
        .map(|(row, &col)| (row, col))
        .collect();
    (value, pairs)
}

fn eligible(graph: &BipartiteGraph, objective: Objective, row: usize, col: usize) -> Option<f64> {
    let weight = graph.weight(row, col)?;
    match objective {
        Objective::MaximizeCount => Some(1.0),
        Objective::MaximizeWeight if weight > 0.0 => Some(weight),
        Objective::MaximizeWeight => None,
    }
}

fn enumerate(
    graph: &BipartiteGraph,
    objective: Objective,
    row: usize,
    value: f64,
    current: &mut LexKey,
    rider_used: &mut [bool],
    best: &mut Option<(f64, LexKey)>,
) {
    if row == graph.num_drivers() {
        let better = match best {
            None => true,
            Some((best_value, best_key)) => {
                value > *best_value + 1e-9
                    || ((value - *best_value).abs() <= 1e-9 && *current < *best_key)
            }
        };
        if better {
            *best = Some((value, current.clone()));
        }
        return;
    }
    for col in 0..graph.num_riders() {
        if rider_used[col] {
            continue;
        }
        if let Some(gain) = eligible(graph, objective, row, col) {
            rider_used[col] = true;
            current[row] = col;
            enumerate(graph, objective, row + 1, value + gain, current, rider_used, best);
            rider_used[col] = false;
        }
    }
    current[row] = usize::MAX;
    enumerate(graph, objective, row + 1, value, current, rider_used, best);
}
