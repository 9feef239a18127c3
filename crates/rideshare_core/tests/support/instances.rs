//! Seeded random graphs for property tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rideshare_core::{BipartiteGraph, ParticipantId};

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random graph with shuffled ids, half-unit weights in [-4, 8] so ties are
/// common, and roughly `prune` of the edges missing.
pub fn random_graph(rng: &mut StdRng, max_side: usize, prune: f64) -> BipartiteGraph {
    let drivers = rng.gen_range(1..=max_side);
    let riders = rng.gen_range(1..=max_side);
    let driver_ids = shuffled_ids(rng, drivers, 1);
    let rider_ids = shuffled_ids(rng, riders, 100);
    let weights = (0..drivers)
        .map(|_| {
            (0..riders)
                .map(|_| {
                    if rng.gen_bool(prune) {
                        None
                    } else {
                        Some(rng.gen_range(-8..=16) as f64 * 0.5)
                    }
                })
                .collect()
        })
        .collect();
    BipartiteGraph::from_weights(driver_ids, rider_ids, weights)
}

/// Square graph with positive integer weights, for the pathfinding oracle.
pub fn random_square(rng: &mut StdRng, n: usize) -> (BipartiteGraph, Vec<Vec<i64>>) {
    let weights: Vec<Vec<i64>> = (0..n)
        .map(|_| (0..n).map(|_| rng.gen_range(1..=50)).collect())
        .collect();
    let ids: Vec<u64> = (0..n as u64).collect();
    let dense: Vec<Vec<f64>> = weights
        .iter()
        .map(|row| row.iter().map(|&w| w as f64).collect())
        .collect();
    (BipartiteGraph::from_dense(&ids, &ids, &dense), weights)
}

fn shuffled_ids(rng: &mut StdRng, count: usize, base: u64) -> Vec<ParticipantId> {
    let mut ids: Vec<ParticipantId> =
        (0..count as u64).map(|i| ParticipantId(base + i * 3)).collect();
    for i in (1..ids.len()).rev() {
        let j = rng.gen_range(0..=i);
        ids.swap(i, j);
    }
    ids
}
