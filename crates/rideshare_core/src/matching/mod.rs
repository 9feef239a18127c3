pub mod algorithm;
pub mod augmenting;
pub mod greedy;
pub mod hungarian;
pub mod square;
pub mod types;

pub use algorithm::MatchingAlgorithm;
pub use augmenting::AugmentingPathMatching;
pub use greedy::GreedyMatching;
pub use hungarian::HungarianMatching;
pub use square::TIE_EPSILON;
pub use types::{MatchedPair, Matching, Objective};

/// Exact algorithm for `objective`.
pub fn exact_algorithm(objective: Objective) -> Box<dyn MatchingAlgorithm> {
    match objective {
        Objective::MaximizeCount => Box::new(AugmentingPathMatching),
        Objective::MaximizeWeight => Box::new(HungarianMatching),
    }
}
