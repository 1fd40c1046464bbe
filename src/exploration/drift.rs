use rand::Rng;
use rand_distr::{weighted_alias::WeightedAliasIndex, Distribution};

use crate::env::Action;

/// Probability of executing the intended action, then each perpendicular one
pub const DRIFT_WEIGHTS: [f64; 3] = [0.8, 0.1, 0.1];

/// Actuator noise: the executed action may slip to either side of the intended one
#[derive(Debug, Clone)]
pub struct Drift {
    dist: WeightedAliasIndex<f64>,
}

impl Drift {
    pub fn new() -> Self {
        Self {
            dist: WeightedAliasIndex::new(DRIFT_WEIGHTS.to_vec())
                .expect("drift weights are positive and finite"),
        }
    }

    /// Resample the action that actually gets executed
    pub fn apply<R: Rng + ?Sized>(&self, intended: Action, rng: &mut R) -> Action {
        let [a, b] = intended.perpendicular();
        [intended, a, b][self.dist.sample(rng)]
    }
}

impl Default for Drift {
    fn default() -> Self {
        Self::new()
    }
}
