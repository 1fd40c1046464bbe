use rand::Rng;

use super::Choice;
use crate::{ensure_interval, Result};

/// Epsilon greedy exploration policy with a fixed epsilon threshold
///
/// Without an epsilon the policy always explores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: Option<f32>,
}

impl EpsilonGreedy {
    /// Initialize epsilon greedy policy
    ///
    /// **Returns** an error if `epsilon` is not in the interval `[0,1]`
    pub fn new(epsilon: Option<f32>) -> Result<Self> {
        if let Some(epsilon) = epsilon {
            ensure_interval!(epsilon, 0.0, 1.0);
        }
        Ok(Self { epsilon })
    }

    /// Invoke epsilon greedy policy
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Choice {
        match self.epsilon {
            None => Choice::Explore,
            Some(epsilon) if rng.gen_bool(epsilon as f64) => Choice::Explore,
            Some(_) => Choice::Exploit,
        }
    }
}
