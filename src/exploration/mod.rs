/// Exploration policy result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Explore,
    Exploit,
}

mod drift;
mod epsilon_greedy;
mod selector;

pub use drift::Drift;
pub use epsilon_greedy::EpsilonGreedy;
pub use selector::PolicySelector;
