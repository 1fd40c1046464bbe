use rand::Rng;

use super::{Choice, Drift, EpsilonGreedy};
use crate::{
    algo::tabular::ActionValueTable,
    env::{Action, Cell, Environment},
    Result, RunMode,
};

/// Picks the action to execute in a cell: epsilon greedy over the table, optionally
/// perturbed by [`Drift`] when running in [`RunMode::Stochastic`]
#[derive(Debug, Clone)]
pub struct PolicySelector {
    exploration: EpsilonGreedy,
    drift: Option<Drift>,
}

impl PolicySelector {
    pub fn new(exploration: EpsilonGreedy, mode: RunMode) -> Self {
        Self {
            exploration,
            drift: mode.is_stochastic().then(Drift::new),
        }
    }

    /// The intended action, before any drift
    ///
    /// A random candidate is always drawn first so the random stream advances the same
    /// way whether the policy explores or exploits.
    pub fn choose<R: Rng + ?Sized>(
        &self,
        table: &ActionValueTable,
        cell: Cell,
        rng: &mut R,
    ) -> Result<Action> {
        let candidate = Action::random(rng);
        match self.exploration.choose(rng) {
            Choice::Explore => Ok(candidate),
            Choice::Exploit => table.best_action(cell),
        }
    }

    /// **Returns** `(executed_action, next_cell)`
    pub fn select<E: Environment, R: Rng + ?Sized>(
        &self,
        world: &E,
        table: &ActionValueTable,
        cell: Cell,
        rng: &mut R,
    ) -> Result<(Action, Cell)> {
        let intended = self.choose(table, cell, rng)?;
        let executed = match &self.drift {
            Some(drift) => drift.apply(intended, rng),
            None => intended,
        };
        Ok((executed, world.transition(cell, executed)?))
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::env::{GridWorld, RewardTable};

    fn selector(epsilon: Option<f32>, mode: RunMode) -> PolicySelector {
        PolicySelector::new(EpsilonGreedy::new(epsilon).unwrap(), mode)
    }

    fn open_world() -> GridWorld {
        GridWorld::new("3 3\n...\n...\n...".parse().unwrap(), RewardTable::standard())
    }

    fn table_preferring(action: Action) -> ActionValueTable {
        let mut table = ActionValueTable::new((3, 3));
        table.set((1, 1), action, 1.0).unwrap();
        table
    }

    #[test]
    fn epsilon_zero_always_exploits() {
        let selector = selector(Some(0.0), RunMode::Standard);
        let table = table_preferring(Action::Down);
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..1000 {
            let chosen = selector.choose(&table, (1, 1), &mut rng).unwrap();
            assert_eq!(chosen, Action::Down);
        }
    }

    #[test]
    fn epsilon_one_always_takes_the_random_candidate() {
        let selector = selector(Some(1.0), RunMode::Standard);
        let table = table_preferring(Action::Down);
        let mut rng = StdRng::seed_from_u64(9);
        let mut shadow = StdRng::seed_from_u64(9);
        for _ in 0..1000 {
            let chosen = selector.choose(&table, (1, 1), &mut rng).unwrap();
            let candidate = Action::random(&mut shadow);
            assert_eq!(chosen, candidate);
        }
    }

    #[test]
    fn no_epsilon_explores() {
        let selector = selector(None, RunMode::PositiveRewards);
        let table = table_preferring(Action::Down);
        let mut rng = StdRng::seed_from_u64(21);
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            counts[selector.choose(&table, (1, 1), &mut rng).unwrap().index()] += 1;
        }
        assert!(counts.iter().all(|&c| c > 800), "{counts:?}");
    }

    #[test]
    fn standard_mode_executes_the_intended_action() {
        let world = open_world();
        let selector = selector(Some(0.0), RunMode::Standard);
        let table = table_preferring(Action::Up);
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..500 {
            assert_eq!(
                selector.select(&world, &table, (1, 1), &mut rng).unwrap(),
                (Action::Up, (0, 1))
            );
        }
    }

    #[test]
    fn stochastic_mode_drifts_and_moves_accordingly() {
        let world = open_world();
        let selector = selector(Some(0.0), RunMode::Stochastic);
        let table = table_preferring(Action::Up);
        let mut rng = StdRng::seed_from_u64(4);
        let n = 100_000;
        let mut counts = [0usize; 4];
        for _ in 0..n {
            let (action, next) = selector.select(&world, &table, (1, 1), &mut rng).unwrap();
            assert_eq!(next, world.transition((1, 1), action).unwrap());
            counts[action.index()] += 1;
        }
        let freq = counts.map(|c| c as f64 / n as f64);
        assert!((freq[Action::Up.index()] - 0.8).abs() < 0.01, "{freq:?}");
        assert!((freq[Action::Left.index()] - 0.1).abs() < 0.01, "{freq:?}");
        assert!((freq[Action::Right.index()] - 0.1).abs() < 0.01, "{freq:?}");
        assert_eq!(counts[Action::Down.index()], 0);
    }
}
