use log::{debug, info};
use rand::Rng;

use super::ActionValueTable;
use crate::{
    ensure_interval,
    env::{Cell, Environment, Terrain},
    exploration::{EpsilonGreedy, PolicySelector},
    report::{EpisodeSummary, Outcome, TrainingReport},
    Error, Result, RunMode,
};

/// Configuration for the [`QTableAgent`]
#[derive(Debug, Clone, PartialEq)]
pub struct QTableAgentConfig {
    /// Learning rate, in `[0,1]`
    pub alpha: f32,
    /// Discount factor, in `[0,1]`
    pub gamma: f32,
    /// Exploration rate, `None` to always explore
    pub epsilon: Option<f32>,
    /// Total number of steps across all episodes
    pub iterations: u64,
    /// Start cell of the first episode
    pub start: Cell,
    pub mode: RunMode,
    /// Record an [`EpisodeSummary`] with the Q-sum for every episode
    pub trace: bool,
}

impl Default for QTableAgentConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            epsilon: Some(0.1),
            iterations: 300_000,
            start: (0, 0),
            mode: RunMode::Standard,
            trace: false,
        }
    }
}

/// Training loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Running,
    EpisodeTerminated,
    BudgetExhausted,
}

/// Episode in progress
struct OpenEpisode {
    index: u64,
    start: Cell,
    steps: u64,
    total_reward: f32,
}

impl OpenEpisode {
    fn new(index: u64, start: Cell) -> Self {
        Self {
            index,
            start,
            steps: 0,
            total_reward: 0.0,
        }
    }
}

/// A Q-learning agent that learns an [`Environment`] in an [`ActionValueTable`]
///
/// The agent owns its table for the whole run. The world is borrowed read-only.
pub struct QTableAgent<'w, E>
where
    E: Environment,
{
    world: &'w E,
    table: ActionValueTable,
    selector: PolicySelector,
    alpha: f32,
    gamma: f32,
    iterations: u64,
    start: Cell,
    trace: bool,
}

impl<'w, E> QTableAgent<'w, E>
where
    E: Environment,
{
    /// Initialize a new `QTableAgent` in a given world
    ///
    /// **Returns** an error if `alpha`, `gamma` or `epsilon` is not in the interval `[0,1]`,
    /// if the start cell is outside the map or a wall, or if the map has no free cell to
    /// start later episodes from
    pub fn new(world: &'w E, config: QTableAgentConfig) -> Result<Self> {
        let QTableAgentConfig {
            alpha,
            gamma,
            epsilon,
            iterations,
            start,
            mode,
            trace,
        } = config;
        ensure_interval!(alpha, 0.0, 1.0);
        ensure_interval!(gamma, 0.0, 1.0);
        let exploration = EpsilonGreedy::new(epsilon)?;

        match world.terrain_at(start) {
            Ok(Terrain::Wall) => Err(Error::config(format!("start cell {start:?} is a wall"))),
            Ok(_) => Ok(()),
            Err(e) => Err(Error::config(format!("start cell {start:?}: {e}"))),
        }?;
        if !world.has_free_cell() {
            return Err(Error::config("map has no free cell to start episodes from"));
        }

        Ok(Self {
            world,
            table: ActionValueTable::new(world.dimensions()),
            selector: PolicySelector::new(exploration, mode),
            alpha,
            gamma,
            iterations,
            start,
            trace,
        })
    }

    pub fn table(&self) -> &ActionValueTable {
        &self.table
    }

    /// Sum over every cell of its best action value, with terminal cells counting their
    /// reward instead
    pub fn q_sum(&self) -> Result<f32> {
        let (height, width) = self.world.dimensions();
        (0..height)
            .flat_map(|row| (0..width).map(move |col| (row, col)))
            .map(|cell| self.future_value(cell))
            .sum()
    }

    /// Value the update moves toward after reaching `next`
    ///
    /// Terminal cells have no outgoing value, their reward stands in for it.
    fn future_value(&self, next: Cell) -> Result<f32> {
        if self.world.is_terminal(next)? {
            self.world.reward_at(next)
        } else {
            self.table.max_value(next)
        }
    }

    /// Take one step from `cell` and update the table
    ///
    /// **Returns** `(next_cell, reward)`
    fn step<R: Rng + ?Sized>(&mut self, cell: Cell, rng: &mut R) -> Result<(Cell, f32)> {
        let (action, next) = self.selector.select(self.world, &self.table, cell, rng)?;

        let reward = self.world.reward_at(cell)?;
        let target = reward + self.gamma * self.future_value(next)?;
        let q_value = self.table.get(cell, action)?;
        self.table.set(cell, action, q_value + self.alpha * (target - q_value))?;

        Ok((next, reward))
    }

    /// Count a finished episode, and trace it when tracing is on
    ///
    /// The Q-sum scans the whole table, so it is only computed for traced runs.
    fn close(
        &self,
        episode: OpenEpisode,
        outcome: Outcome,
        report: &mut TrainingReport,
    ) -> Result<()> {
        debug!(
            "episode {} from {:?}: {:?} after {} steps, reward {:.3}",
            episode.index, episode.start, outcome, episode.steps, episode.total_reward
        );
        report.record(outcome);
        if self.trace {
            report.trace.push(EpisodeSummary {
                episode: episode.index,
                start_row: episode.start.0,
                start_col: episode.start.1,
                steps: episode.steps,
                total_reward: episode.total_reward,
                outcome,
                q_sum: self.q_sum()?,
            });
        }
        Ok(())
    }

    /// Run the Q-learning loop until the iteration budget is spent
    ///
    /// The first episode starts at the configured cell, every later one at a random free
    /// cell. The budget is checked after every step, so the last episode may be cut short.
    pub fn train<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<TrainingReport> {
        info!(
            "training for {} iterations from {:?} (alpha {}, gamma {})",
            self.iterations, self.start, self.alpha, self.gamma
        );

        let mut report = TrainingReport::default();
        let mut cell = self.start;
        let mut current = Some(OpenEpisode::new(0, cell));
        let mut phase = Phase::Running;

        loop {
            phase = match phase {
                Phase::Running => {
                    if self.world.is_terminal(cell)? {
                        Phase::EpisodeTerminated
                    } else if report.iterations >= self.iterations {
                        Phase::BudgetExhausted
                    } else {
                        let (next, reward) = self.step(cell, rng)?;
                        if let Some(episode) = current.as_mut() {
                            episode.steps += 1;
                            episode.total_reward += reward;
                        }
                        cell = next;
                        report.iterations += 1;
                        Phase::Running
                    }
                }
                Phase::EpisodeTerminated => {
                    let outcome = Outcome::from_terrain(self.world.terrain_at(cell)?);
                    if let Some(episode) = current.take() {
                        self.close(episode, outcome, &mut report)?;
                    }
                    if report.iterations >= self.iterations {
                        Phase::BudgetExhausted
                    } else {
                        cell = self.world.random_start(rng)?;
                        current = Some(OpenEpisode::new(report.episodes, cell));
                        Phase::Running
                    }
                }
                Phase::BudgetExhausted => break,
            };
        }

        if let Some(episode) = current.take() {
            self.close(episode, Outcome::Truncated, &mut report)?;
        }

        info!(
            "finished {} episodes in {} iterations, {} goals and {} fires",
            report.episodes, report.iterations, report.goals, report.fires
        );

        Ok(report)
    }
}
