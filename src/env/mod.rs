use rand::Rng;

use crate::Result;

mod action;
mod grid;
mod grid_world;
mod terrain;

pub use action::{Action, Cell};
pub use grid::GridMap;
pub use grid_world::GridWorld;
pub use terrain::{RewardTable, Terrain};

/// A grid-shaped Markov decision process a tabular agent can learn in
///
/// States are cells of a `height x width` grid and the action space is the four [`Action`]s
/// in every cell. Implementations are read-only for the duration of a training run.
pub trait Environment {
    /// **Returns** `(height, width)`
    fn dimensions(&self) -> (usize, usize);

    /// Terrain of a cell, or [`Error::OutOfBounds`](crate::Error::OutOfBounds)
    fn terrain_at(&self, cell: Cell) -> Result<Terrain>;

    /// Reward received for leaving (or, for terminals, arriving at) a kind of terrain
    fn reward(&self, terrain: Terrain) -> f32;

    /// Resulting cell for taking `action` from `cell`
    fn transition(&self, cell: Cell, action: Action) -> Result<Cell>;

    /// Start cell for every episode after the first
    fn random_start<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Cell>;

    fn reward_at(&self, cell: Cell) -> Result<f32> {
        Ok(self.reward(self.terrain_at(cell)?))
    }

    fn is_terminal(&self, cell: Cell) -> Result<bool> {
        Ok(self.terrain_at(cell)?.is_terminal())
    }

    /// Whether any cell can start an episode
    fn has_free_cell(&self) -> bool {
        let (height, width) = self.dimensions();
        (0..height)
            .flat_map(|row| (0..width).map(move |col| (row, col)))
            .any(|cell| self.terrain_at(cell).is_ok_and(Terrain::is_free))
    }
}
