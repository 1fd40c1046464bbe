use rand::Rng;

use super::{Action, Cell, Environment, GridMap, RewardTable, Terrain};
use crate::Result;

/// The environment a [`QTableAgent`](crate::algo::tabular::QTableAgent) learns in: a
/// [`GridMap`] paired with the [`RewardTable`] chosen for the run
///
/// Both are read-only for the lifetime of a training run.
#[derive(Debug, Clone)]
pub struct GridWorld {
    map: GridMap,
    rewards: RewardTable,
}

impl GridWorld {
    pub fn new(map: GridMap, rewards: RewardTable) -> Self {
        Self { map, rewards }
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }
}

impl Environment for GridWorld {
    fn dimensions(&self) -> (usize, usize) {
        self.map.dimensions()
    }

    fn terrain_at(&self, cell: Cell) -> Result<Terrain> {
        self.map.terrain_at(cell)
    }

    fn reward(&self, terrain: Terrain) -> f32 {
        self.rewards[terrain]
    }

    /// Moves that would leave the grid or enter a wall leave the agent where it is.
    fn transition(&self, cell: Cell, action: Action) -> Result<Cell> {
        self.map.terrain_at(cell)?;

        let (dr, dc) = action.offset();
        let dest = match (cell.0.checked_add_signed(dr), cell.1.checked_add_signed(dc)) {
            (Some(row), Some(col)) if self.map.contains((row, col)) => (row, col),
            _ => return Ok(cell),
        };

        match self.map.terrain_at(dest)? {
            Terrain::Wall => Ok(cell),
            _ => Ok(dest),
        }
    }

    /// Uniformly sample a free cell by rejection
    ///
    /// Loops forever on a map without free cells, see [`Environment::has_free_cell`].
    fn random_start<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Cell> {
        let (height, width) = self.map.dimensions();
        loop {
            let cell = (rng.gen_range(0..height), rng.gen_range(0..width));
            if self.map.terrain_at(cell)?.is_free() {
                return Ok(cell);
            }
        }
    }
}
