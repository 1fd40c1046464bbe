use std::ops::Index;

use strum::{EnumIter, VariantArray};

/// The terrain symbol occupying a single cell
#[derive(EnumIter, VariantArray, Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Terrain {
    /// `.`
    Grass,
    /// `;`
    TallGrass,
    /// `+`
    Water,
    /// `x`
    Fire,
    /// `O`
    Goal,
    /// `@`
    Wall,
}

impl Terrain {
    pub fn symbol(self) -> char {
        match self {
            Terrain::Grass => '.',
            Terrain::TallGrass => ';',
            Terrain::Water => '+',
            Terrain::Fire => 'x',
            Terrain::Goal => 'O',
            Terrain::Wall => '@',
        }
    }

    /// Non-terminal and enterable, eligible as an episode start
    pub fn is_free(self) -> bool {
        matches!(self, Terrain::Grass | Terrain::TallGrass | Terrain::Water)
    }

    /// Ends an episode on arrival
    pub fn is_terminal(self) -> bool {
        matches!(self, Terrain::Fire | Terrain::Goal)
    }
}

impl TryFrom<char> for Terrain {
    type Error = char;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|t| t.symbol() == symbol)
            .ok_or(symbol)
    }
}

/// Reward received for leaving (or, for terminals, arriving at) each kind of terrain
///
/// Immutable for a run. Built from one of the named presets and handed to the
/// [`GridWorld`](super::GridWorld) that needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardTable {
    rewards: [f32; 6],
}

impl RewardTable {
    /// Build a table from `(terrain, reward)` pairs; terrain not listed rewards `0.0`
    pub fn new(entries: impl IntoIterator<Item = (Terrain, f32)>) -> Self {
        let mut rewards = [0.0; 6];
        for (terrain, reward) in entries {
            rewards[terrain as usize] = reward;
        }
        Self { rewards }
    }

    /// Step costs that grow with rougher terrain, fire is strongly negative
    pub fn standard() -> Self {
        Self::new([
            (Terrain::Grass, -0.1),
            (Terrain::TallGrass, -0.3),
            (Terrain::Water, -1.0),
            (Terrain::Fire, -10.0),
            (Terrain::Goal, 10.0),
            (Terrain::Wall, f32::NEG_INFINITY),
        ])
    }

    /// Every free cell is rewarding and fire is merely neutral
    pub fn positive() -> Self {
        Self::new([
            (Terrain::Grass, 3.0),
            (Terrain::TallGrass, 1.5),
            (Terrain::Water, 1.0),
            (Terrain::Fire, 0.0),
            (Terrain::Goal, 10.0),
            (Terrain::Wall, f32::NEG_INFINITY),
        ])
    }
}

impl Index<Terrain> for RewardTable {
    type Output = f32;

    fn index(&self, terrain: Terrain) -> &Self::Output {
        &self.rewards[terrain as usize]
    }
}
