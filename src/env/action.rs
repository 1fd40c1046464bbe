use rand::Rng;
use strum::{EnumIter, VariantArray};

/// A position in the grid as `(row, column)`, 0-indexed from the top-left corner
pub type Cell = (usize, usize);

/// One of the four moves available in every cell
///
/// Variant order is the fixed total order used to break ties between equal action values,
/// so the first variant is also what an untrained table reports as its best action.
#[derive(EnumIter, VariantArray, Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Action {
    Left = 0,
    Right = 1,
    Up = 2,
    Down = 3,
}

impl Action {
    /// Draw one of the four actions uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::VARIANTS[rng.gen_range(0..Self::VARIANTS.len())]
    }

    /// Symbol used when rendering a policy
    pub fn symbol(self) -> char {
        match self {
            Action::Left => '<',
            Action::Right => '>',
            Action::Up => '^',
            Action::Down => 'v',
        }
    }

    /// Offset applied to a cell as `(row, column)` deltas
    pub fn offset(self) -> (isize, isize) {
        match self {
            Action::Left => (0, -1),
            Action::Right => (0, 1),
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
        }
    }

    /// The two actions at right angles to this one
    pub fn perpendicular(self) -> [Action; 2] {
        match self {
            Action::Up | Action::Down => [Action::Left, Action::Right],
            Action::Left | Action::Right => [Action::Up, Action::Down],
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn order_is_left_right_up_down() {
        let order: Vec<_> = Action::iter().collect();
        assert_eq!(
            order,
            [Action::Left, Action::Right, Action::Up, Action::Down]
        );
        assert!(Action::Left < Action::Down);
    }

    #[test]
    fn perpendicular_pairs() {
        assert_eq!(Action::Up.perpendicular(), [Action::Left, Action::Right]);
        assert_eq!(Action::Down.perpendicular(), [Action::Left, Action::Right]);
        assert_eq!(Action::Left.perpendicular(), [Action::Up, Action::Down]);
        assert_eq!(Action::Right.perpendicular(), [Action::Up, Action::Down]);
    }

    #[test]
    fn symbols_are_arrows() {
        let symbols: String = Action::iter().map(Action::symbol).collect();
        assert_eq!(symbols, "<>^v");
    }

    #[test]
    fn random_covers_all_actions() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[Action::random(&mut rng).index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "every action drawn at least once");
    }
}
