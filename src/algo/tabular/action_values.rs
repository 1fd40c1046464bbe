use strum::VariantArray;

use crate::{
    env::{Action, Cell},
    Error, Result,
};

/// Estimated value of every action in every cell of a grid
///
/// Sized to the grid at construction and never grows. All entries start at `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionValueTable {
    values: Vec<[f32; 4]>,
    height: usize,
    width: usize,
}

impl ActionValueTable {
    pub fn new((height, width): (usize, usize)) -> Self {
        Self {
            values: vec![[0.0; 4]; height * width],
            height,
            width,
        }
    }

    fn slot(&self, (row, col): Cell) -> Result<usize> {
        if row >= self.height || col >= self.width {
            return Err(Error::OutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            });
        }
        Ok(row * self.width + col)
    }

    pub fn get(&self, cell: Cell, action: Action) -> Result<f32> {
        Ok(self.values[self.slot(cell)?][action.index()])
    }

    pub fn set(&mut self, cell: Cell, action: Action, value: f32) -> Result<()> {
        let slot = self.slot(cell)?;
        self.values[slot][action.index()] = value;
        Ok(())
    }

    /// Action with the greatest value in `cell`
    ///
    /// Ties go to the action earliest in [`Action`]'s declaration order.
    pub fn best_action(&self, cell: Cell) -> Result<Action> {
        let values = &self.values[self.slot(cell)?];
        let mut best = Action::VARIANTS[0];
        for &action in &Action::VARIANTS[1..] {
            if values[action.index()] > values[best.index()] {
                best = action;
            }
        }
        Ok(best)
    }

    pub fn max_value(&self, cell: Cell) -> Result<f32> {
        let values = &self.values[self.slot(cell)?];
        Ok(values.iter().copied().fold(f32::NEG_INFINITY, f32::max))
    }

    /// `true` while no entry has moved away from its initial `0.0`
    pub fn is_untouched(&self) -> bool {
        self.values.iter().flatten().all(|&v| v == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn starts_at_zero() {
        let table = ActionValueTable::new((2, 3));
        assert!(table.get((2, 0), Action::Left).is_err());
        assert!(table.get((0, 3), Action::Left).is_err());
        assert!(table.is_untouched());
        for action in Action::iter() {
            assert_eq!(table.get((1, 2), action).unwrap(), 0.0);
        }
        assert_eq!(table.max_value((0, 0)).unwrap(), 0.0);
    }

    #[test]
    fn set_and_get() {
        let mut table = ActionValueTable::new((2, 2));
        table.set((1, 0), Action::Up, 1.5).unwrap();
        assert_eq!(table.get((1, 0), Action::Up).unwrap(), 1.5);
        assert_eq!(table.get((0, 1), Action::Up).unwrap(), 0.0, "cells don't alias");
        assert!(!table.is_untouched());
    }

    #[test]
    fn best_action_and_max_value() {
        let mut table = ActionValueTable::new((1, 1));
        table.set((0, 0), Action::Left, -2.0).unwrap();
        table.set((0, 0), Action::Right, -1.0).unwrap();
        table.set((0, 0), Action::Up, -3.0).unwrap();
        table.set((0, 0), Action::Down, -0.5).unwrap();
        assert_eq!(table.best_action((0, 0)).unwrap(), Action::Down);
        assert_eq!(table.max_value((0, 0)).unwrap(), -0.5);
    }

    #[test]
    fn ties_break_by_action_order() {
        let mut table = ActionValueTable::new((1, 2));
        assert_eq!(table.best_action((0, 0)).unwrap(), Action::Left);

        table.set((0, 1), Action::Up, 4.0).unwrap();
        table.set((0, 1), Action::Down, 4.0).unwrap();
        table.set((0, 1), Action::Right, 4.0).unwrap();
        for _ in 0..10 {
            assert_eq!(table.best_action((0, 1)).unwrap(), Action::Right);
        }
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let mut table = ActionValueTable::new((2, 2));
        assert!(matches!(
            table.get((2, 0), Action::Left),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(table.set((0, 2), Action::Left, 1.0).is_err());
        assert!(table.best_action((9, 9)).is_err());
        assert!(table.max_value((0, 5)).is_err());
    }
}
