use crate::{algo::tabular::ActionValueTable, env::GridMap, Result};

/// Render the greedy policy, one line per grid row
///
/// Free cells show the symbol of their best action. Terminals and walls keep their
/// terrain symbol.
pub fn render_policy(map: &GridMap, table: &ActionValueTable) -> Result<Vec<String>> {
    let (height, width) = map.dimensions();
    let mut rows = vec![String::with_capacity(width); height];
    for (cell, terrain) in map.iter() {
        let symbol = if terrain.is_free() {
            table.best_action(cell)?.symbol()
        } else {
            terrain.symbol()
        };
        rows[cell.0].push(symbol);
    }
    Ok(rows)
}
