mod action_values;
mod q_table;

pub use action_values::ActionValueTable;
pub use q_table::{QTableAgent, QTableAgentConfig};
