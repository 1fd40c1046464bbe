use std::{fs, io, path::Path};

use serde::Serialize;

use crate::{
    env::{Cell, Terrain},
    Error, Result,
};

/// How an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Goal,
    Fire,
    /// The iteration budget ran out mid-episode
    Truncated,
}

impl Outcome {
    pub(crate) fn from_terrain(terrain: Terrain) -> Self {
        match terrain {
            Terrain::Goal => Outcome::Goal,
            Terrain::Fire => Outcome::Fire,
            _ => Outcome::Truncated,
        }
    }
}

/// Statistics for one finished episode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeSummary {
    pub episode: u64,
    pub start_row: usize,
    pub start_col: usize,
    pub steps: u64,
    pub total_reward: f32,
    pub outcome: Outcome,
    /// [`QTableAgent::q_sum`](crate::algo::tabular::QTableAgent::q_sum) after the episode
    pub q_sum: f32,
}

impl EpisodeSummary {
    pub fn start(&self) -> Cell {
        (self.start_row, self.start_col)
    }
}

/// Result of a training run
///
/// The counters always cover the whole run. `trace` holds one [`EpisodeSummary`] per
/// episode only when the agent was configured to trace, and stays empty otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingReport {
    pub iterations: u64,
    pub episodes: u64,
    /// Episodes that ended at a goal
    pub goals: u64,
    /// Episodes that ended in fire
    pub fires: u64,
    pub trace: Vec<EpisodeSummary>,
}

impl TrainingReport {
    pub(crate) fn record(&mut self, outcome: Outcome) {
        self.episodes += 1;
        match outcome {
            Outcome::Goal => self.goals += 1,
            Outcome::Fire => self.fires += 1,
            Outcome::Truncated => {}
        }
    }

    /// Write the traced episode summaries as CSV
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for episode in &self.trace {
            wtr.serialize(episode)?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Write the episode trace to `path`, creating parent directories
    pub fn save_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let file = fs::File::create(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_csv(file)
    }
}
