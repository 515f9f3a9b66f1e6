//! Scores of training runs in CSV.
use anyhow::Result;
use csv::WriterBuilder;
use episim_core::{Reporter, TrainingHistory};
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct EpisodeRow {
    episode: usize,
    score: f32,
    rolling_average: f32,
    target_score: f32,
}

/// Writes a row `episode, score, rolling_average, target_score` per episode.
pub struct CsvReporter {
    path: PathBuf,
}

impl CsvReporter {
    /// Constructs a reporter writing to the given file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Reporter for CsvReporter {
    fn report(&mut self, history: &TrainingHistory) -> Result<()> {
        let mut wtr = WriterBuilder::new().from_path(&self.path)?;
        for (episode, (score, rolling_average)) in history.iter().enumerate() {
            wtr.serialize(EpisodeRow {
                episode,
                score,
                rolling_average,
                target_score: history.target_score(),
            })?;
        }
        wtr.flush()?;
        info!("Wrote scores of {} episodes to {:?}", history.len(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_csv_reporter() -> Result<()> {
        let mut history = TrainingHistory::with_capacity(10.0, 2);
        history.push(2.0, 2.0);
        history.push(4.0, 3.0);

        let dir = TempDir::new("csv_reporter")?;
        let path = dir.path().join("scores.csv");
        CsvReporter::new(&path).report(&history)?;

        let content = std::fs::read_to_string(&path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "episode,score,rolling_average,target_score",
                "0,2.0,2.0,10.0",
                "1,4.0,3.0,10.0",
            ]
        );
        Ok(())
    }
}
