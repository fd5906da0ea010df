use crate::{
    display::DisplayTerminal,
    export,
    scheduler::{Algorithm, CompletionRecord, ProcessGenerator, ResultSet, Simulation},
};
use std::{collections::BTreeMap, io, path::PathBuf, time::Duration};

pub enum RunnerEvent {
    Quit,
    Pause,
    Resume,
    Step,
    Tick,
    Run(Algorithm),
    RunAll,
    Generate,
    Export,
    None,
}

/// How much of each algorithm's finished output has been shown so far.
///
/// Results are computed in one go; the replay only decides how many records
/// of each run are visible, one more per tick.
#[derive(Debug, Default)]
pub struct Replay {
    revealed: BTreeMap<Algorithm, usize>,
}

impl Replay {
    pub fn restart(&mut self, algorithm: Algorithm) {
        self.revealed.insert(algorithm, 0);
    }

    pub fn reset(&mut self) {
        self.revealed.clear();
    }

    /// Reveals one more record of every unfinished run. Returns whether
    /// anything changed.
    pub fn advance(&mut self, results: &ResultSet) -> bool {
        let mut progressed = false;
        for (algorithm, shown) in self.revealed.iter_mut() {
            let total = results.get(*algorithm).map_or(0, <[_]>::len);
            if *shown < total {
                *shown += 1;
                progressed = true;
            }
        }
        progressed
    }

    pub fn visible<'a>(
        &self,
        results: &'a ResultSet,
        algorithm: Algorithm,
    ) -> &'a [CompletionRecord] {
        let records = results.get(algorithm).unwrap_or_default();
        let shown = self
            .revealed
            .get(&algorithm)
            .copied()
            .unwrap_or(records.len());
        &records[..shown.min(records.len())]
    }

    pub fn is_complete(&self, results: &ResultSet, algorithm: Algorithm) -> bool {
        self.visible(results, algorithm).len() == results.get(algorithm).map_or(0, <[_]>::len)
    }
}

pub struct RunnerOptions {
    pub processes: usize,
    pub export_path: PathBuf,
    pub json_path: Option<PathBuf>,
    pub reveal_interval: Duration,
}

pub struct ResultsRunner {
    terminal: DisplayTerminal,
    simulation: Simulation,
    generator: ProcessGenerator,
    options: RunnerOptions,
    replay: Replay,
    paused: bool,
    status: String,
}

impl ResultsRunner {
    pub fn new(
        simulation: Simulation,
        generator: ProcessGenerator,
        options: RunnerOptions,
    ) -> Result<Self, io::Error> {
        let terminal = DisplayTerminal::new(options.reveal_interval)?;

        let status = if simulation.quantum().is_substituted() {
            format!("Round robin will use quantum {}", simulation.quantum())
        } else {
            "Ready".to_owned()
        };

        Ok(Self {
            terminal,
            simulation,
            generator,
            options,
            replay: Replay::default(),
            paused: false,
            status,
        })
    }

    fn run_algorithm(&mut self, algorithm: Algorithm) {
        self.simulation.run(algorithm);
        self.replay.restart(algorithm);
        self.status = format!("Running {algorithm}");
    }

    fn run_all(&mut self) {
        self.simulation.run_all();
        for algorithm in Algorithm::ALL {
            self.replay.restart(algorithm);
        }
        self.status = "Running all algorithms".to_owned();
    }

    fn generate(&mut self) {
        match self.generator.generate(self.options.processes) {
            Ok(workload) => {
                self.simulation.replace_workload(workload);
                self.replay.reset();
                self.status = format!("Generated {} processes", self.options.processes);
            }
            Err(err) => {
                log::error!("{err}");
                self.status = err.to_string();
            }
        }
    }

    fn export(&mut self) {
        let results = self.simulation.results();
        if results.is_empty() {
            self.status = "Nothing to export yet".to_owned();
            return;
        }

        let outcome = export::write_report(
            &self.options.export_path,
            results,
            Some(self.simulation.workload()),
        )
        .and_then(|()| match &self.options.json_path {
            Some(json_path) => export::write_json(json_path, results),
            None => Ok(()),
        });

        self.status = match outcome {
            Ok(()) => format!("Exported to {}", self.options.export_path.display()),
            Err(err) => {
                log::error!("{err:#}");
                format!("Export failed: {err:#}")
            }
        };
    }

    // Returns false if the program should quit
    pub fn run(&mut self) -> Result<bool, io::Error> {
        self.terminal
            .draw(&self.simulation, &self.replay, self.paused, &self.status)?;

        match self.terminal.get_input() {
            RunnerEvent::Quit => return Ok(false),
            RunnerEvent::Pause if !self.paused => self.paused = true,
            RunnerEvent::Resume if self.paused => self.paused = false,
            RunnerEvent::Step if self.paused => {
                self.replay.advance(self.simulation.results());
            }
            RunnerEvent::Tick if !self.paused => {
                self.replay.advance(self.simulation.results());
            }
            RunnerEvent::Run(algorithm) => self.run_algorithm(algorithm),
            RunnerEvent::RunAll => self.run_all(),
            RunnerEvent::Generate => self.generate(),
            RunnerEvent::Export => self.export(),
            _ => {}
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> ResultSet {
        let mut results = ResultSet::new();
        results.insert(
            Algorithm::Fifo,
            vec![
                CompletionRecord::new(1, 4),
                CompletionRecord::new(2, 7),
                CompletionRecord::new(3, 12),
            ],
        );
        results.insert(Algorithm::Mlfq, vec![CompletionRecord::new(1, 4)]);
        results
    }

    #[test]
    fn restarted_runs_are_revealed_one_record_per_tick() {
        let results = results();
        let mut replay = Replay::default();
        replay.restart(Algorithm::Fifo);
        assert!(replay.visible(&results, Algorithm::Fifo).is_empty());

        assert!(replay.advance(&results));
        assert_eq!(
            replay.visible(&results, Algorithm::Fifo),
            &[CompletionRecord::new(1, 4)]
        );

        assert!(replay.advance(&results));
        assert!(replay.advance(&results));
        assert!(replay.is_complete(&results, Algorithm::Fifo));
        assert!(!replay.advance(&results));
    }

    #[test]
    fn untracked_runs_are_fully_visible() {
        let results = results();
        let replay = Replay::default();
        assert_eq!(replay.visible(&results, Algorithm::Fifo).len(), 3);
        assert!(replay.is_complete(&results, Algorithm::Mlfq));
        assert!(replay.visible(&results, Algorithm::Sjf).is_empty());
    }

    #[test]
    fn replay_never_changes_the_results() {
        let results = results();
        let before = results.clone();
        let mut replay = Replay::default();
        replay.restart(Algorithm::Fifo);
        replay.restart(Algorithm::Mlfq);
        while replay.advance(&results) {}
        assert_eq!(results, before);
        assert_eq!(
            replay.visible(&results, Algorithm::Fifo),
            before.get(Algorithm::Fifo).unwrap()
        );
    }
}
