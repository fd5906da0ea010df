use super::{Algorithm, CompletionRecord, Quantum, ResultSet, Workload};
use std::thread;

/// A workload together with the results of every algorithm run against it.
pub struct Simulation {
    workload: Workload,
    quantum: Quantum,
    results: ResultSet,
}

impl Simulation {
    pub fn new(workload: Workload, quantum: Quantum) -> Self {
        Self {
            workload,
            quantum,
            results: ResultSet::new(),
        }
    }

    pub fn workload(&self) -> &Workload {
        &self.workload
    }

    pub fn quantum(&self) -> Quantum {
        self.quantum
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    /// Swaps in a new workload. Results from the old one no longer apply.
    pub fn replace_workload(&mut self, workload: Workload) {
        self.workload = workload;
        self.results.clear();
    }

    pub fn run(&mut self, algorithm: Algorithm) -> &[CompletionRecord] {
        let records = algorithm.run(&self.workload, self.quantum);
        log::info!(
            "{} finished {} processes at t={}",
            algorithm,
            records.len(),
            records.last().map_or(0, |r| r.completion_time)
        );
        self.results.insert(algorithm, records);
        self.results.get(algorithm).unwrap_or_default()
    }

    /// Runs every algorithm. Runs share nothing, so each gets its own thread.
    pub fn run_all(&mut self) {
        let workload = &self.workload;
        let quantum = self.quantum;

        let runs: Vec<(Algorithm, Vec<CompletionRecord>)> = thread::scope(|scope| {
            let handles: Vec<_> = Algorithm::ALL
                .into_iter()
                .map(|algorithm| {
                    scope.spawn(move || (algorithm, algorithm.run(workload, quantum)))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(run) => run,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        for (algorithm, records) in runs {
            self.results.insert(algorithm, records);
        }
        log::info!("ran all {} algorithms", Algorithm::ALL.len());
    }
}
