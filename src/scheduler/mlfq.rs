use super::{CompletionRecord, Process, Scheduler, Ticks, Workload};
use std::collections::VecDeque;

/// A feedback level. `quantum == None` runs whatever it dequeues to completion.
struct Level {
    quantum: Option<Ticks>,
    queue: VecDeque<Process>,
}

impl Level {
    fn new(quantum: Option<Ticks>) -> Self {
        Self {
            quantum,
            queue: VecDeque::new(),
        }
    }
}

/// Multi-level feedback queue with three levels.
///
/// Everything starts on the top level. A process that outlives its level's
/// quantum is demoted to the tail of the next level; the bottom level runs to
/// completion. Exactly one process is serviced per step and the highest
/// non-empty level is picked afresh each step.
pub struct MlfqScheduler {
    quanta: [Option<Ticks>; 3],
}

impl MlfqScheduler {
    pub const TOP_QUANTUM: Ticks = 2;
    pub const MIDDLE_QUANTUM: Ticks = 4;

    pub fn new() -> Self {
        Self {
            quanta: [Some(Self::TOP_QUANTUM), Some(Self::MIDDLE_QUANTUM), None],
        }
    }
}

impl Default for MlfqScheduler {
    fn default() -> Self {
        MlfqScheduler::new()
    }
}

impl Scheduler for MlfqScheduler {
    const NAME: &'static str = "MLFQ";

    fn schedule(&self, workload: &Workload) -> Vec<CompletionRecord> {
        log::debug!("{}: scheduling {} processes", Self::NAME, workload.len());

        let mut levels: Vec<Level> = self.quanta.iter().map(|&q| Level::new(q)).collect();
        levels[0].queue.extend(workload.working_copy());

        let mut records = Vec::with_capacity(workload.len());
        let mut clock: Ticks = 0;

        while let Some(level) = levels.iter().position(|level| !level.queue.is_empty()) {
            let Some(mut process) = levels[level].queue.pop_front() else {
                break;
            };

            match levels[level].quantum {
                Some(quantum) if process.remaining() > quantum => {
                    clock += process.run_for(quantum);
                    // The bottom level never has a quantum, so `level + 1` exists.
                    log::trace!(
                        "P{} demoted to level {} at t={} with {} left",
                        process.pid(),
                        level + 2,
                        clock,
                        process.remaining()
                    );
                    levels[level + 1].queue.push_back(process);
                }
                _ => {
                    clock += process.run_to_completion();
                    log::trace!(
                        "P{} completes on level {} at t={}",
                        process.pid(),
                        level + 1,
                        clock
                    );
                    records.push(CompletionRecord::new(process.pid(), clock));
                }
            }
        }

        log::debug!("{}: finished at t={}", Self::NAME, clock);
        records
    }
}
