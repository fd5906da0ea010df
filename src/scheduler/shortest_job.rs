use super::{run_to_completion, CompletionRecord, Process, Scheduler, Workload};

/// Processes ordered by burst time. `sort_by_key` is stable, so equal bursts
/// keep their arrival order.
fn shortest_first(workload: &Workload) -> Vec<&Process> {
    let mut order: Vec<&Process> = workload.processes().iter().collect();
    order.sort_by_key(|process| process.burst_time());
    order
}

pub struct ShortestJobFirstScheduler;

impl Scheduler for ShortestJobFirstScheduler {
    const NAME: &'static str = "SJF";

    fn schedule(&self, workload: &Workload) -> Vec<CompletionRecord> {
        log::debug!("{}: scheduling {} processes", Self::NAME, workload.len());
        run_to_completion(shortest_first(workload))
    }
}

/// Shortest time to completion, without preemption.
///
/// Every process arrives at t=0 and a running process is never interrupted,
/// so the only decision point is the start and the ordering matches
/// [`ShortestJobFirstScheduler`] exactly.
pub struct ShortestTimeToCompletionScheduler;

impl Scheduler for ShortestTimeToCompletionScheduler {
    const NAME: &'static str = "STCF";

    fn schedule(&self, workload: &Workload) -> Vec<CompletionRecord> {
        log::debug!("{}: scheduling {} processes", Self::NAME, workload.len());
        run_to_completion(shortest_first(workload))
    }
}
