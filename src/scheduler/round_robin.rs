use super::{CompletionRecord, Process, Scheduler, Ticks, Workload};
use std::{collections::VecDeque, fmt};

/// The round robin time slice, resolved from whatever the caller asked for.
///
/// Missing or non-positive requests fall back to [`Quantum::DEFAULT`]; the
/// fallback is visible through [`Quantum::is_substituted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantum {
    ticks: Ticks,
    requested: Option<i64>,
}

impl Quantum {
    pub const DEFAULT: Ticks = 3;

    pub fn new(requested: Option<i64>) -> Self {
        let ticks = match requested {
            Some(value) if value > 0 => value as Ticks,
            Some(value) => {
                log::warn!(
                    "round robin quantum {} is not positive, using default {}",
                    value,
                    Self::DEFAULT
                );
                Self::DEFAULT
            }
            None => Self::DEFAULT,
        };

        Self { ticks, requested }
    }

    pub fn ticks(&self) -> Ticks {
        self.ticks
    }

    pub fn is_substituted(&self) -> bool {
        !matches!(self.requested, Some(value) if value > 0)
    }
}

impl Default for Quantum {
    fn default() -> Self {
        Quantum::new(None)
    }
}

impl fmt::Display for Quantum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.requested {
            Some(value) if value > 0 => write!(f, "{}", self.ticks),
            Some(value) => write!(f, "{} (default, {} was not positive)", self.ticks, value),
            None => write!(f, "{} (default)", self.ticks),
        }
    }
}

pub struct RoundRobinScheduler {
    quantum: Quantum,
}

impl RoundRobinScheduler {
    pub fn new(quantum: Quantum) -> Self {
        Self { quantum }
    }
}

impl Default for RoundRobinScheduler {
    fn default() -> Self {
        RoundRobinScheduler::new(Quantum::default())
    }
}

impl Scheduler for RoundRobinScheduler {
    const NAME: &'static str = "RR";

    fn schedule(&self, workload: &Workload) -> Vec<CompletionRecord> {
        let quantum = self.quantum.ticks();
        log::debug!(
            "{}: scheduling {} processes with quantum {}",
            Self::NAME,
            workload.len(),
            quantum
        );

        let mut queue: VecDeque<Process> = workload.working_copy().into();
        let mut records = Vec::with_capacity(workload.len());
        let mut clock: Ticks = 0;

        while let Some(mut process) = queue.pop_front() {
            clock += process.run_for(quantum);

            if process.is_finished() {
                log::trace!("P{} completes at t={}", process.pid(), clock);
                records.push(CompletionRecord::new(process.pid(), clock));
            } else {
                log::trace!(
                    "P{} preempted at t={} with {} left",
                    process.pid(),
                    clock,
                    process.remaining()
                );
                queue.push_back(process);
            }
        }

        log::debug!("{}: finished at t={}", Self::NAME, clock);
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ProcessSpec;

    fn workload(bursts: &[(i64, i64)]) -> Workload {
        let specs: Vec<_> = bursts
            .iter()
            .map(|&(id, burst_time)| ProcessSpec { id, burst_time })
            .collect();
        Workload::from_specs(&specs).unwrap()
    }

    #[test]
    fn quantum_three_walkthrough() {
        let scheduler = RoundRobinScheduler::new(Quantum::new(Some(3)));
        let records = scheduler.schedule(&workload(&[(1, 4), (2, 3), (3, 5)]));
        assert_eq!(
            records,
            vec![
                CompletionRecord::new(2, 6),
                CompletionRecord::new(1, 10),
                CompletionRecord::new(3, 12),
            ]
        );
    }

    #[test]
    fn non_positive_quantum_falls_back_to_default() {
        let workload = workload(&[(1, 7), (2, 2), (3, 5), (4, 3)]);
        let expected = RoundRobinScheduler::new(Quantum::new(Some(3))).schedule(&workload);

        for requested in [Some(0), Some(-4), None] {
            let quantum = Quantum::new(requested);
            assert_eq!(quantum.ticks(), Quantum::DEFAULT);
            assert!(quantum.is_substituted());
            assert_eq!(RoundRobinScheduler::new(quantum).schedule(&workload), expected);
        }

        assert!(!Quantum::new(Some(3)).is_substituted());
    }

    #[test]
    fn large_quantum_degenerates_to_fifo() {
        let records = RoundRobinScheduler::new(Quantum::new(Some(100)))
            .schedule(&workload(&[(1, 4), (2, 3), (3, 5)]));
        let order: Vec<_> = records.iter().map(|r| r.process_id).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn requeued_processes_keep_fifo_order() {
        // Quantum 1: everyone takes turns until they run out.
        let records = RoundRobinScheduler::new(Quantum::new(Some(1)))
            .schedule(&workload(&[(1, 3), (2, 1), (3, 2)]));
        assert_eq!(
            records,
            vec![
                CompletionRecord::new(2, 2),
                CompletionRecord::new(3, 5),
                CompletionRecord::new(1, 6),
            ]
        );
    }

    #[test]
    fn quantum_display_mentions_substitution() {
        assert_eq!(Quantum::new(Some(5)).to_string(), "5");
        assert_eq!(Quantum::new(None).to_string(), "3 (default)");
        assert!(Quantum::new(Some(-1)).to_string().contains("-1"));
    }
}
