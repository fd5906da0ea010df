mod fifo;
mod generator;
mod mlfq;
mod process;
mod results;
mod round_robin;
mod shortest_job;
mod simulation;

use serde::{Deserialize, Serialize};
use std::{error, fmt, str::FromStr};

pub use fifo::FifoScheduler;
pub use generator::ProcessGenerator;
pub use mlfq::MlfqScheduler;
pub use process::{Process, ProcessSpec, Workload};
pub use results::{CompletionRecord, ResultSet};
pub use round_robin::{Quantum, RoundRobinScheduler};
pub use shortest_job::{ShortestJobFirstScheduler, ShortestTimeToCompletionScheduler};
pub use simulation::Simulation;

/// Simulated time, in abstract ticks.
pub type Ticks = u64;

/// A scheduling discipline. Every implementation is a pure function of the
/// workload: it works on its own copy and keeps no state between runs.
pub trait Scheduler {
    const NAME: &'static str;

    fn schedule(&self, workload: &Workload) -> Vec<CompletionRecord>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "FIFO")]
    Fifo,
    #[serde(rename = "SJF")]
    Sjf,
    #[serde(rename = "STCF")]
    Stcf,
    #[serde(rename = "RR")]
    RoundRobin,
    #[serde(rename = "MLFQ")]
    Mlfq,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Fifo,
        Algorithm::Sjf,
        Algorithm::Stcf,
        Algorithm::RoundRobin,
        Algorithm::Mlfq,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Fifo => "FIFO",
            Algorithm::Sjf => "SJF",
            Algorithm::Stcf => "STCF",
            Algorithm::RoundRobin => "RR",
            Algorithm::Mlfq => "MLFQ",
        }
    }

    /// Runs this algorithm over an independent copy of `workload`.
    /// `quantum` is only consulted by round robin.
    pub fn run(self, workload: &Workload, quantum: Quantum) -> Vec<CompletionRecord> {
        match self {
            Algorithm::Fifo => FifoScheduler.schedule(workload),
            Algorithm::Sjf => ShortestJobFirstScheduler.schedule(workload),
            Algorithm::Stcf => ShortestTimeToCompletionScheduler.schedule(workload),
            Algorithm::RoundRobin => RoundRobinScheduler::new(quantum).schedule(workload),
            Algorithm::Mlfq => MlfqScheduler::new().schedule(workload),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "unknown scheduling algorithm \"{}\" (expected FIFO, SJF, STCF, RR or MLFQ)",
            self.0
        )
    }
}

impl error::Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownAlgorithm(s.to_owned()))
    }
}

/// Reasons a workload is rejected before any scheduling happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkloadError {
    Empty,
    InvalidBurstTime { pid: i64, burst_time: i64 },
    InvalidProcessId(i64),
    DuplicateProcessId(u32),
    BurstTimeTooLarge { pid: u32, burst_time: Ticks },
    TotalBurstTooLarge,
    TooManyProcesses(usize),
}

impl fmt::Display for WorkloadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WorkloadError::Empty => write!(f, "invalid workload: no processes"),
            WorkloadError::InvalidBurstTime { pid, burst_time } => write!(
                f,
                "invalid workload: process {pid} has non-positive burst time {burst_time}"
            ),
            WorkloadError::InvalidProcessId(pid) => {
                write!(f, "invalid workload: process id {pid} is not positive")
            }
            WorkloadError::DuplicateProcessId(pid) => {
                write!(f, "invalid workload: process id {pid} appears more than once")
            }
            WorkloadError::BurstTimeTooLarge { pid, burst_time } => write!(
                f,
                "invalid workload: process {pid} has burst time {burst_time}, above {}",
                Process::MAX_BURST
            ),
            WorkloadError::TotalBurstTooLarge => write!(
                f,
                "invalid workload: total burst time exceeds {}",
                Process::MAX_BURST
            ),
            WorkloadError::TooManyProcesses(count) => write!(
                f,
                "invalid workload: {count} processes do not fit in {} ids",
                u32::MAX
            ),
        }
    }
}

impl error::Error for WorkloadError {}

/// Runs `order` back to back on a single clock. Shared by the
/// non-preemptive disciplines.
fn run_to_completion<'a>(order: impl IntoIterator<Item = &'a Process>) -> Vec<CompletionRecord> {
    let mut clock: Ticks = 0;
    order
        .into_iter()
        .map(|process| {
            clock += process.burst_time();
            log::trace!("P{} runs to completion at t={}", process.pid(), clock);
            CompletionRecord::new(process.pid(), clock)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_names_round_trip_through_from_str() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>(), Ok(algorithm));
        }
        assert_eq!("rr".parse::<Algorithm>(), Ok(Algorithm::RoundRobin));
        assert!("lottery".parse::<Algorithm>().is_err());
    }

    #[test]
    fn algorithm_serializes_as_its_name() {
        let json = serde_json::to_string(&Algorithm::RoundRobin).unwrap();
        assert_eq!(json, "\"RR\"");
    }

    #[test]
    fn error_messages_name_the_offender() {
        let err = WorkloadError::InvalidBurstTime {
            pid: 4,
            burst_time: -1,
        };
        assert!(err.to_string().contains("process 4"));
        assert!(WorkloadError::DuplicateProcessId(2)
            .to_string()
            .contains("id 2"));
    }
}
