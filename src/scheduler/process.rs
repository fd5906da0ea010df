use super::{Ticks, WorkloadError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pid: u32,
    burst_time: Ticks,
    remaining: Ticks,
}

impl Process {
    /// Bursts, and the total of a workload's bursts, must stay representable
    /// as a non-negative `i64`.
    pub const MAX_BURST: Ticks = i64::MAX as Ticks;

    pub fn new(pid: u32, burst_time: Ticks) -> Result<Self, WorkloadError> {
        if pid == 0 {
            return Err(WorkloadError::InvalidProcessId(0));
        }
        if burst_time == 0 {
            return Err(WorkloadError::InvalidBurstTime {
                pid: i64::from(pid),
                burst_time: 0,
            });
        }
        if burst_time > Self::MAX_BURST {
            return Err(WorkloadError::BurstTimeTooLarge { pid, burst_time });
        }

        Ok(Self {
            pid,
            burst_time,
            remaining: burst_time,
        })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn burst_time(&self) -> Ticks {
        self.burst_time
    }

    pub fn remaining(&self) -> Ticks {
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Runs the process for at most `slice` ticks and returns how many ticks
    /// were actually consumed.
    pub fn run_for(&mut self, slice: Ticks) -> Ticks {
        let ran = slice.min(self.remaining);
        self.remaining -= ran;
        ran
    }

    pub fn run_to_completion(&mut self) -> Ticks {
        self.run_for(self.remaining)
    }
}

/// The interchange form of a process, as read from a workload file.
/// Fields are signed so that bad input can be reported instead of rejected by
/// the deserializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSpec {
    pub id: i64,
    pub burst_time: i64,
}

impl TryFrom<ProcessSpec> for Process {
    type Error = WorkloadError;

    fn try_from(spec: ProcessSpec) -> Result<Self, Self::Error> {
        let pid = u32::try_from(spec.id)
            .ok()
            .filter(|&pid| pid > 0)
            .ok_or(WorkloadError::InvalidProcessId(spec.id))?;
        let burst_time = Ticks::try_from(spec.burst_time)
            .ok()
            .filter(|&burst| burst > 0)
            .ok_or(WorkloadError::InvalidBurstTime {
                pid: spec.id,
                burst_time: spec.burst_time,
            })?;

        Process::new(pid, burst_time)
    }
}

/// A validated, ordered set of processes. Input order is arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    processes: Vec<Process>,
}

impl Workload {
    pub fn new(processes: Vec<Process>) -> Result<Self, WorkloadError> {
        if processes.is_empty() {
            return Err(WorkloadError::Empty);
        }

        let mut seen = HashSet::with_capacity(processes.len());
        let mut total: Ticks = 0;
        for process in &processes {
            if !seen.insert(process.pid()) {
                return Err(WorkloadError::DuplicateProcessId(process.pid()));
            }
            // The simulated clock ends at exactly this total, so every
            // completion time fits once the total does.
            total = total
                .checked_add(process.burst_time())
                .filter(|&total| total <= Process::MAX_BURST)
                .ok_or(WorkloadError::TotalBurstTooLarge)?;
        }

        // Workloads are only ever built from fresh processes.
        let processes = processes
            .into_iter()
            .map(|process| Process {
                remaining: process.burst_time,
                ..process
            })
            .collect();

        Ok(Self { processes })
    }

    pub fn from_specs(specs: &[ProcessSpec]) -> Result<Self, WorkloadError> {
        let processes = specs
            .iter()
            .map(|&spec| Process::try_from(spec))
            .collect::<Result<Vec<_>, _>>()?;
        Workload::new(processes)
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// An independent copy of the processes that a run may mutate freely.
    pub fn working_copy(&self) -> Vec<Process> {
        self.processes.clone()
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn total_burst(&self) -> Ticks {
        self.processes.iter().map(Process::burst_time).sum()
    }

    pub fn burst_of(&self, pid: u32) -> Option<Ticks> {
        self.processes
            .iter()
            .find(|process| process.pid() == pid)
            .map(Process::burst_time)
    }
}
