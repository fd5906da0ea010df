use super::{Process, Ticks, Workload, WorkloadError};
use rand::prelude::*;

/// Produces synthetic workloads: ids `1..=count`, bursts uniform in
/// `1..=max_burst`.
pub struct ProcessGenerator {
    rng: StdRng,
    max_burst: Ticks,
}

impl ProcessGenerator {
    pub const DEFAULT_MAX_BURST: Ticks = 10;

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            rng,
            max_burst: Self::DEFAULT_MAX_BURST,
        }
    }

    pub fn with_max_burst(mut self, max_burst: Ticks) -> Self {
        self.max_burst = max_burst.clamp(1, Process::MAX_BURST);
        self
    }

    pub fn generate(&mut self, count: usize) -> Result<Workload, WorkloadError> {
        let count = u32::try_from(count).map_err(|_| WorkloadError::TooManyProcesses(count))?;
        let processes = (1..=count)
            .map(|pid| {
                let burst_time = self.rng.random_range(1..=self.max_burst);
                Process::new(pid, burst_time)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let workload = Workload::new(processes)?;
        log::info!(
            "generated {} processes, total burst {}",
            workload.len(),
            workload.total_burst()
        );
        Ok(workload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_and_bursts_in_range() {
        let workload = ProcessGenerator::new(Some(7)).generate(25).unwrap();
        assert_eq!(workload.len(), 25);

        for (index, process) in workload.processes().iter().enumerate() {
            assert_eq!(process.pid(), index as u32 + 1);
            assert!((1..=ProcessGenerator::DEFAULT_MAX_BURST).contains(&process.burst_time()));
        }
    }

    #[test]
    fn same_seed_same_workload() {
        let first = ProcessGenerator::new(Some(42)).generate(10).unwrap();
        let second = ProcessGenerator::new(Some(42)).generate(10).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn zero_processes_is_an_empty_workload() {
        assert_eq!(
            ProcessGenerator::new(Some(1)).generate(0),
            Err(WorkloadError::Empty)
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn process_count_must_fit_process_ids() {
        let count = u32::MAX as usize + 1;
        assert_eq!(
            ProcessGenerator::new(Some(1)).generate(count),
            Err(WorkloadError::TooManyProcesses(count))
        );
    }

    #[test]
    fn max_burst_is_respected() {
        let workload = ProcessGenerator::new(Some(3))
            .with_max_burst(2)
            .generate(50)
            .unwrap();
        assert!(workload.processes().iter().all(|p| p.burst_time() <= 2));
    }
}
