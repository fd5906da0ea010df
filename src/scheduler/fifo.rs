use super::{run_to_completion, CompletionRecord, Scheduler, Workload};

/// First in, first out: processes run to completion in arrival order.
pub struct FifoScheduler;

impl Scheduler for FifoScheduler {
    const NAME: &'static str = "FIFO";

    fn schedule(&self, workload: &Workload) -> Vec<CompletionRecord> {
        log::debug!("{}: scheduling {} processes", Self::NAME, workload.len());
        run_to_completion(workload.processes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ProcessSpec;

    fn workload(bursts: &[i64]) -> Workload {
        let specs: Vec<_> = bursts
            .iter()
            .enumerate()
            .map(|(index, &burst_time)| ProcessSpec {
                id: index as i64 + 1,
                burst_time,
            })
            .collect();
        Workload::from_specs(&specs).unwrap()
    }

    #[test]
    fn runs_in_arrival_order() {
        let records = FifoScheduler.schedule(&workload(&[4, 3, 5]));
        assert_eq!(
            records,
            vec![
                CompletionRecord::new(1, 4),
                CompletionRecord::new(2, 7),
                CompletionRecord::new(3, 12),
            ]
        );
    }

    #[test]
    fn long_job_first_delays_everyone() {
        let records = FifoScheduler.schedule(&workload(&[10, 1, 1]));
        let times: Vec<_> = records.iter().map(|r| r.completion_time).collect();
        assert_eq!(times, vec![10, 11, 12]);
    }
}
