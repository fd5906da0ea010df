use super::{Algorithm, Ticks};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    pub process_id: u32,
    pub completion_time: Ticks,
}

impl CompletionRecord {
    pub fn new(process_id: u32, completion_time: Ticks) -> Self {
        Self {
            process_id,
            completion_time,
        }
    }
}

/// Completion records keyed by algorithm, each in finish order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    runs: BTreeMap<Algorithm, Vec<CompletionRecord>>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the records of a run, replacing any previous run of the same
    /// algorithm.
    pub fn insert(
        &mut self,
        algorithm: Algorithm,
        records: Vec<CompletionRecord>,
    ) -> Option<Vec<CompletionRecord>> {
        self.runs.insert(algorithm, records)
    }

    pub fn get(&self, algorithm: Algorithm) -> Option<&[CompletionRecord]> {
        self.runs.get(&algorithm).map(Vec::as_slice)
    }

    pub fn clear(&mut self) {
        self.runs.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn algorithms(&self) -> impl Iterator<Item = Algorithm> + '_ {
        self.runs.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Algorithm, &[CompletionRecord])> + '_ {
        self.runs
            .iter()
            .map(|(&algorithm, records)| (algorithm, records.as_slice()))
    }

    pub fn average_completion_time(&self, algorithm: Algorithm) -> Option<f64> {
        let records = self.runs.get(&algorithm)?;
        if records.is_empty() {
            return None;
        }

        let total: Ticks = records.iter().map(|r| r.completion_time).sum();
        Some(total as f64 / records.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rerunning_an_algorithm_overwrites_it() {
        let mut results = ResultSet::new();
        assert!(results
            .insert(Algorithm::Fifo, vec![CompletionRecord::new(1, 4)])
            .is_none());

        let previous = results.insert(Algorithm::Fifo, vec![CompletionRecord::new(1, 5)]);
        assert_eq!(previous, Some(vec![CompletionRecord::new(1, 4)]));
        assert_eq!(results.len(), 1);
        assert_eq!(
            results.get(Algorithm::Fifo),
            Some(&[CompletionRecord::new(1, 5)][..])
        );
    }

    #[test]
    fn algorithms_iterate_in_declaration_order() {
        let mut results = ResultSet::new();
        results.insert(Algorithm::Mlfq, Vec::new());
        results.insert(Algorithm::Fifo, Vec::new());
        results.insert(Algorithm::RoundRobin, Vec::new());

        let order: Vec<_> = results.algorithms().collect();
        assert_eq!(
            order,
            vec![Algorithm::Fifo, Algorithm::RoundRobin, Algorithm::Mlfq]
        );
    }

    #[test]
    fn average_completion_time() {
        let mut results = ResultSet::new();
        results.insert(
            Algorithm::Sjf,
            vec![CompletionRecord::new(2, 3), CompletionRecord::new(1, 6)],
        );
        assert_eq!(results.average_completion_time(Algorithm::Sjf), Some(4.5));
        assert_eq!(results.average_completion_time(Algorithm::Fifo), None);
    }

    #[test]
    fn serializes_with_interchange_names() {
        let mut results = ResultSet::new();
        results.insert(Algorithm::RoundRobin, vec![CompletionRecord::new(2, 6)]);

        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "RR": [{ "processId": 2, "completionTime": 6 }] })
        );
    }

    #[test]
    fn clear_empties_everything() {
        let mut results = ResultSet::new();
        results.insert(Algorithm::Stcf, vec![CompletionRecord::new(1, 1)]);
        results.clear();
        assert!(results.is_empty());
        assert!(results.get(Algorithm::Stcf).is_none());
    }
}
