use newsquota_store::{CsvStore, Dataset, Record};

/// Writes the dataset plus not yet committed rows to the output file.
#[derive(Debug)]
pub struct Checkpointer {
    store: CsvStore,
    every: usize,
    since_last: usize,
    saves: usize,
}

impl Checkpointer {
    pub fn new(store: CsvStore, every: usize) -> Self {
        Self {
            store,
            every: every.max(1),
            since_last: 0,
            saves: 0,
        }
    }

    pub fn store(&self) -> &CsvStore {
        &self.store
    }

    /// Number of checkpoints written so far.
    pub fn saves(&self) -> usize {
        self.saves
    }

    /// Counts one admitted row, returns true when an interval checkpoint is due.
    pub fn record_admitted(&mut self) -> bool {
        self.since_last += 1;
        self.since_last >= self.every
    }

    pub fn persist(&mut self, base: &Dataset, pending: &[Record]) -> anyhow::Result<usize> {
        let rows = self.store.persist(base.records().iter().chain(pending))?;
        self.since_last = 0;
        self.saves += 1;
        Ok(rows)
    }

    /// Merges `pending` into `base` and persists the result.
    pub fn commit(&mut self, mut base: Dataset, pending: Vec<Record>) -> anyhow::Result<Dataset> {
        base.extend(pending);
        self.persist(&base, &[])?;
        Ok(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_and_commit() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");
        let mut checkpointer = Checkpointer::new(CsvStore::new(&out), 2);

        assert!(!checkpointer.record_admitted());
        assert!(checkpointer.record_admitted());

        let base = Dataset::new(vec![Record::new("Existing headline", "World", "", "")]);
        let pending = vec![Record::new("Fresh headline here", "World", "Caasimada", "")];
        assert_eq!(2, checkpointer.persist(&base, &pending).unwrap());
        assert!(!checkpointer.record_admitted());
        assert_eq!(2, Dataset::from_csv(&out).unwrap().len());

        let committed = checkpointer.commit(base, pending).unwrap();
        assert_eq!(2, committed.len());
        assert_eq!(committed, Dataset::from_csv(&out).unwrap());
        assert_eq!(2, checkpointer.saves());
    }
}
