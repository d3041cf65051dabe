use super::{Pid, ProcessRecord};
use std::collections::HashMap;
use std::ops::{Index, IndexMut};

/// Flat, fixed-order collection of process records.
///
/// Records are never reordered or removed once the store is built, so every
/// index handed out by the store (and stored in the tree links) stays valid for
/// the lifetime of the store.
#[derive(Debug, Default)]
pub struct ProcessStore {
    records: Vec<ProcessRecord>,
    /// Maps a PID to the last record listed with it
    by_pid: HashMap<Pid, usize>,
}

impl ProcessStore {
    pub fn new(records: Vec<ProcessRecord>) -> Self {
        let mut by_pid = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            // Later entries overwrite earlier ones: on PID reuse the most
            // recently listed process wins
            by_pid.insert(record.pid, idx);
        }
        Self { records, by_pid }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index of the last record carrying `pid`
    pub fn index_of(&self, pid: Pid) -> Option<usize> {
        self.by_pid.get(&pid).copied()
    }

    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &ProcessRecord)> {
        self.records.iter().enumerate()
    }

    /// Iterate over the direct children of `idx` following the sibling chain
    pub fn children(&self, idx: usize) -> Children<'_> {
        Children {
            store: self,
            next: self.records[idx].first_child,
        }
    }
}

impl Index<usize> for ProcessStore {
    type Output = ProcessRecord;

    fn index(&self, idx: usize) -> &ProcessRecord {
        &self.records[idx]
    }
}

impl IndexMut<usize> for ProcessStore {
    fn index_mut(&mut self, idx: usize) -> &mut ProcessRecord {
        &mut self.records[idx]
    }
}

pub struct Children<'a> {
    store: &'a ProcessStore,
    next: Option<usize>,
}

impl Iterator for Children<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.next?;
        self.next = self.store[current].next_sibling;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_of_prefers_last_listed_pid() {
        let store = ProcessStore::new(vec![
            ProcessRecord::test(7, 1),
            ProcessRecord::test(1, 0),
            ProcessRecord::test(7, 1),
        ]);

        assert_eq!(store.index_of(7), Some(2));
        assert_eq!(store.index_of(1), Some(1));
        assert_eq!(store.index_of(42), None);
    }

    #[test]
    fn test_children_follows_sibling_chain() {
        let mut store = ProcessStore::new(vec![
            ProcessRecord::test(1, 0),
            ProcessRecord::test(2, 1),
            ProcessRecord::test(3, 1),
        ]);
        store[0].first_child = Some(1);
        store[1].next_sibling = Some(2);

        assert_eq!(store.children(0).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(store.children(1).count(), 0);
    }
}
