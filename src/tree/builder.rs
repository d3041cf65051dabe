use crate::process::ProcessStore;

/// Link every record of the store to its parent.
///
/// The parent of a record is the last record listed with a PID equal to its
/// parent PID. Records whose parent is missing, or which would be their own
/// parent, stay roots. Children are chained in store order.
pub fn build_hierarchy(store: &mut ProcessStore) {
    // Tail of each parent's child chain, so appending stays O(1)
    let mut last_child: Vec<Option<usize>> = vec![None; store.len()];

    for idx in 0..store.len() {
        let Some(parent) = store.index_of(store[idx].parent_pid) else {
            continue;
        };
        if parent == idx {
            continue;
        }

        store[idx].parent = Some(parent);
        match last_child[parent] {
            None => store[parent].first_child = Some(idx),
            Some(tail) => store[tail].next_sibling = Some(idx),
        }
        last_child[parent] = Some(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{Pid, ProcessRecord};

    fn store_of(pairs: &[(Pid, Pid)]) -> ProcessStore {
        let mut store = ProcessStore::new(
            pairs
                .iter()
                .map(|&(pid, ppid)| ProcessRecord::test(pid, ppid))
                .collect(),
        );
        build_hierarchy(&mut store);
        store
    }

    fn child_pids(store: &ProcessStore, idx: usize) -> Vec<Pid> {
        store.children(idx).map(|child| store[child].pid).collect()
    }

    #[test]
    fn test_children_match_parent_pid_in_discovery_order() {
        // Deliberately unordered: children listed before their parent
        let store = store_of(&[(5, 2), (2, 1), (1, 0), (3, 1), (4, 2), (6, 1)]);

        assert_eq!(store[store.index_of(5).unwrap()].parent, store.index_of(2));
        assert_eq!(store[store.index_of(2).unwrap()].parent, store.index_of(1));
        assert_eq!(store[store.index_of(1).unwrap()].parent, None);

        assert_eq!(child_pids(&store, store.index_of(1).unwrap()), vec![2, 3, 6]);
        assert_eq!(child_pids(&store, store.index_of(2).unwrap()), vec![5, 4]);
        assert!(child_pids(&store, store.index_of(6).unwrap()).is_empty());
    }

    #[test]
    fn test_every_child_set_matches_parent_pids() {
        let pairs = [(1, 0), (10, 1), (11, 1), (12, 10), (13, 10), (14, 11), (15, 99)];
        let store = store_of(&pairs);

        for (idx, record) in store.iter() {
            let mut expected = pairs
                .iter()
                .filter(|&&(pid, ppid)| ppid == record.pid && pid != record.pid)
                .map(|&(pid, _)| pid)
                .collect::<Vec<_>>();
            let mut actual = child_pids(&store, idx);
            expected.sort();
            actual.sort();
            assert_eq!(actual, expected, "children of pid {}", record.pid);
        }
    }

    #[test]
    fn test_missing_parent_makes_a_root() {
        let store = store_of(&[(15, 99)]);
        assert_eq!(store[0].parent, None);
    }

    #[test]
    fn test_self_parented_record_is_a_root() {
        let store = store_of(&[(0, 0), (1, 0)]);
        assert_eq!(store[0].parent, None);
        assert_eq!(store[0].next_sibling, None);
        assert_eq!(child_pids(&store, 0), vec![1]);
    }

    #[test]
    fn test_pid_reuse_attaches_to_later_record() {
        let store = store_of(&[(1, 0), (7, 1), (8, 7), (7, 1)]);

        assert_eq!(store[2].parent, Some(3));
        assert_eq!(store[1].first_child, None);
        assert_eq!(child_pids(&store, 3), vec![8]);
        // Both records sharing PID 7 are children of PID 1
        assert_eq!(child_pids(&store, 0), vec![7, 7]);
    }
}
