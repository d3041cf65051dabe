use crate::prelude::*;
use crate::process::{ProcessRecord, ProcessStore};

/// Find the index of the process the tree is drawn from when no PID was requested.
///
/// Candidates, in decreasing priority: PID 1, a process whose parent is PID 0,
/// a child of PID 1, then a process that is its own parent.
pub fn find_root(store: &ProcessStore) -> Result<usize> {
    let rules: [fn(&ProcessRecord) -> bool; 4] = [
        |record| record.pid == 1,
        |record| record.parent_pid == 0,
        |record| record.parent_pid == 1,
        |record| record.pid == record.parent_pid,
    ];

    rules
        .iter()
        .find_map(|rule| store.records().iter().position(rule))
        .ok_or_else(|| {
            anyhow!("No process found with PID == 1 || PPID == 0 || PPID == 1 || PID == PPID")
        })
}
