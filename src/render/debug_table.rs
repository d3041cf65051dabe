use crate::process::{Pid, ProcessStore};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct ProcessRow {
    idx: usize,
    parent: String,
    #[tabled(rename = "child")]
    first_child: String,
    #[tabled(rename = "sibling")]
    next_sibling: String,
    #[tabled(rename = "PID")]
    pid: Pid,
    #[tabled(rename = "PPID")]
    parent_pid: Pid,
    #[tabled(rename = "sel")]
    selected: bool,
    #[tabled(rename = "COMMAND")]
    command: String,
}

fn link(idx: Option<usize>) -> String {
    idx.map_or_else(|| "-".to_string(), |idx| idx.to_string())
}

/// Tabular dump of the store and its tree links, for `--debug`.
///
/// With `selected_only`, records hidden by the selection are left out.
pub fn build_process_table(store: &ProcessStore, selected_only: bool) -> String {
    let rows = store
        .iter()
        .filter(|(_, record)| !selected_only || record.selected)
        .map(|(idx, record)| ProcessRow {
            idx,
            parent: link(record.parent),
            first_child: link(record.first_child),
            next_sibling: link(record.next_sibling),
            pid: record.pid,
            parent_pid: record.parent_pid,
            selected: record.selected,
            command: record.command_line.clone(),
        })
        .collect::<Vec<_>>();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessRecord;
    use crate::tree::build_hierarchy;

    #[test]
    fn test_process_table() {
        let mut store = ProcessStore::new(vec![
            ProcessRecord::test(1, 0),
            ProcessRecord::test(2, 1),
        ]);
        build_hierarchy(&mut store);
        store[0].selected = true;

        insta::assert_snapshot!(build_process_table(&store, false), @r"
        ┌─────┬────────┬───────┬─────────┬─────┬──────┬───────┬─────────┐
        │ idx │ parent │ child │ sibling │ PID │ PPID │ sel   │ COMMAND │
        ├─────┼────────┼───────┼─────────┼─────┼──────┼───────┼─────────┤
        │ 0   │ -      │ 1     │ -       │ 1   │ 0    │ true  │ proc1   │
        │ 1   │ 0      │ -     │ -       │ 2   │ 1    │ false │ proc2   │
        └─────┴────────┴───────┴─────────┴─────┴──────┴───────┴─────────┘
        ");
    }

    #[test]
    fn test_selected_only_hides_other_rows() {
        let mut store = ProcessStore::new(vec![
            ProcessRecord::test(1, 0),
            ProcessRecord::test(2, 1),
        ]);
        store[1].selected = true;

        let table = build_process_table(&store, true);
        assert!(table.contains("proc2"));
        assert!(!table.contains("proc1"));
    }
}
