use crate::process::{Pid, ProcessRecord, ProcessStore};
use crate::users::ROOT_USER;

/// Criteria deciding which branches of the tree are shown.
///
/// A record matches when any active criterion matches it. A match keeps its
/// ancestors (for context) and its whole subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Show every process, ignoring all other criteria
    pub show_all: bool,
    /// Keep branches with processes owned by this user
    pub owner: Option<String>,
    /// Keep branches with processes not owned by root
    pub exclude_root_owned: bool,
    /// Keep branches containing these PIDs
    pub pids: Vec<Pid>,
    /// Keep branches whose command line contains one of these texts
    pub substrings: Vec<String>,
    /// PID of pstree itself, never matched by a substring search
    pub own_pid: Pid,
}

impl Selection {
    pub fn matches(&self, record: &ProcessRecord) -> bool {
        if self.show_all {
            return true;
        }

        self.owner
            .as_deref()
            .is_some_and(|owner| record.owner_name == owner)
            || (self.exclude_root_owned && record.owner_name != ROOT_USER)
            || self.pids.contains(&record.pid)
            || (record.pid != self.own_pid
                && self
                    .substrings
                    .iter()
                    .any(|text| record.command_line.contains(text.as_str())))
    }
}

/// Flag every record to display under `selection`.
///
/// Selected records always have all their ancestors selected, which lets the
/// upward walk stop at the first ancestor already flagged.
pub fn mark_selected(store: &mut ProcessStore, selection: &Selection) {
    if selection.show_all {
        for idx in 0..store.len() {
            store[idx].selected = true;
        }
        return;
    }

    // Records whose whole subtree is already flagged
    let mut subtree_marked = vec![false; store.len()];

    for idx in 0..store.len() {
        if !selection.matches(&store[idx]) {
            continue;
        }
        mark_ancestors(store, idx);
        mark_descendants(store, idx, &mut subtree_marked);
    }
}

fn mark_ancestors(store: &mut ProcessStore, idx: usize) {
    let mut parent = store[idx].parent;
    while let Some(current) = parent {
        if store[current].selected {
            break;
        }
        store[current].selected = true;
        parent = store[current].parent;
    }
}

fn mark_descendants(store: &mut ProcessStore, idx: usize, subtree_marked: &mut [bool]) {
    let mut pending = vec![idx];
    while let Some(current) = pending.pop() {
        if subtree_marked[current] {
            continue;
        }
        subtree_marked[current] = true;
        store[current].selected = true;
        pending.extend(store.children(current));
    }
}

/// First selected record along a sibling chain starting at `link`
fn next_selected(store: &ProcessStore, mut link: Option<usize>) -> Option<usize> {
    while let Some(idx) = link {
        if store[idx].selected {
            break;
        }
        link = store[idx].next_sibling;
    }
    link
}

/// Unlink unselected records from the child and sibling chains of selected
/// ones. Unselected records keep their links but are no longer reachable.
pub fn prune(store: &mut ProcessStore) {
    for idx in 0..store.len() {
        if !store[idx].selected {
            continue;
        }
        let first_child = next_selected(store, store[idx].first_child);
        let next_sibling = next_selected(store, store[idx].next_sibling);
        store[idx].first_child = first_child;
        store[idx].next_sibling = next_sibling;
    }
}
