pub mod source;
mod store;

pub use store::ProcessStore;

/// Process identifier as handed out by the operating system
pub type Pid = libc::pid_t;

/// Uid recorded when a source only knows the owner by name
pub const UNKNOWN_UID: u32 = u32::MAX;

/// A single entry of the process table.
///
/// The identity and payload fields are filled once by a [`source::ProcessSource`].
/// The tree-shape fields are indices into the owning [`ProcessStore`] and are only
/// written by the tree builder and the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub parent_pid: Pid,
    pub group_id: Pid,
    pub owner_uid: u32,
    pub owner_name: String,
    pub command_line: String,
    pub thread_count: u32,

    pub parent: Option<usize>,
    pub first_child: Option<usize>,
    pub next_sibling: Option<usize>,
    pub selected: bool,
}

impl ProcessRecord {
    pub fn new(
        pid: Pid,
        parent_pid: Pid,
        group_id: Pid,
        owner_uid: u32,
        owner_name: impl Into<String>,
        command_line: impl Into<String>,
    ) -> Self {
        Self {
            pid,
            parent_pid,
            group_id,
            owner_uid,
            owner_name: owner_name.into(),
            command_line: command_line.into(),
            thread_count: 1,
            parent: None,
            first_child: None,
            next_sibling: None,
            selected: false,
        }
    }

    pub fn with_threads(mut self, thread_count: u32) -> Self {
        self.thread_count = thread_count.max(1);
        self
    }

    pub fn is_group_leader(&self) -> bool {
        self.pid == self.group_id
    }

    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }
}

#[cfg(test)]
impl ProcessRecord {
    /// Shorthand for tests: a root-owned process in its own group
    pub fn test(pid: Pid, parent_pid: Pid) -> Self {
        Self::new(pid, parent_pid, pid, 0, "root", format!("proc{pid}"))
    }
}
