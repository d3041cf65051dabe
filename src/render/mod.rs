//! Line-art rendering of a pruned process forest

mod charset;
pub mod debug_table;

pub use charset::{Graphics, TreeChars};

use crate::process::ProcessStore;

/// Default maximum depth of the rendered tree
pub const DEFAULT_MAX_DEPTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub graphics: Graphics,
    /// Number of tree levels to draw, the root being the first one
    pub max_depth: usize,
    /// Terminal width; lines are cut to one column less
    pub columns: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            graphics: Graphics::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            columns: 80,
        }
    }
}

/// A node waiting to be drawn
struct Pending {
    idx: usize,
    /// Indentation inherited from the ancestors
    prefix: String,
    depth: usize,
    /// Whether a later sibling will be drawn after this node's subtree
    has_next: bool,
}

pub struct Renderer<'a> {
    store: &'a ProcessStore,
    options: &'a RenderOptions,
}

impl<'a> Renderer<'a> {
    pub fn new(store: &'a ProcessStore, options: &'a RenderOptions) -> Self {
        Self { store, options }
    }

    /// Draw the subtree rooted at `root`, one line per process, in pre-order.
    ///
    /// The root is drawn even when it is not selected; every other node must be.
    pub fn render(&self, root: usize) -> Vec<String> {
        let chars = self.options.graphics.chars();
        let mut lines = Vec::new();
        let mut stack = vec![Pending {
            idx: root,
            prefix: String::new(),
            depth: 0,
            has_next: false,
        }];

        while let Some(node) = stack.pop() {
            if node.depth >= self.options.max_depth {
                continue;
            }

            let children = self
                .store
                .children(node.idx)
                .filter(|&child| self.store[child].selected)
                .collect::<Vec<_>>();

            let branch = if node.depth == 0 {
                ""
            } else if node.has_next {
                chars.branch
            } else {
                chars.last_branch
            };
            lines.push(self.line(&node, branch, !children.is_empty()));

            let child_prefix = if node.depth == 0 {
                // The root's own siblings are never drawn
                "  ".to_string()
            } else if node.has_next {
                format!("{}{} ", node.prefix, chars.bar)
            } else {
                format!("{}  ", node.prefix)
            };

            let last = children.len().saturating_sub(1);
            // Reversed so the first child is popped first
            for (position, &child) in children.iter().enumerate().rev() {
                stack.push(Pending {
                    idx: child,
                    prefix: child_prefix.clone(),
                    depth: node.depth + 1,
                    has_next: position < last,
                });
            }
        }

        lines
    }

    fn line(&self, node: &Pending, branch: &str, has_children: bool) -> String {
        let chars = self.options.graphics.chars();
        let record = &self.store[node.idx];

        let fork = if has_children { chars.parent } else { chars.leaf };
        let leader = if record.is_group_leader() {
            chars.group_leader
        } else {
            chars.not_group_leader
        };
        let threads = if record.thread_count > 1 {
            format!("[{}]", record.thread_count)
        } else {
            String::new()
        };

        let line = format!(
            "{}{}{branch}{fork}{leader}{} {:05} {} {threads}{}",
            chars.start_graphics,
            node.prefix,
            chars.end_graphics,
            record.pid,
            record.owner_name,
            record.command_line,
        );
        truncate(line, self.options.columns.saturating_sub(1))
    }
}

/// Cut `line` to at most `limit` characters
fn truncate(line: String, limit: usize) -> String {
    match line.char_indices().nth(limit) {
        Some((end, _)) => line[..end].to_string(),
        None => line,
    }
}
