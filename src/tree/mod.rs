//! Forest construction and branch selection over a [`ProcessStore`](crate::process::ProcessStore)

mod builder;
mod root;
mod selection;

pub use builder::build_hierarchy;
pub use root::find_root;
pub use selection::{Selection, mark_selected, prune};
