//! pstree library: process tree construction, selection and rendering

pub mod app;
pub mod config;
pub mod context;
pub mod logger;
pub mod prelude;
pub mod process;
pub mod render;
pub mod terminal;
pub mod tree;
pub mod users;
