use super::ProcessRecord;
use crate::prelude::*;
use crate::users::OwnerLookup;

mod ps_output;
#[cfg(target_os = "linux")]
mod procfs_source;
#[cfg(not(target_os = "linux"))]
mod sysinfo_source;

pub use ps_output::PsOutputSource;
#[cfg(target_os = "linux")]
pub use procfs_source::ProcfsSource;
#[cfg(not(target_os = "linux"))]
pub use sysinfo_source::SysinfoSource;

/// Produces the flat process list the tree is built from.
///
/// Records that cannot be read (a process exiting mid-scan, a malformed line)
/// are skipped by the source; only failures to reach the process table as a
/// whole are reported as errors.
pub trait ProcessSource {
    fn name(&self) -> &'static str;

    fn read_processes(&self, owners: &mut dyn OwnerLookup) -> Result<Vec<ProcessRecord>>;
}

/// The source reading the live process table of this machine
pub fn live_source() -> Box<dyn ProcessSource> {
    #[cfg(target_os = "linux")]
    {
        Box::new(ProcfsSource)
    }
    #[cfg(not(target_os = "linux"))]
    {
        Box::new(SysinfoSource)
    }
}
