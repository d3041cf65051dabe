use super::ProcessSource;
use crate::prelude::*;
use crate::process::{Pid, ProcessRecord, UNKNOWN_UID};
use crate::users::OwnerLookup;
use nix::unistd;
use sysinfo::{ProcessRefreshKind, RefreshKind, System, UpdateKind};

/// Reads the process table through `sysinfo`, for platforms without `/proc`
pub struct SysinfoSource;

fn process_group(pid: Pid) -> Pid {
    match unistd::getpgid(Some(unistd::Pid::from_raw(pid))) {
        Ok(pgid) => pgid.as_raw(),
        Err(e) => {
            debug!("Failed to get the process group of {pid}: {e}");
            0
        }
    }
}

impl ProcessSource for SysinfoSource {
    fn name(&self) -> &'static str {
        "sysinfo"
    }

    fn read_processes(&self, owners: &mut dyn OwnerLookup) -> Result<Vec<ProcessRecord>> {
        let system = System::new_with_specifics(
            RefreshKind::nothing().with_processes(
                ProcessRefreshKind::nothing()
                    .with_cmd(UpdateKind::Always)
                    .with_user(UpdateKind::Always),
            ),
        );

        let records = system
            .processes()
            .iter()
            .sorted_by_key(|(pid, _)| pid.as_u32())
            .map(|(pid, process)| {
                let pid = pid.as_u32() as Pid;
                let parent_pid = process.parent().map(|p| p.as_u32() as Pid).unwrap_or(0);

                let command_line = if process.cmd().is_empty() {
                    process.name().to_string_lossy().into_owned()
                } else {
                    process
                        .cmd()
                        .iter()
                        .map(|arg| arg.to_string_lossy())
                        .join(" ")
                };

                let (uid, owner) = match process.user_id() {
                    Some(uid) => (**uid, owners.owner_name(**uid)),
                    None => (UNKNOWN_UID, "?".to_string()),
                };

                ProcessRecord::new(
                    pid,
                    parent_pid,
                    process_group(pid),
                    uid,
                    owner,
                    command_line,
                )
            })
            .collect_vec();

        Ok(records)
    }
}
