use super::ProcessSource;
use crate::prelude::*;
use crate::process::ProcessRecord;
use crate::users::OwnerLookup;
use procfs::process::Process;

/// Reads the process table directly from `/proc`
pub struct ProcfsSource;

impl ProcfsSource {
    fn read_process(
        process: &Process,
        owners: &mut dyn OwnerLookup,
    ) -> procfs::ProcResult<ProcessRecord> {
        let uid = process.uid()?;
        let stat = process.stat()?;

        // Kernel threads have an empty cmdline, show their comm instead
        let command_line = match process.cmdline() {
            Ok(args) if args.iter().any(|arg| !arg.is_empty()) => {
                args.iter().join(" ").trim().to_string()
            }
            _ => stat.comm.clone(),
        };

        let thread_count = u32::try_from(stat.num_threads).unwrap_or(1);

        Ok(ProcessRecord::new(
            stat.pid,
            stat.ppid,
            stat.pgrp,
            uid,
            owners.owner_name(uid),
            command_line,
        )
        .with_threads(thread_count))
    }
}

impl ProcessSource for ProcfsSource {
    fn name(&self) -> &'static str {
        "procfs"
    }

    fn read_processes(&self, owners: &mut dyn OwnerLookup) -> Result<Vec<ProcessRecord>> {
        let processes =
            procfs::process::all_processes().context("Failed to list processes in /proc")?;

        let mut records = Vec::new();
        for process in processes {
            let process = match process {
                Ok(process) => process,
                Err(e) => {
                    debug!("Skipping unreadable /proc entry: {e}");
                    continue;
                }
            };

            match Self::read_process(&process, owners) {
                Ok(record) => records.push(record),
                // The process most likely exited while we were scanning
                Err(e) => debug!("Skipping process {}: {e}", process.pid()),
            }
        }

        Ok(records)
    }
}
