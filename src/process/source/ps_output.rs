use super::ProcessSource;
use crate::prelude::*;
use crate::process::{Pid, ProcessRecord, UNKNOWN_UID};
use crate::users::OwnerLookup;
use std::io::Read;
use std::path::PathBuf;

/// Header names recognised for an optional thread-count column
const THREAD_COLUMNS: [&str; 3] = ["NLWP", "THCNT", "THCOUNT"];

/// Where `ps` output is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PsInput {
    Stdin,
    File(PathBuf),
}

impl From<PathBuf> for PsInput {
    fn from(path: PathBuf) -> Self {
        if path.as_os_str() == "-" {
            PsInput::Stdin
        } else {
            PsInput::File(path)
        }
    }
}

/// Reads a process table captured with e.g. `ps -eo uid,pid,ppid,pgid,args`.
///
/// The first line is a header. The expected columns are
/// `UID|USER PID PPID PGID [NLWP|THCNT] ARGS...`.
pub struct PsOutputSource {
    input: PsInput,
}

impl PsOutputSource {
    pub fn new(input: impl Into<PsInput>) -> Self {
        Self {
            input: input.into(),
        }
    }

    fn read_input(&self) -> Result<String> {
        let mut content = String::new();
        match &self.input {
            PsInput::Stdin => {
                std::io::stdin()
                    .read_to_string(&mut content)
                    .context("Failed to read process list from stdin")?;
            }
            PsInput::File(path) => {
                content = std::fs::read_to_string(path).with_context(|| {
                    format!("Failed to read process list from {}", path.display())
                })?;
            }
        }
        Ok(content)
    }
}

impl ProcessSource for PsOutputSource {
    fn name(&self) -> &'static str {
        "ps-output"
    }

    fn read_processes(&self, owners: &mut dyn OwnerLookup) -> Result<Vec<ProcessRecord>> {
        let content = self.read_input()?;
        Ok(parse_ps_output(&content, owners))
    }
}

/// Split off the first `n` whitespace separated fields, returning them and the
/// untouched remainder of the line
fn split_fields(line: &str, n: usize) -> (Vec<&str>, &str) {
    let mut fields = Vec::with_capacity(n);
    let mut rest = line.trim_start();
    while fields.len() < n && !rest.is_empty() {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        fields.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    (fields, rest.trim_end())
}

fn parse_line(
    line: &str,
    has_thread_column: bool,
    owners: &mut dyn OwnerLookup,
) -> Option<ProcessRecord> {
    let leading = if has_thread_column { 5 } else { 4 };
    let (fields, command_line) = split_fields(line, leading);
    if fields.len() < 4 {
        return None;
    }

    let pid = fields[1].parse::<Pid>().ok()?;
    let parent_pid = fields[2].parse::<Pid>().ok()?;
    let group_id = fields[3].parse::<Pid>().ok()?;

    let (uid, owner) = match fields[0].parse::<u32>() {
        Ok(uid) => (uid, owners.owner_name(uid)),
        Err(_) => (UNKNOWN_UID, fields[0].to_string()),
    };

    let thread_count = fields
        .get(4)
        .filter(|_| has_thread_column)
        .and_then(|threads| threads.parse::<u32>().ok())
        .unwrap_or(1);

    Some(
        ProcessRecord::new(pid, parent_pid, group_id, uid, owner, command_line)
            .with_threads(thread_count),
    )
}

/// Parse `ps` output into records, skipping the header and malformed lines
pub fn parse_ps_output(content: &str, owners: &mut dyn OwnerLookup) -> Vec<ProcessRecord> {
    let mut lines = content.lines();
    let Some(header) = lines.next() else {
        return Vec::new();
    };

    let has_thread_column = header
        .split_whitespace()
        .nth(4)
        .is_some_and(|column| THREAD_COLUMNS.contains(&column.to_uppercase().as_str()));

    lines
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let record = parse_line(line, has_thread_column, owners);
            if record.is_none() {
                debug!("Skipping malformed ps line: {line:?}");
            }
            record
        })
        .collect()
}
