use crate::app::Cli;
use crate::config::PstreeConfig;
use crate::prelude::*;
use crate::process::{Pid, ProcessStore};
use crate::render::{DEFAULT_MAX_DEPTH, Graphics, RenderOptions};
use crate::terminal;
use crate::tree::Selection;
use crate::users::{UserDirectory, current_username};

/// Everything a run needs once the command line and the config file are merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub selection: Selection,
    pub render: RenderOptions,
}

impl TryFrom<(&Cli, &PstreeConfig)> for Config {
    type Error = Error;

    fn try_from((cli, file): (&Cli, &PstreeConfig)) -> Result<Self> {
        let graphics = match cli.graphics.or(file.graphics) {
            Some(index) => Graphics::try_from(index)?,
            None => terminal::default_graphics(),
        };
        let wide = cli.wide || file.wide.unwrap_or(false);
        let max_depth = cli.level.or(file.level).unwrap_or(DEFAULT_MAX_DEPTH);
        let columns = terminal::effective_columns(terminal::terminal_width(wide), graphics);

        let (pids, substrings) = split_targets(&cli.targets);
        let mut selection = Selection {
            show_all: cli.all,
            owner: None,
            exclude_root_owned: cli.no_root,
            pids,
            substrings,
            own_pid: std::process::id() as Pid,
        };

        if cli.all {
            selection.pids.clear();
        } else {
            // An explicit empty name turns the owner criterion off
            selection.owner = match &cli.user {
                Some(user) => Some(user.clone()).filter(|user| !user.is_empty()),
                None => current_username(),
            };
        }

        if let Some(owner) = &selection.owner {
            ensure!(
                UserDirectory::user_exists(owner)?,
                "user '{owner}' does not exist"
            );
        }

        debug!("graphics: {graphics}, max depth: {max_depth}");
        debug!("{selection:?}");

        Ok(Self {
            selection,
            render: RenderOptions {
                graphics,
                max_depth,
                columns,
            },
        })
    }
}

/// Numeric targets are PIDs, everything else is searched in command lines
fn split_targets(targets: &[String]) -> (Vec<Pid>, Vec<String>) {
    let mut pids = Vec::new();
    let mut substrings = Vec::new();
    for target in targets {
        match target.parse::<Pid>() {
            Ok(pid) => pids.push(pid),
            Err(_) => substrings.push(target.clone()),
        }
    }
    (pids, substrings)
}

impl Config {
    /// Resolve the target PIDs against `store`.
    ///
    /// Returns the indices of the targets found, in command line order. A PID
    /// missing from the store is searched as text instead.
    pub fn resolve_targets(&mut self, store: &ProcessStore) -> Vec<usize> {
        let mut roots = Vec::new();
        let mut found = Vec::new();
        for &pid in &self.selection.pids {
            if found.contains(&pid) {
                continue;
            }
            match store.index_of(pid) {
                Some(idx) => {
                    roots.push(idx);
                    found.push(pid);
                }
                None => {
                    info!("No process with PID {pid}, searching for it in command lines");
                    self.selection.substrings.push(pid.to_string());
                }
            }
        }
        self.selection.pids = found;
        roots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessRecord;
    use crate::terminal::MAX_LINE;
    use clap::Parser;

    fn config(args: &[&str]) -> Result<Config> {
        let cli = Cli::try_parse_from(std::iter::once("pstree").chain(args.iter().copied()))?;
        Config::try_from((&cli, &PstreeConfig::default()))
    }

    #[test]
    fn test_targets_are_split_into_pids_and_texts() {
        let config = config(&["-w", "-u", "root", "42", "sshd", "7"]).unwrap();

        assert_eq!(config.selection.pids, vec![42, 7]);
        assert_eq!(config.selection.substrings, vec!["sshd".to_string()]);
        assert_eq!(config.selection.owner.as_deref(), Some("root"));
        assert_eq!(config.selection.own_pid, std::process::id() as Pid);
    }

    #[test]
    fn test_all_clears_owner_and_pids() {
        let config = config(&["-a", "-w", "-u", "root", "42", "bash"]).unwrap();

        assert!(config.selection.show_all);
        assert_eq!(config.selection.owner, None);
        assert!(config.selection.pids.is_empty());
        assert_eq!(config.selection.substrings, vec!["bash".to_string()]);
    }

    #[test]
    fn test_empty_user_disables_owner_filter() {
        let config = config(&["-w", "-u", "", "sshd"]).unwrap();

        assert_eq!(config.selection.owner, None);
        assert_eq!(config.selection.substrings, vec!["sshd".to_string()]);
    }

    #[test]
    fn test_unknown_user_is_rejected() {
        let err = config(&["-w", "-u", "no-such-user-for-pstree"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "user 'no-such-user-for-pstree' does not exist"
        );
    }

    #[test]
    fn test_invalid_graphics_is_rejected() {
        let err = config(&["-a", "-g", "7"]).unwrap_err();
        assert!(err.to_string().contains("Invalid graphics parameter 7"));
    }

    #[test]
    fn test_render_options_from_flags() {
        let config = config(&["-a", "-w", "-g", "2", "-l", "4"]).unwrap();

        assert_eq!(
            config.render,
            RenderOptions {
                graphics: Graphics::Vt100,
                max_depth: 4,
                columns: MAX_LINE - 1,
            }
        );
    }

    #[test]
    fn test_flags_win_over_config_file() {
        let cli = Cli::try_parse_from(["pstree", "-a", "-g", "0"]).unwrap();
        let file = PstreeConfig {
            graphics: Some(3),
            level: Some(2),
            wide: Some(true),
        };

        let config = Config::try_from((&cli, &file)).unwrap();

        assert_eq!(config.render.graphics, Graphics::Ascii);
        assert_eq!(config.render.max_depth, 2);
        assert_eq!(config.render.columns, MAX_LINE - 1);
    }

    #[test]
    fn test_missing_pids_become_searches() {
        let mut config = config(&["-a", "-w"]).unwrap();
        config.selection.pids = vec![2, 99, 1];
        let store = ProcessStore::new(vec![ProcessRecord::test(1, 0), ProcessRecord::test(2, 1)]);

        let roots = config.resolve_targets(&store);

        assert_eq!(roots, vec![1, 0]);
        assert_eq!(config.selection.pids, vec![2, 1]);
        assert_eq!(config.selection.substrings, vec!["99".to_string()]);
    }

    #[test]
    fn test_repeated_pid_is_drawn_once() {
        let mut config = config(&["-a", "-w"]).unwrap();
        config.selection.pids = vec![1, 2, 1];
        let store = ProcessStore::new(vec![ProcessRecord::test(1, 0), ProcessRecord::test(2, 1)]);

        let roots = config.resolve_targets(&store);

        assert_eq!(roots, vec![0, 1]);
        assert_eq!(config.selection.pids, vec![1, 2]);
        assert!(config.selection.substrings.is_empty());
    }
}
