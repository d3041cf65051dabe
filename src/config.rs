use std::{env, fs, path::PathBuf};

use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// Persistent defaults for pstree.
///
/// Read from `~/.config/pstree/config.yaml` when it exists. Every field is
/// optional and command line flags always take precedence:
///
/// ```yaml
/// graphics: 3
/// level: 10
/// wide: true
/// ```
#[derive(Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct PstreeConfig {
    /// Character set index, see `--graphics`
    pub graphics: Option<u8>,
    /// Maximum tree depth, see `--level`
    pub level: Option<usize>,
    /// Disable truncation to the terminal width, see `--wide`
    pub wide: Option<bool>,
}

/// Get the path to the configuration file, following the XDG Base Directory Specification
/// at https://specifications.freedesktop.org/basedir-spec/basedir-spec-latest.html
fn get_configuration_file_path() -> Option<PathBuf> {
    let config_dir = match env::var_os("XDG_CONFIG_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(env::var_os("HOME")?).join(".config"),
    };
    Some(config_dir.join("pstree").join("config.yaml"))
}

impl PstreeConfig {
    /// Load the configuration. If it does not exist, return a default configuration.
    pub fn load() -> Result<Self> {
        let Some(config_path) = get_configuration_file_path() else {
            debug!("No HOME nor XDG_CONFIG_HOME, using the default configuration");
            return Ok(Self::default());
        };

        match fs::read(&config_path) {
            Ok(config_str) => {
                let config: PstreeConfig =
                    serde_yaml::from_slice(&config_str).context(format!(
                        "Failed to parse pstree config at {}",
                        config_path.display()
                    ))?;
                debug!("Config loaded from {}", config_path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Config file not found at {}", config_path.display());
                Ok(Self::default())
            }
            Err(e) => bail!("Failed to load config: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use temp_env::with_vars;

    #[test]
    fn test_missing_config_is_default() {
        let dir = tempfile::tempdir().unwrap();
        with_vars([("XDG_CONFIG_HOME", Some(dir.path()))], || {
            assert_eq!(PstreeConfig::load().unwrap(), PstreeConfig::default());
        });
    }

    #[test]
    fn test_load_from_xdg_config_home() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("pstree")).unwrap();
        fs::write(
            dir.path().join("pstree/config.yaml"),
            "graphics: 2\nlevel: 5\n",
        )
        .unwrap();

        with_vars([("XDG_CONFIG_HOME", Some(dir.path()))], || {
            let config = PstreeConfig::load().unwrap();
            assert_eq!(config.graphics, Some(2));
            assert_eq!(config.level, Some(5));
            assert_eq!(config.wide, None);
        });
    }

    #[test]
    fn test_falls_back_to_home() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".config/pstree")).unwrap();
        fs::write(dir.path().join(".config/pstree/config.yaml"), "wide: true\n").unwrap();

        with_vars(
            [
                ("XDG_CONFIG_HOME", None),
                ("HOME", Some(dir.path().as_os_str())),
            ],
            || {
                assert_eq!(PstreeConfig::load().unwrap().wide, Some(true));
            },
        );
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("pstree")).unwrap();
        fs::write(dir.path().join("pstree/config.yaml"), "level: deep\n").unwrap();

        with_vars([("XDG_CONFIG_HOME", Some(dir.path()))], || {
            let err = PstreeConfig::load().unwrap_err();
            assert!(err.to_string().contains("Failed to parse pstree config"));
        });
    }
}
