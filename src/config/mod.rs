//! Load and validate the launcher configuration file.
//!
//! The file is optional: without one the launcher assumes it is started from
//! the installation directory, the layout the course environment ships.

use std::{env, path::PathBuf};

use serde::Deserialize;
use tracing::{error, info};

use crate::lib::errors::LauncherConfigError;

/// Top-level configuration container.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    /// Directory holding `mlonmcu/` and `target_sw/`.
    pub install_root: PathBuf,
    /// Config file the values came from, if any.
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawLauncherConfig {
    launcher: Option<RawLauncherSection>,
}

#[derive(Debug, Deserialize)]
struct RawLauncherSection {
    install_root: Option<PathBuf>,
}

impl LauncherConfig {
    /// Read the config file when present; fall back to defaults otherwise.
    pub fn load_or_default(path: PathBuf) -> Result<Self, LauncherConfigError> {
        if !path.is_file() {
            return Ok(Self {
                install_root: default_install_root()?,
                source_path: None,
            });
        }
        Self::load_from_path(path)
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: PathBuf) -> Result<Self, LauncherConfigError> {
        info!(
            target: "kwsflow::config",
            path = %path.display(),
            "Starting configuration load"
        );

        let builder = config::Config::builder().add_source(config::File::from(path.clone()));
        let document = builder.build().map_err(|err| {
            let error = LauncherConfigError::from_read_error(path.clone(), err);
            error!(
                target: "kwsflow::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawLauncherConfig = document.try_deserialize().map_err(|err| {
            let error = LauncherConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "kwsflow::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        Self::from_raw(raw, path)
    }

    fn from_raw(raw: RawLauncherConfig, path: PathBuf) -> Result<Self, LauncherConfigError> {
        let section = raw
            .launcher
            .unwrap_or(RawLauncherSection { install_root: None });

        let install_root = match section.install_root {
            Some(root) => {
                if root.as_os_str().is_empty() || !root.is_absolute() {
                    return Err(LauncherConfigError::InvalidField {
                        path,
                        field: "launcher.install_root",
                        message: format!("Provide an absolute path: {}", root.display()),
                    });
                }
                root
            }
            None => default_install_root()?,
        };

        Ok(Self {
            install_root,
            source_path: Some(path),
        })
    }
}

fn default_install_root() -> Result<PathBuf, LauncherConfigError> {
    env::current_dir().map_err(|source| LauncherConfigError::CurrentDir { source })
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use tempfile::tempdir;

    use crate::lib::errors::LauncherConfigError;

    use super::LauncherConfig;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let temp = tempdir().expect("can create temporary directory");
        let path = temp.path().join("config.toml");
        fs::write(&path, contents).expect("can write config fixture");
        (temp, path)
    }

    #[test]
    fn absolute_install_root_is_accepted() {
        let (_temp, path) = write_config("[launcher]\ninstall_root = \"/opt/micro-kws\"\n");

        let config = LauncherConfig::load_from_path(path.clone()).expect("config should load");

        assert_eq!(config.install_root, PathBuf::from("/opt/micro-kws"));
        assert_eq!(config.source_path, Some(path));
    }

    #[test]
    fn relative_install_root_is_rejected() {
        let (_temp, path) = write_config("[launcher]\ninstall_root = \"micro-kws\"\n");

        let error = LauncherConfig::load_from_path(path)
            .expect_err("relative install_root should be rejected");

        match error {
            LauncherConfigError::InvalidField { field, .. } => {
                assert_eq!(field, "launcher.install_root")
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_file_falls_back_to_current_directory() {
        let temp = tempdir().expect("can create temporary directory");
        let path = temp.path().join("does-not-exist.toml");

        let config = LauncherConfig::load_or_default(path).expect("defaults should apply");

        assert_eq!(config.source_path, None);
        assert!(config.install_root.is_absolute());
    }

    #[test]
    fn empty_file_falls_back_to_current_directory_root() {
        let (_temp, path) = write_config("");

        let config = LauncherConfig::load_from_path(path.clone()).expect("config should load");

        assert!(config.install_root.is_absolute());
        assert_eq!(config.source_path, Some(path));
    }
}
