//! Filesystem locations
//! 文件系统路径
//!
//! | What | Default | Override |
//! |------|---------|----------|
//! | config file | `<config_dir>/cliptrans/config.json` | `CLIPTRANS_CONFIG` |
//! | logs | `<data_local_dir>/cliptrans/logs` | `CLIPTRANS_LOG_DIR` |
//! | static UI | first existing of `./static`, `../static`, `<exe dir>/static` | `CLIPTRANS_STATIC_DIR` |

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context;

const APP_DIR: &str = "cliptrans";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_file: PathBuf,
    /// Base for relative SQLite connection strings.
    pub config_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppPaths {
    pub fn resolve() -> anyhow::Result<Self> {
        Self::resolve_with(
            |key| std::env::var_os(key),
            dirs::config_dir(),
            dirs::data_local_dir(),
        )
    }

    pub fn resolve_with(
        env: impl Fn(&str) -> Option<OsString>,
        config_root: Option<PathBuf>,
        data_root: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        let config_file = match env("CLIPTRANS_CONFIG") {
            Some(path) => PathBuf::from(path),
            None => config_root
                .context("could not determine the user config directory")?
                .join(APP_DIR)
                .join(CONFIG_FILE),
        };
        let config_dir = config_file
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let logs_dir = match env("CLIPTRANS_LOG_DIR") {
            Some(path) => PathBuf::from(path),
            None => data_root
                .context("could not determine the local data directory")?
                .join(APP_DIR)
                .join("logs"),
        };

        Ok(Self {
            config_file,
            config_dir,
            logs_dir,
        })
    }
}

/// Locate the directory holding the web UI, if any.
pub fn find_static_dir() -> Option<PathBuf> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    static_dir_candidates(std::env::var_os("CLIPTRANS_STATIC_DIR"), exe_dir)
        .into_iter()
        .find(|dir| dir.is_dir())
}

fn static_dir_candidates(overridden: Option<OsString>, exe_dir: Option<PathBuf>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(dir) = overridden {
        candidates.push(PathBuf::from(dir));
    }
    candidates.push(PathBuf::from("static"));
    candidates.push(PathBuf::from("../static"));
    if let Some(dir) = exe_dir {
        candidates.push(dir.join("static"));
    }
    candidates
}
