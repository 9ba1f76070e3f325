use std::path::{Path, PathBuf};

/// Environment variable that overrides the default data directory
pub const DATA_DIR_ENV: &str = "TASKLIST_DIR";

#[derive(Debug, thiserror::Error)]
#[error("could not determine a data directory; pass --data-dir or set {DATA_DIR_ENV}")]
pub struct NoDataDir;

/// Where the task list, config, widget snapshot, and log live.
///
/// Precedence: the `--data-dir` flag, then `TASKLIST_DIR`, then the
/// platform data directory.
pub fn resolve_data_dir(flag: Option<&Path>) -> Result<PathBuf, NoDataDir> {
    let env = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
    pick_data_dir(flag, env, dirs::data_dir())
}

fn pick_data_dir(
    flag: Option<&Path>,
    env: Option<PathBuf>,
    platform: Option<PathBuf>,
) -> Result<PathBuf, NoDataDir> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = env.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }
    platform.map(|d| d.join("tasklist")).ok_or(NoDataDir)
}
