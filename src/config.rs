// src/config.rs
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "VOXCOMPOSE_DATA_DIR";
pub const XDG_DATA_HOME_ENV: &str = "XDG_DATA_HOME";
pub const LOG_ENV: &str = "VOXCOMPOSE_LOG";

pub const PROFILE_FILE: &str = "learned_profile.json";
pub const STATE_FILE: &str = "viewer_state.json";

/// Resolved locations of the learning data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub data_dir: PathBuf,
}

impl DataPaths {
    /// Uses `explicit` when given, otherwise resolves from the environment.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        let data_dir = explicit.unwrap_or_else(resolve_data_dir);
        Self { data_dir }
    }

    pub fn profile_path(&self) -> PathBuf {
        self.data_dir.join(PROFILE_FILE)
    }

    pub fn state_path(&self) -> PathBuf {
        self.data_dir.join(STATE_FILE)
    }
}

pub fn resolve_data_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    resolve_data_dir_from(|key| std::env::var(key).ok(), std::env::consts::OS, &home)
}

/// Data directory precedence: `VOXCOMPOSE_DATA_DIR`, then
/// `$XDG_DATA_HOME/voxcompose`, then the platform default under `home`.
/// Empty variables are ignored.
pub fn resolve_data_dir_from(env: impl Fn(&str) -> Option<String>, os: &str, home: &Path) -> PathBuf {
    let non_empty = |key: &str| env(key).filter(|v| !v.is_empty());

    if let Some(dir) = non_empty(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    if let Some(xdg) = non_empty(XDG_DATA_HOME_ENV) {
        return Path::new(&xdg).join("voxcompose");
    }
    if os == "macos" {
        return home.join("Library").join("Application Support").join("VoxCompose");
    }
    home.join(".local").join("share").join("voxcompose")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn override_wins() {
        let dir = resolve_data_dir_from(
            env(&[(DATA_DIR_ENV, "/tmp/voxdata"), (XDG_DATA_HOME_ENV, "/xdg")]),
            "macos",
            Path::new("/Users/test"),
        );
        assert_eq!(dir, PathBuf::from("/tmp/voxdata"));
    }

    #[test]
    fn xdg_is_second() {
        let dir = resolve_data_dir_from(env(&[(XDG_DATA_HOME_ENV, "/xdg")]), "macos", Path::new("/Users/test"));
        assert_eq!(dir, PathBuf::from("/xdg/voxcompose"));
    }

    #[test]
    fn empty_values_are_skipped() {
        let dir = resolve_data_dir_from(
            env(&[(DATA_DIR_ENV, ""), (XDG_DATA_HOME_ENV, "")]),
            "linux",
            Path::new("/home/test"),
        );
        assert_eq!(dir, PathBuf::from("/home/test/.local/share/voxcompose"));
    }

    #[test]
    fn mac_default() {
        let dir = resolve_data_dir_from(env(&[]), "macos", Path::new("/Users/test"));
        assert_eq!(dir, PathBuf::from("/Users/test/Library/Application Support/VoxCompose"));
    }

    #[test]
    fn linux_default() {
        let dir = resolve_data_dir_from(env(&[]), "linux", Path::new("/home/test"));
        assert_eq!(dir, PathBuf::from("/home/test/.local/share/voxcompose"));
    }

    #[test]
    fn explicit_dir_beats_environment() {
        let paths = DataPaths::resolve(Some(PathBuf::from("/explicit")));
        assert_eq!(paths.profile_path(), PathBuf::from("/explicit/learned_profile.json"));
        assert_eq!(paths.state_path(), PathBuf::from("/explicit/viewer_state.json"));
    }
}
