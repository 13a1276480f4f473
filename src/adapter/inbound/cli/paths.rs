//! Path utilities for the crawler.
//!
//! The crawler runs from its working directory: `config.toml`, `./logs/`
//! and `./certs/` are all resolved relative to it.

use std::path::PathBuf;

/// File name looked up when `--config` is not given.
pub const CONFIG_FILE: &str = "config.toml";

/// Returns the default config file path (`./config.toml`).
pub fn default_config() -> PathBuf {
    PathBuf::from(CONFIG_FILE)
}

/// Ensures the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &std::path::Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_relative_to_working_directory() {
        let config = default_config();
        assert!(config.is_relative());
        assert_eq!(config.file_name().unwrap(), CONFIG_FILE);
    }

    #[test]
    fn ensure_parent_dir_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("config.toml");

        ensure_parent_dir(&target).unwrap();
        assert!(dir.path().join("nested").is_dir());
        // A bare file name has no parent to create.
        ensure_parent_dir(std::path::Path::new("config.toml")).unwrap();
    }
}
