use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;

#[derive(Debug)]
pub struct Settings {
    pub server_bind: String,
    pub log_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3000".into(),
            log_file: "./data/logs.json".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.server_bind = v.clone();
            }
            if let Some(v) = file_cfg.get("log_file") {
                settings.log_file = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Ok(v) = std::env::var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Ok(v) = std::env::var("LOG_FILE") {
        settings.log_file = v;
    }
    if let Ok(v) = std::env::var("APP__LOG_FILE") {
        settings.log_file = v;
    }

    settings
}

/// Normalizes the configured store location and creates its parent directory
/// so the first append cannot fail on a missing path.
pub fn prepare_log_path(raw_log_file: &str) -> anyhow::Result<PathBuf> {
    let path = normalize_log_file(raw_log_file);
    ensure_parent_dir_exists(&path)?;
    Ok(path)
}

fn normalize_log_file(raw: &str) -> PathBuf {
    let raw = raw.trim();
    if raw.is_empty() {
        return PathBuf::from(Settings::default().log_file);
    }
    PathBuf::from(raw)
}

fn ensure_parent_dir_exists(path: &Path) -> anyhow::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create log directory '{}' for store '{}'",
            parent.display(),
            path.display()
        )
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_log_file_falls_back_to_default() {
        assert_eq!(
            normalize_log_file("   "),
            PathBuf::from(Settings::default().log_file)
        );
    }

    #[test]
    fn keeps_explicit_log_file() {
        assert_eq!(
            normalize_log_file("./runs/pilot.json"),
            PathBuf::from("./runs/pilot.json")
        );
    }

    #[test]
    fn creates_parent_dir_for_nested_log_file() {
        let temp_root = tempfile::tempdir().expect("temp root");
        let log_file = temp_root.path().join("data").join("logs.json");

        let prepared = prepare_log_path(log_file.to_string_lossy().as_ref()).expect("prepare");
        assert_eq!(prepared, log_file);
        assert!(temp_root.path().join("data").exists());
    }
}
