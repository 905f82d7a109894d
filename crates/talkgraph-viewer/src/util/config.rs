use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use talkgraph_core::GraphView;

/// Persisted viewer preferences. Read once at mount, written whenever a
/// persisted field changes; a missing or unreadable file means defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub endpoint: String,
    pub graph: GraphView,
    pub panel_width: f32,
    pub show_links: bool,
    pub show_labels: bool,
    pub link_distance: f32,
    pub repulsion: f32,
    pub collision_enabled: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            endpoint: "ws://127.0.0.1:3001".to_string(),
            graph: GraphView::Conversation,
            panel_width: 260.0,
            show_links: true,
            show_labels: true,
            link_distance: 60.0,
            repulsion: 22_000.0,
            collision_enabled: true,
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "talkgraph")?;
    Some(proj.config_dir().join("viewer.toml"))
}

pub fn load_or_default() -> ViewerConfig {
    let Some(path) = config_file_path() else {
        return ViewerConfig::default();
    };
    load_or_default_from_path(&path)
}

fn load_or_default_from_path(path: &Path) -> ViewerConfig {
    let Ok(contents) = fs::read_to_string(path) else {
        return ViewerConfig::default();
    };
    toml::from_str(&contents).unwrap_or_else(|_| ViewerConfig::default())
}

pub fn save(cfg: &ViewerConfig) -> anyhow::Result<()> {
    let Some(path) = config_file_path() else {
        return Err(anyhow::anyhow!("no config directory available"));
    };
    save_to_path(cfg, &path)
}

fn save_to_path(cfg: &ViewerConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    let data = toml::to_string_pretty(cfg).context("failed to serialize viewer config")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write viewer config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn viewer_config_roundtrip_save_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("viewer.toml");
        let cfg = ViewerConfig {
            graph: GraphView::Entity,
            panel_width: 321.5,
            show_links: false,
            ..ViewerConfig::default()
        };

        save_to_path(&cfg, &path).expect("save config");
        let loaded = load_or_default_from_path(&path);

        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().expect("tempdir");
        let loaded = load_or_default_from_path(&dir.path().join("absent.toml"));
        assert_eq!(loaded, ViewerConfig::default());
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("viewer.toml");
        fs::write(&path, "panel_width = \"wide\"").expect("write");
        let loaded = load_or_default_from_path(&path);
        assert_eq!(loaded, ViewerConfig::default());
    }
}
