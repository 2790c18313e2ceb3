use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use joycon_raw::{DeviceId, RecordLayout, SourceKind};

const CONFIG_FILE_NAME: &str = "joycon-raw.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub device: Option<PathBuf>,
    pub device_id: Option<DeviceId>,
    pub vendor: Option<u16>,
    pub product: Option<u16>,
    #[serde(default)]
    pub any_device: bool,
    pub layout: Option<RecordLayout>,
    pub source: Option<SourceKind>,
    /// Extra raw codes for the configured source: `"0x13b" = 6`.
    #[serde(default)]
    pub mapping: BTreeMap<String, u16>,
}

pub fn parse(content: &str) -> Result<FileConfig, toml::de::Error> {
    toml::from_str(content)
}

pub fn load_from_path(path: &Path) -> Option<FileConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match parse(&content) {
        Ok(config) => {
            log::debug!("Loaded config from {}", path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("Failed to parse {}: {}", path.display(), e);
            None
        }
    }
}

pub fn load_from_default_paths() -> Option<FileConfig> {
    for path in default_config_paths() {
        if path.exists() {
            if let Some(config) = load_from_path(&path) {
                return Some(config);
            }
        }
    }
    None
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];

    if let Ok(home) = std::env::var("HOME") {
        paths.push(PathBuf::from(home).join(".config").join(CONFIG_FILE_NAME));
    }

    paths
}
