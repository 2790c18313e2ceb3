mod cli;
mod file;

pub use cli::{Cli, Command};

use std::path::PathBuf;

use joycon_raw::discovery::{JOYCON_L_PRODUCT, NINTENDO_VENDOR};
use joycon_raw::{Button, ButtonMapping, DeviceFilter, DeviceId, RecordLayout, SourceKind};

/// Merged configuration from CLI args and TOML file.
#[derive(Debug, Clone)]
pub struct Config {
    pub device: Option<PathBuf>,
    pub device_id: DeviceId,
    pub vendor: Option<u16>,
    pub product: Option<u16>,
    pub any_device: bool,
    pub layout: RecordLayout,
    pub source: SourceKind,
    /// Raw codes in the code space of `source`.
    pub mapping_overrides: Vec<(u16, Button)>,
}

impl Config {
    /// Load configuration by merging TOML file with CLI overrides.
    pub fn load(cli: &Cli) -> Self {
        let file_config = cli
            .config
            .as_ref()
            .and_then(|p| file::load_from_path(p))
            .or_else(file::load_from_default_paths)
            .unwrap_or_default();

        let mapping_overrides = file_config
            .mapping
            .iter()
            .filter_map(|(raw, &code)| match parse_code(raw) {
                Some(raw) => Some((raw, Button::from_code(code))),
                None => {
                    log::warn!("Ignoring mapping entry with invalid raw code '{}'", raw);
                    None
                }
            })
            .collect();

        Self {
            device: cli.device.clone().or(file_config.device),
            device_id: cli.device_id.or(file_config.device_id).unwrap_or(0),
            vendor: cli.vendor.or(file_config.vendor),
            product: cli.product.or(file_config.product),
            any_device: cli.any_device || file_config.any_device,
            layout: cli
                .layout
                .or(file_config.layout)
                .unwrap_or_else(RecordLayout::native),
            source: cli.source.or(file_config.source).unwrap_or_default(),
            mapping_overrides,
        }
    }

    pub fn filter(&self) -> DeviceFilter {
        if self.any_device {
            return DeviceFilter::any();
        }
        DeviceFilter::new(
            self.vendor.unwrap_or(NINTENDO_VENDOR),
            self.product.unwrap_or(JOYCON_L_PRODUCT),
        )
    }

    pub fn mapping(&self) -> ButtonMapping {
        self.mapping_for(self.source)
    }

    /// Built-in table for `source`. Overrides only apply in the configured code space.
    pub fn mapping_for(&self, source: SourceKind) -> ButtonMapping {
        let base = ButtonMapping::for_source(source);
        if source != self.source {
            return base;
        }
        base.with_overrides(self.mapping_overrides.iter().copied())
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.any_device && (self.vendor.is_some() || self.product.is_some()) {
            return Err("Cannot use --any-device together with --vendor/--product");
        }
        Ok(())
    }
}

/// Raw codes in the config file are decimal or `0x` hex.
fn parse_code(s: &str) -> Option<u16> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}
