//! Find the evdev node for a controller.
//!
//! Identity comes from sysfs (`/sys/class/input/eventN/device/id/{vendor,product}`), so
//! a keyboard or touchscreen that happens to sort first is not picked up by mistake.

use std::fmt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEV_INPUT: &str = "/dev/input";
pub const SYS_CLASS_INPUT: &str = "/sys/class/input";

pub const NINTENDO_VENDOR: u16 = 0x057e;
pub const JOYCON_L_PRODUCT: u16 = 0x2006;
pub const JOYCON_R_PRODUCT: u16 = 0x2007;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDeviceInfo {
    pub path: PathBuf,
    /// N in `eventN`.
    pub index: u32,
    pub name: Option<String>,
    pub vendor: Option<u16>,
    pub product: Option<u16>,
    pub readable: bool,
}

/// Which device identity to accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceFilter {
    pub vendor: Option<u16>,
    pub product: Option<u16>,
}

impl DeviceFilter {
    pub fn new(vendor: u16, product: u16) -> Self {
        Self {
            vendor: Some(vendor),
            product: Some(product),
        }
    }

    /// First readable device wins, whatever it is.
    pub fn any() -> Self {
        Self {
            vendor: None,
            product: None,
        }
    }

    pub fn is_any(&self) -> bool {
        self.vendor.is_none() && self.product.is_none()
    }

    pub fn matches(&self, info: &InputDeviceInfo) -> bool {
        let vendor_ok = self.vendor.is_none_or(|v| info.vendor == Some(v));
        let product_ok = self.product.is_none_or(|p| info.product == Some(p));
        vendor_ok && product_ok
    }
}

impl Default for DeviceFilter {
    fn default() -> Self {
        Self::new(NINTENDO_VENDOR, JOYCON_L_PRODUCT)
    }
}

impl fmt::Display for DeviceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.vendor, self.product) {
            (None, None) => write!(f, "any device"),
            (Some(v), Some(p)) => write!(f, "{:04x}:{:04x}", v, p),
            (Some(v), None) => write!(f, "{:04x}:*", v),
            (None, Some(p)) => write!(f, "*:{:04x}", p),
        }
    }
}

/// Directory roots to scan; swapped out in tests.
#[derive(Debug, Clone)]
pub struct DeviceScanner {
    dev_root: PathBuf,
    sys_root: PathBuf,
}

impl Default for DeviceScanner {
    fn default() -> Self {
        Self::new(DEV_INPUT, SYS_CLASS_INPUT)
    }
}

impl DeviceScanner {
    pub fn new(dev_root: impl Into<PathBuf>, sys_root: impl Into<PathBuf>) -> Self {
        Self {
            dev_root: dev_root.into(),
            sys_root: sys_root.into(),
        }
    }

    /// All `eventN` nodes, sorted by N.
    pub fn list(&self) -> Result<Vec<InputDeviceInfo>> {
        let entries = fs::read_dir(&self.dev_root).map_err(|source| Error::SourceUnavailable {
            path: self.dev_root.clone(),
            source,
        })?;

        let mut devices = Vec::new();
        for entry in entries {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(index) = file_name
                .to_str()
                .and_then(|n| n.strip_prefix("event"))
                .and_then(|n| n.parse::<u32>().ok())
            else {
                continue;
            };

            let node = format!("event{}", index);
            let sys_device = self.sys_root.join(&node).join("device");
            let path = entry.path();
            devices.push(InputDeviceInfo {
                readable: File::open(&path).is_ok(),
                path,
                index,
                name: read_trimmed(&sys_device.join("name")),
                vendor: read_hex_u16(&sys_device.join("id").join("vendor")),
                product: read_hex_u16(&sys_device.join("id").join("product")),
            });
        }

        devices.sort_by_key(|d| d.index);
        Ok(devices)
    }

    /// First readable device that passes `filter`.
    pub fn find(&self, filter: DeviceFilter) -> Result<InputDeviceInfo> {
        let devices = self.list()?;
        log::debug!("Found {} event device(s) in {}", devices.len(), self.dev_root.display());

        if filter.is_any() {
            log::warn!("No device identity filter set, taking the first readable node");
        }

        devices
            .into_iter()
            .filter(|d| d.readable)
            .find(|d| filter.matches(d))
            .inspect(|d| {
                log::info!(
                    "Selected {} ({})",
                    d.path.display(),
                    d.name.as_deref().unwrap_or("unnamed")
                )
            })
            .ok_or_else(|| Error::NoMatchingDevice(filter.to_string()))
    }
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}

fn read_hex_u16(path: &Path) -> Option<u16> {
    let text = read_trimmed(path)?;
    u16::from_str_radix(text.trim_start_matches("0x"), 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT: AtomicUsize = AtomicUsize::new(0);

    struct Fixture {
        root: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let root = std::env::temp_dir().join(format!(
                "joycon-raw-discovery-{}-{}",
                std::process::id(),
                NEXT.fetch_add(1, Ordering::Relaxed)
            ));
            fs::create_dir_all(root.join("dev")).unwrap();
            fs::create_dir_all(root.join("sys")).unwrap();
            Self { root }
        }

        fn add(&self, index: u32, name: &str, vendor: &str, product: &str) {
            fs::write(self.root.join("dev").join(format!("event{}", index)), b"").unwrap();
            let id = self.root.join("sys").join(format!("event{}", index)).join("device").join("id");
            fs::create_dir_all(&id).unwrap();
            fs::write(id.parent().unwrap().join("name"), format!("{}\n", name)).unwrap();
            fs::write(id.join("vendor"), format!("{}\n", vendor)).unwrap();
            fs::write(id.join("product"), format!("{}\n", product)).unwrap();
        }

        fn scanner(&self) -> DeviceScanner {
            DeviceScanner::new(self.root.join("dev"), self.root.join("sys"))
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.root);
        }
    }

    #[test]
    fn test_list_sorts_numerically_and_reads_identity() {
        let fx = Fixture::new();
        fx.add(10, "Joy-Con (L)", "057e", "2006");
        fx.add(2, "AT Translated Set 2 keyboard", "0001", "0001");
        fs::write(fx.root.join("dev").join("mice"), b"").unwrap();

        let devices = fx.scanner().list().unwrap();
        assert_eq!(devices.iter().map(|d| d.index).collect::<Vec<_>>(), vec![2, 10]);
        assert_eq!(devices[1].name.as_deref(), Some("Joy-Con (L)"));
        assert_eq!(devices[1].vendor, Some(NINTENDO_VENDOR));
        assert_eq!(devices[1].product, Some(JOYCON_L_PRODUCT));
        assert!(devices[1].readable);
    }

    #[test]
    fn test_find_filters_by_identity() {
        let fx = Fixture::new();
        fx.add(0, "Power Button", "0000", "0001");
        fx.add(1, "Joy-Con (R)", "057e", "2007");
        fx.add(3, "Joy-Con (L)", "057e", "2006");

        let found = fx.scanner().find(DeviceFilter::default()).unwrap();
        assert_eq!(found.index, 3);

        let right = fx.scanner().find(DeviceFilter::new(NINTENDO_VENDOR, JOYCON_R_PRODUCT)).unwrap();
        assert_eq!(right.index, 1);
    }

    #[test]
    fn test_any_filter_takes_first_readable() {
        let fx = Fixture::new();
        fx.add(4, "Joy-Con (L)", "057e", "2006");
        fx.add(1, "Power Button", "0000", "0001");

        assert_eq!(fx.scanner().find(DeviceFilter::any()).unwrap().index, 1);
    }

    #[test]
    fn test_no_match() {
        let fx = Fixture::new();
        fx.add(0, "Power Button", "0000", "0001");

        let err = fx.scanner().find(DeviceFilter::default()).unwrap_err();
        assert!(matches!(err, Error::NoMatchingDevice(ref f) if f == "057e:2006"));
    }

    #[test]
    fn test_missing_dev_root_is_source_unavailable() {
        let scanner = DeviceScanner::new("/nonexistent/dev/input", "/nonexistent/sys");
        assert!(matches!(scanner.list(), Err(Error::SourceUnavailable { .. })));
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(DeviceFilter::default().to_string(), "057e:2006");
        assert_eq!(DeviceFilter::any().to_string(), "any device");
        let vendor_only = DeviceFilter { vendor: Some(NINTENDO_VENDOR), product: None };
        assert_eq!(vendor_only.to_string(), "057e:*");
    }
}
