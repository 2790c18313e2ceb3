use clap::{Parser, Subcommand};
use std::path::PathBuf;

use joycon_raw::{DeviceId, RecordLayout, SourceKind};

#[derive(Parser)]
#[command(name = "joycon-raw")]
#[command(about = "Track Joy-Con buttons straight from the kernel's evdev stream")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Event device to read (skips discovery)
    #[arg(long, env = "JOYCON_DEVICE")]
    pub device: Option<PathBuf>,

    /// Device identifier reported with every transition
    #[arg(long)]
    pub device_id: Option<DeviceId>,

    /// USB vendor id to match during discovery, in hex
    #[arg(long, value_parser = parse_hex_u16)]
    pub vendor: Option<u16>,

    /// USB product id to match during discovery, in hex
    #[arg(long, value_parser = parse_hex_u16)]
    pub product: Option<u16>,

    /// Take the first readable event device instead of matching vendor/product
    #[arg(long)]
    pub any_device: bool,

    /// input_event layout (compat32 = 16 bytes, native64 = 24 bytes)
    #[arg(long, value_parser = clap::value_parser!(RecordLayout))]
    pub layout: Option<RecordLayout>,

    /// Where key events come from (raw = evdev node, high-level = key codes on stdin)
    #[arg(long, value_parser = clap::value_parser!(SourceKind))]
    pub source: Option<SourceKind>,

    /// Path to config file
    #[arg(long, env = "JOYCON_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Dump raw input events for debugging
    Dump {
        /// Event device to dump (defaults to the discovered controller)
        device: Option<PathBuf>,
    },
    /// List event devices with their vendor/product ids
    List,
}

/// Parse `057e`, `0x057e` or `0X057E`.
pub fn parse_hex_u16(s: &str) -> Result<u16, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid hex id '{}': {}", s, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_u16() {
        assert_eq!(parse_hex_u16("057e"), Ok(0x057e));
        assert_eq!(parse_hex_u16("0x2006"), Ok(0x2006));
        assert!(parse_hex_u16("zz").is_err());
        assert!(parse_hex_u16("12345").is_err());
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "joycon-raw",
            "--vendor",
            "057e",
            "--product",
            "0x2007",
            "--layout",
            "compat32",
            "--device-id",
            "3",
            "--source",
            "high-level",
        ])
        .unwrap();
        assert_eq!(cli.vendor, Some(0x057e));
        assert_eq!(cli.product, Some(0x2007));
        assert_eq!(cli.layout, Some(RecordLayout::Compat32));
        assert_eq!(cli.device_id, Some(3));
        assert_eq!(cli.source, Some(SourceKind::HighLevelApi));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_rejects_unknown_source() {
        assert!(Cli::try_parse_from(["joycon-raw", "--source", "hidraw"]).is_err());
    }

    #[test]
    fn test_cli_dump_subcommand() {
        let cli = Cli::try_parse_from(["joycon-raw", "dump", "/dev/input/event4"]).unwrap();
        match cli.command {
            Some(Command::Dump { device }) => {
                assert_eq!(device, Some(PathBuf::from("/dev/input/event4")))
            }
            _ => panic!("expected dump"),
        }
    }
}
