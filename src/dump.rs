//! Dump raw input events for debugging.
//! Run: joycon-raw dump [/dev/input/eventN] to stream and print every record.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use joycon_raw::input::codes::evdev_key_name;
use joycon_raw::input::{decode, EV_ABS, EV_KEY, EV_SYN};
use joycon_raw::{ButtonMapping, Error, RecordLayout};

fn code_name(ty: u16, code: u16) -> String {
    match ty {
        EV_SYN => "SYN_REPORT".to_string(),
        EV_KEY => match evdev_key_name(code) {
            Some(name) => format!("KEY/{}({:#x})", name, code),
            None => format!("KEY/{:#x}", code),
        },
        EV_ABS => format!("ABS/{:#x}", code),
        _ => format!("type{} code{:#x}", ty, code),
    }
}

pub fn run_dump(
    path: &Path,
    layout: RecordLayout,
    mapping: &ButtonMapping,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut file = File::open(path).map_err(|source| Error::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    eprintln!("Dumping events from {} ({}, Ctrl+C to stop):\n", path.display(), layout);

    let mut buf = vec![0u8; layout.size()];
    let mut n = 0u64;
    loop {
        file.read_exact(&mut buf)?;
        let ev = decode(&buf, layout)?;
        n += 1;

        let mapped = if ev.is_actionable() {
            mapping
                .lookup(ev.code)
                .map(|b| format!("  -> {}", b))
                .unwrap_or_default()
        } else {
            String::new()
        };
        println!("{:6}  {}  value={}{}", n, code_name(ev.ty, ev.code), ev.value, mapped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_name() {
        assert_eq!(code_name(EV_SYN, 0), "SYN_REPORT");
        assert_eq!(code_name(EV_KEY, 0x136), "KEY/BTN_TL(0x136)");
        assert_eq!(code_name(EV_KEY, 0x130), "KEY/0x130");
        assert_eq!(code_name(EV_ABS, 0x10), "ABS/0x10");
        assert_eq!(code_name(4, 4), "type4 code0x4");
    }
}
