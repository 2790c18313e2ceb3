//! Host key events typed on stdin, for running the high-level table without a host.
//! One event per line: `down 102`, `up 0x66`. Blank lines and `#` comments are skipped.

use std::io::BufRead;

use joycon_raw::{DeviceId, KeySender};

/// Parse one line into `(code, value)`.
fn parse_line(line: &str) -> Option<(u16, i32)> {
    let mut parts = line.split_whitespace();
    let value = match parts.next()? {
        "down" => 1,
        "up" => 0,
        "repeat" => 2,
        _ => return None,
    };
    let code = parts.next()?;
    let code = match code.strip_prefix("0x") {
        Some(hex) => u16::from_str_radix(hex, 16).ok()?,
        None => code.parse().ok()?,
    };
    match parts.next() {
        Some(_) => None,
        None => Some((code, value)),
    }
}

/// Forward every line of `input` to `keys` until input ends or the source is gone.
pub fn feed<R: BufRead>(input: R, keys: &KeySender, device: DeviceId) -> std::io::Result<u64> {
    let mut sent = 0u64;
    for (n, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((code, value)) = parse_line(line) else {
            log::warn!("line {}: expected 'down <code>' or 'up <code>', got '{}'", n + 1, line);
            continue;
        };
        if !keys.send(device, code, value) {
            break;
        }
        sent += 1;
    }
    Ok(sent)
}
