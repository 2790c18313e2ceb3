//! Raw button codes for both decoding strategies.

// linux/input-event-codes.h
pub const BTN_Z: u16 = 0x135;
pub const BTN_TL: u16 = 0x136;
pub const BTN_TR: u16 = 0x137;
pub const BTN_TL2: u16 = 0x138;
pub const BTN_TR2: u16 = 0x139;
pub const BTN_SELECT: u16 = 0x13a;
pub const BTN_THUMBL: u16 = 0x13d;
pub const BTN_DPAD_UP: u16 = 0x220;
pub const BTN_DPAD_DOWN: u16 = 0x221;
pub const BTN_DPAD_LEFT: u16 = 0x222;
pub const BTN_DPAD_RIGHT: u16 = 0x223;

// Host key-event API codes (android.view.KeyEvent)
pub const KEYCODE_DPAD_UP: u16 = 19;
pub const KEYCODE_DPAD_DOWN: u16 = 20;
pub const KEYCODE_DPAD_LEFT: u16 = 21;
pub const KEYCODE_DPAD_RIGHT: u16 = 22;
pub const KEYCODE_BUTTON_Z: u16 = 101;
pub const KEYCODE_BUTTON_L1: u16 = 102;
pub const KEYCODE_BUTTON_R1: u16 = 103;
pub const KEYCODE_BUTTON_L2: u16 = 104;
pub const KEYCODE_BUTTON_R2: u16 = 105;
pub const KEYCODE_BUTTON_THUMBL: u16 = 106;
pub const KEYCODE_BUTTON_SELECT: u16 = 109;

/// Short name for a raw evdev key code, for diagnostics.
pub fn evdev_key_name(code: u16) -> Option<&'static str> {
    let name = match code {
        BTN_Z => "BTN_Z",
        BTN_TL => "BTN_TL",
        BTN_TR => "BTN_TR",
        BTN_TL2 => "BTN_TL2",
        BTN_TR2 => "BTN_TR2",
        BTN_SELECT => "BTN_SELECT",
        BTN_THUMBL => "BTN_THUMBL",
        BTN_DPAD_UP => "BTN_DPAD_UP",
        BTN_DPAD_DOWN => "BTN_DPAD_DOWN",
        BTN_DPAD_LEFT => "BTN_DPAD_LEFT",
        BTN_DPAD_RIGHT => "BTN_DPAD_RIGHT",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use evdevil::event::Key;

    #[test]
    fn test_codes_match_kernel_headers() {
        assert_eq!(Key::BTN_TL.raw(), BTN_TL);
        assert_eq!(Key::BTN_TL2.raw(), BTN_TL2);
        assert_eq!(Key::BTN_TR.raw(), BTN_TR);
        assert_eq!(Key::BTN_TR2.raw(), BTN_TR2);
        assert_eq!(Key::BTN_Z.raw(), BTN_Z);
        assert_eq!(Key::BTN_SELECT.raw(), BTN_SELECT);
        assert_eq!(Key::BTN_THUMBL.raw(), BTN_THUMBL);
        assert_eq!(Key::BTN_DPAD_UP.raw(), BTN_DPAD_UP);
        assert_eq!(Key::BTN_DPAD_RIGHT.raw(), BTN_DPAD_RIGHT);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(evdev_key_name(BTN_DPAD_LEFT), Some("BTN_DPAD_LEFT"));
        assert_eq!(evdev_key_name(BTN_TR2), Some("BTN_TR2"));
        assert_eq!(evdev_key_name(0x130), None);
    }
}
