//! Event sources: where key events come from.
//!
//! Two strategies feed the same tracker:
//! - [`RawByteStreamSource`] reads `input_event` records straight from an evdev node
//!   (or any other byte stream in that layout).
//! - [`HighLevelApiSource`] is fed key-down/key-up calls by the host's own key API.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::mpsc::{self, Receiver, Sender};

use serde::Deserialize;

use crate::button::DeviceId;
use crate::error::{Error, Result};
use crate::input::event::{decode, RecordLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SourceKind {
    #[serde(rename = "high-level", alias = "keycodes")]
    HighLevelApi,
    #[default]
    #[serde(rename = "raw", alias = "evdev")]
    RawByteStream,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::HighLevelApi => write!(f, "high-level"),
            SourceKind::RawByteStream => write!(f, "raw"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high-level" | "keycodes" => Ok(SourceKind::HighLevelApi),
            "raw" | "evdev" => Ok(SourceKind::RawByteStream),
            _ => Err(format!("Invalid source '{}'. Valid values: raw, high-level", s)),
        }
    }
}

/// A key event ready for the tracker: raw code in the source's own code space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceEvent {
    pub device: DeviceId,
    pub code: u16,
    pub value: i32,
}

pub trait EventSource: Send {
    fn kind(&self) -> SourceKind;

    /// Block until the next key event. `Ok(None)` means the stream has ended.
    fn next_event(&mut self) -> Result<Option<SourceEvent>>;
}

pub struct RawByteStreamSource<R> {
    reader: R,
    path: Option<PathBuf>,
    device: DeviceId,
    layout: RecordLayout,
    buf: Vec<u8>,
    records: u64,
}

impl RawByteStreamSource<File> {
    /// Open an evdev node for reading.
    pub fn open(path: &Path, device: DeviceId, layout: RecordLayout) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Reading {} as device {} ({} byte records)", path.display(), device, layout.size());
        Ok(Self::new(file, device, layout).with_path(path))
    }
}

impl<R: Read + Send> RawByteStreamSource<R> {
    pub fn new(reader: R, device: DeviceId, layout: RecordLayout) -> Self {
        Self {
            reader,
            path: None,
            device,
            layout,
            buf: vec![0u8; layout.size()],
            records: 0,
        }
    }

    /// Name the node behind `reader`, so read failures report it as unavailable.
    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }

    pub fn records_read(&self) -> u64 {
        self.records
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read + Send> EventSource for RawByteStreamSource<R> {
    fn kind(&self) -> SourceKind {
        SourceKind::RawByteStream
    }

    fn next_event(&mut self) -> Result<Option<SourceEvent>> {
        loop {
            // read_exact accumulates short reads until a full record is in.
            match self.reader.read_exact(&mut self.buf) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
                // ENODEV after an unplug lands here.
                Err(source) => {
                    return Err(match self.path {
                        Some(ref path) => Error::SourceUnavailable {
                            path: path.clone(),
                            source,
                        },
                        None => Error::Io(source),
                    })
                }
            }
            self.records += 1;

            // The buffer is always exactly one record wide, so framing cannot fail here.
            let ev = decode(&self.buf, self.layout)?;

            log::trace!("record type={:#x} code={:#x} value={}", ev.ty, ev.code, ev.value);

            if !ev.is_actionable() {
                continue;
            }

            return Ok(Some(SourceEvent {
                device: self.device,
                code: ev.code,
                value: ev.value,
            }));
        }
    }
}

/// Host-side handle for pushing key events into a [`HighLevelApiSource`].
#[derive(Clone)]
pub struct KeySender {
    tx: Sender<SourceEvent>,
}

impl KeySender {
    /// Returns `false` once the source has been dropped.
    pub fn key_down(&self, device: DeviceId, code: u16) -> bool {
        self.send(device, code, 1)
    }

    pub fn key_up(&self, device: DeviceId, code: u16) -> bool {
        self.send(device, code, 0)
    }

    pub fn send(&self, device: DeviceId, code: u16, value: i32) -> bool {
        self.tx.send(SourceEvent { device, code, value }).is_ok()
    }
}

pub struct HighLevelApiSource {
    rx: Receiver<SourceEvent>,
}

impl HighLevelApiSource {
    pub fn channel() -> (KeySender, Self) {
        let (tx, rx) = mpsc::channel();
        (KeySender { tx }, Self { rx })
    }
}

impl EventSource for HighLevelApiSource {
    fn kind(&self) -> SourceKind {
        SourceKind::HighLevelApi
    }

    fn next_event(&mut self) -> Result<Option<SourceEvent>> {
        // Disconnected means every KeySender is gone.
        Ok(self.rx.recv().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::codes::{BTN_DPAD_UP, BTN_TL, KEYCODE_BUTTON_L1};
    use crate::input::event::{encode, RawEvent, EV_ABS, EV_SYN};
    use std::io::Cursor;

    /// Hands out at most `chunk` bytes per read call.
    struct Trickle {
        data: Cursor<Vec<u8>>,
        chunk: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = buf.len().min(self.chunk);
            self.data.read(&mut buf[..n])
        }
    }

    fn stream(events: &[RawEvent], layout: RecordLayout) -> Vec<u8> {
        events.iter().flat_map(|ev| encode(*ev, layout)).collect()
    }

    #[test]
    fn test_raw_source_skips_non_key_records() {
        let layout = RecordLayout::Native64;
        let bytes = stream(
            &[
                RawEvent::new(EV_ABS, 0, 300),
                RawEvent::key(BTN_TL, 1),
                RawEvent::new(EV_SYN, 0, 0),
                RawEvent::key(BTN_DPAD_UP, 0),
            ],
            layout,
        );
        let mut src = RawByteStreamSource::new(Cursor::new(bytes), 7, layout);

        assert_eq!(
            src.next_event().unwrap(),
            Some(SourceEvent { device: 7, code: BTN_TL, value: 1 })
        );
        assert_eq!(
            src.next_event().unwrap(),
            Some(SourceEvent { device: 7, code: BTN_DPAD_UP, value: 0 })
        );
        assert_eq!(src.next_event().unwrap(), None);
        assert_eq!(src.records_read(), 4);
    }

    #[test]
    fn test_raw_source_accumulates_partial_reads() {
        let layout = RecordLayout::Compat32;
        let bytes = stream(&[RawEvent::key(BTN_TL, 1), RawEvent::key(BTN_TL, 0)], layout);
        let reader = Trickle { data: Cursor::new(bytes), chunk: 5 };
        let mut src = RawByteStreamSource::new(reader, 1, layout);

        assert_eq!(src.next_event().unwrap().map(|e| e.value), Some(1));
        assert_eq!(src.next_event().unwrap().map(|e| e.value), Some(0));
        assert_eq!(src.next_event().unwrap(), None);
    }

    #[test]
    fn test_raw_source_trailing_partial_record_ends_stream() {
        let layout = RecordLayout::Native64;
        let mut bytes = stream(&[RawEvent::key(BTN_TL, 1)], layout);
        bytes.extend_from_slice(&[0u8; 10]);
        let mut src = RawByteStreamSource::new(Cursor::new(bytes), 1, layout);

        assert!(src.next_event().unwrap().is_some());
        assert_eq!(src.next_event().unwrap(), None);
    }

    #[test]
    fn test_open_missing_node_is_source_unavailable() {
        let path = Path::new("/nonexistent/dev/input/event99");
        match RawByteStreamSource::open(path, 0, RecordLayout::Native64) {
            Err(Error::SourceUnavailable { path: p, .. }) => assert_eq!(p, path),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("opened a missing node"),
        }
    }

    /// Yields `good` bytes, then fails every read like an unplugged evdev node.
    struct Unplugged {
        good: Cursor<Vec<u8>>,
    }

    impl Read for Unplugged {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.good.read(buf)? {
                0 => Err(io::Error::from_raw_os_error(19)), // ENODEV
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_read_failure_after_open_is_source_unavailable() {
        let layout = RecordLayout::Native64;
        let good = Cursor::new(stream(&[RawEvent::key(BTN_TL, 1)], layout));
        let node = Path::new("/dev/input/event5");
        let mut src = RawByteStreamSource::new(Unplugged { good }, 5, layout).with_path(node);

        assert!(src.next_event().unwrap().is_some());
        match src.next_event() {
            Err(Error::SourceUnavailable { path, source }) => {
                assert_eq!(path, node);
                assert_eq!(source.raw_os_error(), Some(19));
            }
            other => panic!("expected SourceUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_read_failure_without_path_is_io() {
        let layout = RecordLayout::Compat32;
        let good = Cursor::new(Vec::new());
        let mut src = RawByteStreamSource::new(Unplugged { good }, 0, layout);
        assert!(matches!(src.next_event(), Err(Error::Io(_))));
    }

    #[test]
    fn test_source_kind_names() {
        assert_eq!("raw".parse::<SourceKind>(), Ok(SourceKind::RawByteStream));
        assert_eq!("High-Level".parse::<SourceKind>(), Ok(SourceKind::HighLevelApi));
        assert_eq!("keycodes".parse::<SourceKind>(), Ok(SourceKind::HighLevelApi));
        assert!("hidraw".parse::<SourceKind>().is_err());
        assert_eq!(SourceKind::default(), SourceKind::RawByteStream);
        assert_eq!(SourceKind::HighLevelApi.to_string(), "high-level");
    }

    #[test]
    fn test_high_level_source_ends_when_senders_drop() {
        let (tx, mut src) = HighLevelApiSource::channel();
        assert!(tx.key_down(3, KEYCODE_BUTTON_L1));
        assert!(tx.key_up(3, KEYCODE_BUTTON_L1));
        drop(tx);

        assert_eq!(src.kind(), SourceKind::HighLevelApi);
        assert_eq!(
            src.next_event().unwrap(),
            Some(SourceEvent { device: 3, code: KEYCODE_BUTTON_L1, value: 1 })
        );
        assert_eq!(src.next_event().unwrap().map(|e| e.value), Some(0));
        assert_eq!(src.next_event().unwrap(), None);
    }

    #[test]
    fn test_key_sender_reports_dropped_source() {
        let (tx, src) = HighLevelApiSource::channel();
        drop(src);
        assert!(!tx.key_down(0, KEYCODE_BUTTON_L1));
    }
}
