//! Raw Joy-Con button input.
//!
//! Decodes Linux `input_event` records (or host key events), maps them to a
//! vendor-neutral [`Button`] vocabulary, and keeps a de-duplicated pressed set per
//! device that can be polled from any thread while a reader thread writes to it.
//!
//! ```no_run
//! use std::sync::Arc;
//! use joycon_raw::{
//!     ButtonMapping, ButtonTracker, DeviceScanner, DeviceFilter, LogSink,
//!     RawByteStreamSource, Reader, RecordLayout,
//! };
//!
//! # fn main() -> joycon_raw::Result<()> {
//! let node = DeviceScanner::default().find(DeviceFilter::default())?;
//! let source = RawByteStreamSource::open(&node.path, 0, RecordLayout::native())?;
//! let tracker = Arc::new(ButtonTracker::new(ButtonMapping::joycon_left_evdev()));
//! let handle = Reader::new(source, tracker.clone(), LogSink).spawn("joycon")?;
//!
//! // Each frame:
//! let held = tracker.snapshot(0);
//! # let _ = held;
//! handle.stop();
//! # Ok(())
//! # }
//! ```

pub mod button;
pub mod discovery;
pub mod error;
pub mod input;
pub mod reader;
pub mod sink;
pub mod tracker;

pub use button::{Button, DeviceId};
pub use discovery::{DeviceFilter, DeviceScanner, InputDeviceInfo};
pub use error::{Error, Result};
pub use input::{
    ButtonMapping, EventSource, HighLevelApiSource, KeySender, RawByteStreamSource, RawEvent,
    RecordLayout, SourceEvent, SourceKind,
};
pub use reader::{ReadStats, Reader, ReaderHandle};
pub use sink::{ChannelSink, LogSink, TransitionSink};
pub use tracker::{ButtonTracker, ButtonTransition};
