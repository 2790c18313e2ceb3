pub mod codes;
mod event;
mod mapping;
mod source;

pub use event::{
    decode, encode, KeyState, RawEvent, RecordLayout, EV_ABS, EV_KEY, EV_SYN,
    INPUT_EVENT_SIZE_32, INPUT_EVENT_SIZE_64,
};
pub use mapping::ButtonMapping;
pub use source::{
    EventSource, HighLevelApiSource, KeySender, RawByteStreamSource, SourceEvent, SourceKind,
};
