mod binary;
mod usbmon;

pub use binary::read_binary;
pub use usbmon::{
    CaptureLine, UsbmonFileSource, UsbmonMeta, UsbmonSource, decode_capture_line, decode_line,
};

use thiserror::Error;

/// One decoded payload together with the log line it came from.
#[derive(Debug, Clone)]
pub struct PacketEvent {
    /// 1-based line number in the capture log.
    pub line: u64,
    pub meta: UsbmonMeta,
    pub data: Vec<u8>,
}

pub trait PacketSource {
    fn next_packet(&mut self) -> Result<Option<PacketEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
