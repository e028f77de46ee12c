use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::source::{PacketEvent, PacketSource, SourceError};

use super::layout;
use super::reader::{decode_hex_word, split_capture_line};

/// Metadata columns preceding the payload of a usbmon text line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsbmonMeta {
    pub urb_tag: String,
    /// Capture timestamp in microseconds, when the column is numeric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_us: Option<u64>,
    pub event: String,
    /// Transfer type, direction, bus, device and endpoint (e.g. `Bi:4:003:1`).
    pub address: String,
    /// Remaining columns (status, length, data tag, ...), verbatim.
    pub extra: Vec<String>,
}

impl UsbmonMeta {
    fn from_tokens(tokens: &[&str]) -> Self {
        let token = |index: usize| tokens.get(index).copied().unwrap_or("").to_string();
        Self {
            urb_tag: token(layout::URB_TAG_INDEX),
            timestamp_us: tokens
                .get(layout::TIMESTAMP_INDEX)
                .and_then(|ts| ts.parse().ok()),
            event: token(layout::EVENT_INDEX),
            address: token(layout::ADDRESS_INDEX),
            extra: tokens
                .iter()
                .skip(layout::FIXED_META_TOKENS)
                .map(|token| token.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureLine {
    pub meta: UsbmonMeta,
    pub data: Vec<u8>,
}

/// Decode one capture log line into its metadata and payload bytes.
///
/// Returns `None` for anything that is not a packet line: no single
/// `" = "` delimiter, fewer than 7 metadata columns, invalid hex, or a
/// payload shorter than 4 bytes.
///
/// A word ending in an unpaired digit loses that digit only; the following
/// words are still decoded. A non-hex pair anywhere drops the whole line as
/// noise rather than aborting the run.
pub fn decode_capture_line(line: &str) -> Option<CaptureLine> {
    let (meta, payload) = split_capture_line(line)?;

    let tokens: Vec<&str> = meta.split_whitespace().collect();
    if tokens.len() < layout::MIN_META_TOKENS {
        return None;
    }

    let mut data = Vec::new();
    for word in payload.split_whitespace() {
        if decode_hex_word(word, &mut data).is_none() {
            log::debug!("skipping line with invalid hex word '{word}'");
            return None;
        }
    }
    if data.len() < layout::MIN_PACKET_LEN {
        return None;
    }

    Some(CaptureLine {
        meta: UsbmonMeta::from_tokens(&tokens),
        data,
    })
}

/// Decode one capture log line into raw packet bytes.
pub fn decode_line(line: &str) -> Option<Vec<u8>> {
    decode_capture_line(line).map(|capture| capture.data)
}

/// Line-oriented packet source over a usbmon text capture.
pub struct UsbmonSource<R> {
    reader: R,
    line_no: u64,
    buf: Vec<u8>,
}

pub type UsbmonFileSource = UsbmonSource<BufReader<File>>;

impl UsbmonFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        log::debug!("opened capture log {}", path.display());
        Ok(UsbmonSource::new(BufReader::new(file)))
    }
}

impl<R: BufRead> UsbmonSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> PacketSource for UsbmonSource<R> {
    fn next_packet(&mut self) -> Result<Option<PacketEvent>, SourceError> {
        loop {
            self.buf.clear();
            if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let line = String::from_utf8_lossy(&self.buf);
            match decode_capture_line(&line) {
                Some(CaptureLine { meta, data }) => {
                    return Ok(Some(PacketEvent {
                        line: self.line_no,
                        meta,
                        data,
                    }));
                }
                None => log::trace!("line {}: not a packet line", self.line_no),
            }
        }
    }
}
