use std::fmt;

use serde::Serialize;

use super::error::FermiError;
use super::layout;
use super::reader::FermiReader;
use crate::protocols::common::reader::hex_join;

/// Decoded header fields of a recognized packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PacketSummary {
    pub header: [u8; 2],
    pub sequence: u8,
    #[serde(rename = "type")]
    pub packet_type: u8,
    pub length: usize,
    /// Up to the first 32 bytes as spaced lowercase hex.
    pub preview: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PacketKind {
    Data,
    Status,
    Touch,
    Unknown,
}

impl PacketKind {
    pub fn from_type(packet_type: u8) -> Self {
        match packet_type {
            layout::TYPE_DATA => PacketKind::Data,
            layout::TYPE_STATUS => PacketKind::Status,
            layout::TYPE_TOUCH_D6 | layout::TYPE_TOUCH_D7 => PacketKind::Touch,
            _ => PacketKind::Unknown,
        }
    }
}

/// Length bucket of a data-stream packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthClass {
    Idle,
    Touch,
    Unexpected,
}

impl LengthClass {
    pub fn from_len(length: usize) -> Self {
        if layout::IDLE_LEN_RANGE.contains(&length) {
            LengthClass::Idle
        } else if layout::TOUCH_LEN_RANGE.contains(&length) {
            LengthClass::Touch
        } else {
            LengthClass::Unexpected
        }
    }
}

impl PacketSummary {
    pub fn kind(&self) -> PacketKind {
        PacketKind::from_type(self.packet_type)
    }

    /// Only data-stream packets carry a meaningful length class.
    pub fn length_class(&self) -> Option<LengthClass> {
        match self.kind() {
            PacketKind::Data => Some(LengthClass::from_len(self.length)),
            _ => None,
        }
    }
}

impl fmt::Display for PacketSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Seq {:3} Type 0x{:02x} Len {:4}: {}",
            self.sequence, self.packet_type, self.length, self.preview
        )
    }
}

/// Decode the packet header.
///
/// Returns `Ok(None)` when the header magic does not match and
/// `Err(FermiError::TooShort)` when the payload cannot hold a header.
pub fn try_parse_packet(payload: &[u8]) -> Result<Option<PacketSummary>, FermiError> {
    let reader = FermiReader::new(payload);
    reader.require_len(layout::MIN_LEN)?;

    let header = reader.read_header()?;
    if header != layout::HEADER_MAGIC.as_slice() {
        return Ok(None);
    }

    let sequence = reader.read_u8(layout::SEQUENCE_OFFSET)?;
    let packet_type = reader.read_u8(layout::TYPE_OFFSET)?;
    let preview = hex_join(reader.read_clipped(0..layout::PREVIEW_LEN));

    Ok(Some(PacketSummary {
        header: layout::HEADER_MAGIC,
        sequence,
        packet_type,
        length: reader.packet_len(),
        preview,
    }))
}

/// Decode the packet header, treating short input like a header mismatch.
pub fn parse_packet(payload: &[u8]) -> Option<PacketSummary> {
    try_parse_packet(payload).ok().flatten()
}
