//! Fermi core library for offline USB capture analysis.
//!
//! This crate decodes usbmon text captures of a NextWindow Fermi touchscreen
//! into packet summaries: sources turn log lines into raw payloads, the
//! protocol layer (layout/reader/parser) validates the `5B 5D` header and
//! extracts sequence, type and touch fields, and the analysis layer combines
//! both into one record per recognized packet. Parsing is byte-oriented and
//! side-effect free; all I/O is isolated in `source` modules.
//!
//! Invariants:
//! - Every line is processed on its own; nothing is carried between packets.
//! - Noise (non-packet lines, short payloads, foreign headers) is skipped,
//!   never reported as an error.
//! - Touch samples come from a heuristic scan and may overlap.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use fermi_core::analyze_log_file;
//!
//! for analysis in analyze_log_file(Path::new("usb_capture.log"))? {
//!     print!("{}", analysis?.render_text());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;

use serde::Serialize;

mod analysis;
mod protocols;
mod render;
mod source;

pub use analysis::{
    AnalysisError, PacketAnalyses, analyze_log_file, analyze_packet, analyze_source,
};
pub use protocols::fermi::error::FermiError;
pub use protocols::fermi::{
    CoordCandidate, LengthClass, PacketKind, PacketSummary, TouchAnalysis, TouchSample,
    extract_touch, parse_packet, try_parse_packet,
};
pub use render::{hex_dump, write_hex_dump};
pub use source::{
    CaptureLine, PacketEvent, PacketSource, SourceError, UsbmonFileSource, UsbmonMeta,
    UsbmonSource, decode_capture_line, decode_line, read_binary,
};

/// Decoded view of one recognized packet and the line it came from.
///
/// # Examples
/// ```
/// use fermi_core::{PacketEvent, PacketKind, analyze_packet, decode_capture_line};
///
/// let capture = decode_capture_line("m1 m2 m3 m4 m5 m6 m7 = 5b5d0901").unwrap();
/// let analysis = analyze_packet(PacketEvent {
///     line: 1,
///     meta: capture.meta,
///     data: capture.data,
/// })
/// .unwrap();
/// assert_eq!(analysis.kind, PacketKind::Data);
/// assert_eq!(analysis.render_text(), "Seq   9 Type 0x01 Len    4: 5b 5d 09 01\n\n");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct PacketAnalysis {
    /// 1-based line number in the capture log.
    pub line: u64,
    /// usbmon metadata columns of the line.
    pub meta: UsbmonMeta,
    /// Header fields and hex preview.
    #[serde(flatten)]
    pub summary: PacketSummary,
    /// Packet family derived from the type byte.
    pub kind: PacketKind,
    /// Idle/touch classification for data-stream packets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_class: Option<LengthClass>,
    /// Touch fields for `0xD6`/`0xD7` packets of at least 20 bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub touch: Option<TouchAnalysis>,
}

impl PacketAnalysis {
    /// Text block for this packet, terminated by a blank line.
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PacketAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary)?;
        if let Some(touch) = &self.touch {
            write!(f, "{touch}")?;
        }
        writeln!(f)
    }
}
