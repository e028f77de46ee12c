//! Touch field extraction for `0xD6`/`0xD7` packets.
//!
//! The scan is a bit-pattern heuristic, not a validated field decoder: every
//! position from offset 18 up to `len - 3` whose high bit is set is reported
//! as a possible touch indicator, and scanning does not skip the bytes a match
//! consumed. Overlapping matches are therefore reported more than once (an
//! indicator whose delta bytes also have the high bit set yields a second
//! sample one or two bytes later).

use std::fmt;

use serde::Serialize;

use super::error::FermiError;
use super::layout;
use super::parser::{PacketKind, PacketSummary};
use super::reader::FermiReader;
use crate::protocols::common::reader::hex_join;

/// A possible touch contact found by the indicator scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TouchSample {
    pub offset: usize,
    pub indicator: u8,
    pub slot: u8,
    pub dx: i8,
    pub dy: i8,
}

/// Big-endian 16-bit word at a fixed offset that may hold a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoordCandidate {
    pub offset: usize,
    pub value: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TouchAnalysis {
    /// Bytes 4..8, clipped to the packet.
    pub head_window: Vec<u8>,
    /// Bytes 18..30, clipped to the packet.
    pub tail_window: Vec<u8>,
    pub samples: Vec<TouchSample>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub coord_candidates: Vec<CoordCandidate>,
}

/// Run touch extraction when the packet is a touch packet of at least 20 bytes.
pub fn extract_touch(summary: &PacketSummary, payload: &[u8]) -> Option<TouchAnalysis> {
    if summary.kind() != PacketKind::Touch || payload.len() < layout::TOUCH_MIN_LEN {
        return None;
    }

    let reader = FermiReader::new(payload);
    let samples = match scan_samples(&reader) {
        Ok(samples) => samples,
        Err(err) => {
            log::warn!("touch scan stopped early: {err}");
            return None;
        }
    };

    Some(TouchAnalysis {
        head_window: reader.read_clipped(layout::TOUCH_HEAD_WINDOW).to_vec(),
        tail_window: reader.read_clipped(layout::TOUCH_TAIL_WINDOW).to_vec(),
        samples,
        coord_candidates: coord_candidates(&reader),
    })
}

fn scan_samples(reader: &FermiReader<'_>) -> Result<Vec<TouchSample>, FermiError> {
    let scan_end = reader.packet_len().saturating_sub(2);
    let mut samples = Vec::new();
    for offset in layout::TOUCH_SCAN_START..scan_end {
        let indicator = reader.read_u8(offset)?;
        if indicator & layout::TOUCH_INDICATOR_BIT == 0 {
            continue;
        }
        samples.push(TouchSample {
            offset,
            indicator,
            slot: indicator & layout::TOUCH_SLOT_MASK,
            dx: reader.read_i8(offset + 1)?,
            dy: reader.read_i8_or_zero(offset + 2),
        });
    }
    Ok(samples)
}

fn coord_candidates(reader: &FermiReader<'_>) -> Vec<CoordCandidate> {
    if reader.packet_len() < layout::COORD_CANDIDATE_MIN_LEN {
        return Vec::new();
    }
    layout::COORD_CANDIDATE_OFFSETS
        .iter()
        .filter_map(|&offset| {
            reader
                .read_u16_be(offset)
                .ok()
                .map(|value| CoordCandidate { offset, value })
        })
        .collect()
}

impl fmt::Display for TouchSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Offset {:2}: touch_byte=0x{:02x} slot={} dx={:+4} dy={:+4}",
            self.offset, self.indicator, self.slot, self.dx, self.dy
        )
    }
}

impl fmt::Display for TouchAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Touch packet analysis:")?;
        writeln!(f, "    Bytes 4-7:  {}", hex_join(&self.head_window))?;
        writeln!(f, "    Bytes 18+:  {}", hex_join(&self.tail_window))?;
        for sample in &self.samples {
            writeln!(f, "    {sample}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{TouchSample, extract_touch};
    use crate::protocols::fermi::parser::parse_packet;

    fn packet(packet_type: u8, len: usize) -> Vec<u8> {
        let mut payload = vec![0u8; len];
        payload[..4].copy_from_slice(&[0x5b, 0x5d, 0x09, packet_type]);
        payload
    }

    #[test]
    fn single_indicator_yields_one_sample() {
        let mut payload = packet(0xd6, 32);
        payload[18..21].copy_from_slice(&[0x91, 0x0c, 0xf4]);
        let summary = parse_packet(&payload).unwrap();

        let touch = extract_touch(&summary, &payload).unwrap();
        assert_eq!(
            touch.samples,
            vec![TouchSample {
                offset: 18,
                indicator: 0x91,
                slot: 1,
                dx: 12,
                dy: -12,
            }]
        );
        assert_eq!(
            touch.samples[0].to_string(),
            "Offset 18: touch_byte=0x91 slot=1 dx= +12 dy= -12"
        );
    }

    #[test]
    fn overlapping_indicators_are_all_reported() {
        let mut payload = packet(0xd7, 24);
        payload[18..21].copy_from_slice(&[0x80, 0x81, 0x82]);
        let summary = parse_packet(&payload).unwrap();

        let touch = extract_touch(&summary, &payload).unwrap();
        let offsets: Vec<usize> = touch.samples.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![18, 19, 20]);
        assert_eq!(touch.samples[1].slot, 1);
        assert_eq!(touch.samples[1].dx, -126);
        assert_eq!(touch.samples[1].dy, 0);
    }

    #[test]
    fn scan_stops_two_bytes_before_end() {
        let mut payload = packet(0xd6, 22);
        payload[20] = 0xff;
        payload[21] = 0xff;
        let summary = parse_packet(&payload).unwrap();

        let touch = extract_touch(&summary, &payload).unwrap();
        assert!(touch.samples.is_empty());
    }

    #[test]
    fn windows_are_clipped() {
        let mut payload = packet(0xd7, 20);
        payload[4..8].copy_from_slice(&[0xaa, 0xbb, 0xcc, 0xdd]);
        payload[18..20].copy_from_slice(&[0x82, 0x05]);
        let summary = parse_packet(&payload).unwrap();

        let touch = extract_touch(&summary, &payload).unwrap();
        assert_eq!(touch.head_window, vec![0xaa, 0xbb, 0xcc, 0xdd]);
        assert_eq!(touch.tail_window, vec![0x82, 0x05]);
        assert!(touch.samples.is_empty());
        assert!(touch.coord_candidates.is_empty());
        assert_eq!(
            touch.to_string(),
            "  Touch packet analysis:\n    Bytes 4-7:  aa bb cc dd\n    Bytes 18+:  82 05\n"
        );
    }

    #[test]
    fn non_touch_or_short_packets_are_skipped() {
        let payload = packet(0x01, 40);
        let summary = parse_packet(&payload).unwrap();
        assert!(extract_touch(&summary, &payload).is_none());

        let payload = packet(0xd6, 19);
        let summary = parse_packet(&payload).unwrap();
        assert!(extract_touch(&summary, &payload).is_none());
    }

    #[test]
    fn coord_candidates_for_long_packets() {
        let mut payload = packet(0xd6, 32);
        payload[16..18].copy_from_slice(&[0x04, 0xfe]);
        payload[28..30].copy_from_slice(&[0x01, 0x02]);
        let summary = parse_packet(&payload).unwrap();

        let touch = extract_touch(&summary, &payload).unwrap();
        let values: Vec<(usize, u16)> = touch
            .coord_candidates
            .iter()
            .map(|c| (c.offset, c.value))
            .collect();
        assert_eq!(values, vec![(16, 0x04fe), (20, 0), (24, 0), (28, 0x0102)]);
    }
}
