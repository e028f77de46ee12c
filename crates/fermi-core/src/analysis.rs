use std::path::Path;

use thiserror::Error;

use crate::PacketAnalysis;
use crate::protocols::fermi::{extract_touch, parse_packet};
use crate::source::{PacketEvent, PacketSource, SourceError, UsbmonFileSource};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Iterator over the recognized packets of a source.
///
/// Lines that do not hold a recognized packet are skipped. The iterator
/// yields at most one error and then ends.
pub struct PacketAnalyses<S> {
    source: S,
    failed: bool,
}

impl<S: PacketSource> Iterator for PacketAnalyses<S> {
    type Item = Result<PacketAnalysis, AnalysisError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let event = match self.source.next_packet() {
                Ok(Some(event)) => event,
                Ok(None) => return None,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err.into()));
                }
            };
            if let Some(analysis) = analyze_packet(event) {
                return Some(Ok(analysis));
            }
        }
    }
}

pub fn analyze_log_file(path: &Path) -> Result<PacketAnalyses<UsbmonFileSource>, AnalysisError> {
    let source = UsbmonFileSource::open(path)?;
    Ok(analyze_source(source))
}

pub fn analyze_source<S: PacketSource>(source: S) -> PacketAnalyses<S> {
    PacketAnalyses {
        source,
        failed: false,
    }
}

/// Decode one packet event; `None` when the header is not recognized.
pub fn analyze_packet(event: PacketEvent) -> Option<PacketAnalysis> {
    let PacketEvent { line, meta, data } = event;
    let Some(summary) = parse_packet(&data) else {
        log::trace!("line {line}: unrecognized header");
        return None;
    };
    let touch = extract_touch(&summary, &data);

    let kind = summary.kind();
    let length_class = summary.length_class();
    log::debug!(
        "line {line}: seq={} type=0x{:02x} len={} kind={kind:?} length_class={length_class:?}",
        summary.sequence,
        summary.packet_type,
        summary.length,
    );

    Some(PacketAnalysis {
        line,
        meta,
        summary,
        kind,
        length_class,
        touch,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{AnalysisError, analyze_packet, analyze_source};
    use crate::PacketKind;
    use crate::source::{PacketEvent, PacketSource, SourceError, UsbmonMeta, UsbmonSource};

    fn meta() -> UsbmonMeta {
        crate::source::decode_capture_line("a b c d e f g = 5b5d0101")
            .unwrap()
            .meta
    }

    fn event(data: Vec<u8>) -> PacketEvent {
        PacketEvent {
            line: 1,
            meta: meta(),
            data,
        }
    }

    #[test]
    fn analyze_touch_packet() {
        let mut data = vec![0u8; 32];
        data[..4].copy_from_slice(&[0x5b, 0x5d, 0x09, 0xd6]);
        data[18..21].copy_from_slice(&[0x91, 0x0c, 0xf4]);

        let analysis = analyze_packet(event(data)).unwrap();
        assert_eq!(analysis.kind, PacketKind::Touch);
        assert_eq!(analysis.length_class, None);
        let touch = analysis.touch.as_ref().unwrap();
        assert_eq!(touch.samples.len(), 1);
        assert!(
            analysis
                .render_text()
                .contains("    Offset 18: touch_byte=0x91 slot=1 dx= +12 dy= -12\n")
        );
    }

    #[test]
    fn analyze_rejects_foreign_header() {
        assert!(analyze_packet(event(vec![0x12, 0x34, 0x56, 0x78])).is_none());
    }

    #[test]
    fn source_iterator_skips_unrecognized() {
        let log = "a b c d e f g = 12345678\na b c d e f g = 5b5d0301\n";
        let analyses: Vec<_> = analyze_source(UsbmonSource::new(Cursor::new(log)))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(analyses.len(), 1);
        assert_eq!(analyses[0].line, 2);
        assert_eq!(analyses[0].summary.sequence, 3);
    }

    struct FailingSource;

    impl PacketSource for FailingSource {
        fn next_packet(&mut self) -> Result<Option<PacketEvent>, SourceError> {
            Err(std::io::Error::other("disk gone").into())
        }
    }

    #[test]
    fn source_error_ends_iteration() {
        let mut analyses = analyze_source(FailingSource);
        assert!(matches!(
            analyses.next(),
            Some(Err(AnalysisError::Source(SourceError::Io(_))))
        ));
        assert!(analyses.next().is_none());
    }
}
