use super::layout;

/// Split a log line into metadata and payload text.
///
/// Returns `None` unless the delimiter occurs exactly once.
pub fn split_capture_line(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split(layout::DELIMITER);
    let meta = parts.next()?;
    let payload = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((meta, payload))
}

/// Append the bytes of one hex word to `out`.
///
/// A trailing unpaired digit is dropped. Returns `None` when a complete pair
/// is not valid hex.
pub fn decode_hex_word(word: &str, out: &mut Vec<u8>) -> Option<()> {
    for pair in word.as_bytes().chunks(2) {
        let &[hi, lo] = pair else {
            break;
        };
        out.push((hex_value(hi)? << 4) | hex_value(lo)?);
    }
    Some(())
}

fn hex_value(digit: u8) -> Option<u8> {
    char::from(digit).to_digit(16).map(|value| value as u8)
}

#[cfg(test)]
mod tests {
    use super::{decode_hex_word, split_capture_line};

    #[test]
    fn split_requires_single_delimiter() {
        assert_eq!(split_capture_line("a b = 00"), Some(("a b", "00")));
        assert_eq!(split_capture_line("a b 00"), None);
        assert_eq!(split_capture_line("a = 00 = 01"), None);
        assert_eq!(split_capture_line("a=00"), None);
    }

    #[test]
    fn decode_word_pairs() {
        let mut out = Vec::new();
        decode_hex_word("5b5d0901", &mut out).unwrap();
        assert_eq!(out, vec![0x5b, 0x5d, 0x09, 0x01]);
    }

    #[test]
    fn decode_word_drops_trailing_nibble() {
        let mut out = Vec::new();
        decode_hex_word("0a0b0c0", &mut out).unwrap();
        assert_eq!(out, vec![0x0a, 0x0b, 0x0c]);
    }

    #[test]
    fn decode_word_accepts_uppercase() {
        let mut out = Vec::new();
        decode_hex_word("5B5D", &mut out).unwrap();
        assert_eq!(out, vec![0x5b, 0x5d]);
    }

    #[test]
    fn decode_word_rejects_non_hex() {
        let mut out = Vec::new();
        assert!(decode_hex_word("5bzz", &mut out).is_none());
        assert!(decode_hex_word("+f", &mut Vec::new()).is_none());
    }
}
