/// Reinterpret a raw byte as a two's-complement signed value.
pub(crate) fn to_signed(value: u8) -> i8 {
    value as i8
}

/// Render bytes as two-digit lowercase hex separated by single spaces.
pub(crate) fn hex_join(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::{hex_join, to_signed};

    #[test]
    fn to_signed_boundaries() {
        assert_eq!(to_signed(0x00), 0);
        assert_eq!(to_signed(0x7f), 127);
        assert_eq!(to_signed(0x80), -128);
        assert_eq!(to_signed(0xff), -1);
    }

    #[test]
    fn hex_join_lowercase_spaced() {
        assert_eq!(hex_join(&[0x5b, 0x5d, 0x0a]), "5b 5d 0a");
        assert_eq!(hex_join(&[]), "");
    }
}
