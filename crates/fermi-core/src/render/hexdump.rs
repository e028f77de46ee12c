//! Classic 16-bytes-per-row hex and ASCII dump.

use std::fmt::Write as _;
use std::io;

const BYTES_PER_ROW: usize = 16;
const GROUP_SPLIT: usize = 7;

/// Render `data` as dump rows, each terminated by a newline.
///
/// # Examples
/// ```
/// use fermi_core::hex_dump;
///
/// let dump = hex_dump(b"[]");
/// assert!(dump.starts_with("00000000  5b 5d "));
/// assert!(dump.ends_with(" |[]|\n"));
/// ```
pub fn hex_dump(data: &[u8]) -> String {
    let mut out = String::new();
    for (row, chunk) in data.chunks(BYTES_PER_ROW).enumerate() {
        // Writing into a String cannot fail.
        let _ = write!(out, "{:08x}  ", row * BYTES_PER_ROW);
        for column in 0..BYTES_PER_ROW {
            match chunk.get(column) {
                Some(byte) => {
                    let _ = write!(out, "{byte:02x} ");
                }
                None => out.push_str("   "),
            }
            if column == GROUP_SPLIT {
                out.push(' ');
            }
        }
        out.push_str(" |");
        out.extend(chunk.iter().map(|&byte| printable(byte)));
        out.push_str("|\n");
    }
    out
}

/// Stream the dump of `data` into `writer`.
pub fn write_hex_dump<W: io::Write>(writer: &mut W, data: &[u8]) -> io::Result<()> {
    writer.write_all(hex_dump(data).as_bytes())
}

fn printable(byte: u8) -> char {
    if (32..127).contains(&byte) {
        char::from(byte)
    } else {
        '.'
    }
}
