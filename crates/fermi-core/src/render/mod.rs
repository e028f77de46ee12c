//! Plain-text renderers that are independent of packet decoding.

pub mod hexdump;

pub use hexdump::{hex_dump, write_hex_dump};
