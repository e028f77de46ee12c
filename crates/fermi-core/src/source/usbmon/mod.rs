//! usbmon text capture source.
//!
//! Each relevant line looks like
//! `<urb> <timestamp> <event> <address> ... = <hex word> <hex word> ...`
//! with at least seven metadata columns before the delimiter. Every other
//! line is treated as noise and skipped without an error.

pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::{
    CaptureLine, UsbmonFileSource, UsbmonMeta, UsbmonSource, decode_capture_line, decode_line,
};
