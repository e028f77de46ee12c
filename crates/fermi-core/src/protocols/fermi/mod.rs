//! NextWindow Fermi touchscreen packet decoding.
//!
//! A recognized packet starts with the magic `5B 5D`, followed by a sequence
//! byte and a type byte. Touch packets (`0xD6`, `0xD7`) of at least 20 bytes
//! are additionally scanned for touch indicators, see [`touch`].
//!
//! Misses are not errors: a short payload or a foreign header simply yields
//! no summary, because capture logs are full of unrelated traffic.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod touch;

pub use parser::{LengthClass, PacketKind, PacketSummary, parse_packet, try_parse_packet};
pub use touch::{CoordCandidate, TouchAnalysis, TouchSample, extract_touch};
