/// Separator between the metadata columns and the hex payload.
pub const DELIMITER: &str = " = ";
pub const MIN_META_TOKENS: usize = 7;
pub const MIN_PACKET_LEN: usize = 4;

pub const URB_TAG_INDEX: usize = 0;
pub const TIMESTAMP_INDEX: usize = 1;
pub const EVENT_INDEX: usize = 2;
pub const ADDRESS_INDEX: usize = 3;
pub const FIXED_META_TOKENS: usize = 4;
