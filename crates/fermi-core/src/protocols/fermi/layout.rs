pub const HEADER_MAGIC: [u8; 2] = [0x5B, 0x5D];
pub const HEADER_RANGE: std::ops::Range<usize> = 0..2;
pub const SEQUENCE_OFFSET: usize = 2;
pub const TYPE_OFFSET: usize = 3;
pub const MIN_LEN: usize = 4;

pub const PREVIEW_LEN: usize = 32;

pub const TYPE_DATA: u8 = 0x01;
pub const TYPE_STATUS: u8 = 0x09;
pub const TYPE_TOUCH_D6: u8 = 0xD6;
pub const TYPE_TOUCH_D7: u8 = 0xD7;

pub const TOUCH_MIN_LEN: usize = 20;
pub const TOUCH_HEAD_WINDOW: std::ops::Range<usize> = 4..8;
pub const TOUCH_TAIL_WINDOW: std::ops::Range<usize> = 18..30;
pub const TOUCH_SCAN_START: usize = 18;
pub const TOUCH_INDICATOR_BIT: u8 = 0x80;
pub const TOUCH_SLOT_MASK: u8 = 0x0F;

pub const COORD_CANDIDATE_MIN_LEN: usize = 32;
pub const COORD_CANDIDATE_OFFSETS: [usize; 4] = [16, 20, 24, 28];

// Data-stream packet lengths observed on idle and touching panels.
pub const IDLE_LEN_RANGE: std::ops::RangeInclusive<usize> = 478..=486;
pub const TOUCH_LEN_RANGE: std::ops::RangeInclusive<usize> = 487..=493;
