use super::error::FermiError;
use super::layout;
use crate::protocols::common::reader::to_signed;

pub struct FermiReader<'a> {
    payload: &'a [u8],
}

impl<'a> FermiReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn packet_len(&self) -> usize {
        self.payload.len()
    }

    pub fn require_len(&self, needed: usize) -> Result<(), FermiError> {
        if self.payload.len() < needed {
            return Err(FermiError::TooShort {
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, FermiError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(FermiError::TooShort {
                needed: offset + 1,
                actual: self.payload.len(),
            })
    }

    pub fn read_i8(&self, offset: usize) -> Result<i8, FermiError> {
        self.read_u8(offset).map(to_signed)
    }

    /// Signed byte at `offset`, or zero when the packet ends before it.
    pub fn read_i8_or_zero(&self, offset: usize) -> i8 {
        self.read_i8(offset).unwrap_or(0)
    }

    pub fn read_u16_be(&self, offset: usize) -> Result<u16, FermiError> {
        let bytes = self.read_slice(offset..offset + 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], FermiError> {
        self.payload
            .get(range.clone())
            .ok_or(FermiError::TooShort {
                needed: range.end,
                actual: self.payload.len(),
            })
    }

    /// Bytes of `range` that exist in the packet; never fails.
    pub fn read_clipped(&self, range: std::ops::Range<usize>) -> &'a [u8] {
        let end = range.end.min(self.payload.len());
        let start = range.start.min(end);
        &self.payload[start..end]
    }

    pub fn read_header(&self) -> Result<&'a [u8], FermiError> {
        self.read_slice(layout::HEADER_RANGE)
    }
}
