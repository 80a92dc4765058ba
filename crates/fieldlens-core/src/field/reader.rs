use crate::dump::ByteMap;

use super::descriptor::ByteRange;
use super::error::RangeError;

/// Safe access to a sparse byte map during field decoding.
pub struct MapReader<'a> {
    map: &'a ByteMap,
}

impl<'a> MapReader<'a> {
    pub fn new(map: &'a ByteMap) -> Self {
        Self { map }
    }

    /// Gather the bytes of `range` in file order, failing on the first index
    /// absent from the map.
    pub fn read_range(&self, range: &ByteRange) -> Result<Vec<u8>, RangeError> {
        let mut bytes = Vec::new();
        for index in range.start..=range.end {
            match self.map.get(&index) {
                Some(value) => bytes.push(*value),
                None => {
                    return Err(RangeError::MissingByte {
                        index,
                        start: range.start,
                        end: range.end,
                    });
                }
            }
        }
        Ok(bytes)
    }
}
