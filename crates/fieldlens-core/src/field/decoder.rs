use num_bigint::BigUint;

use crate::dump::ByteMap;

use super::descriptor::{ByteRange, Endianness, FieldDescriptor};
use super::error::RangeError;
use super::reader::MapReader;

/// Decoded view of one field over a parsed dump. Recomputed per decode pass,
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedField {
    /// 1-based position in the descriptor sequence.
    pub position: usize,
    /// Display name (empty descriptor names become `"Field N"`).
    pub name: String,
    /// Parsed inclusive byte range.
    pub range: ByteRange,
    /// Byte order used for assembly.
    pub endian: Endianness,
    /// Bytes from `start` to `end` inclusive, in file order.
    pub bytes: Vec<u8>,
    /// Unsigned value assembled in the requested byte order; wide ranges are
    /// carried at full precision, never truncated to a machine word.
    pub value: BigUint,
}

impl DecodedField {
    /// Uppercase hex text of the value with no leading zeros; zero renders
    /// as `"0"`.
    pub fn hex_string(&self) -> String {
        format!("{:X}", self.value)
    }

    /// Space-separated render of the raw bytes, two lowercase hex digits per
    /// byte.
    pub fn byte_list(&self) -> String {
        self.bytes
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Failure record for one field. Decoding of the remaining fields in the
/// same pass continues.
#[derive(Debug)]
pub struct FieldFailure {
    /// 1-based position in the descriptor sequence.
    pub position: usize,
    /// Display name of the failed field.
    pub name: String,
    /// What went wrong.
    pub error: RangeError,
}

/// Per-field result of a decode pass, in descriptor order.
#[derive(Debug)]
pub enum FieldOutcome {
    Decoded(DecodedField),
    Failed(FieldFailure),
}

/// Decode a single field against a parsed dump.
///
/// # Errors
/// Returns `RangeError` when the range text does not parse, the bounds are
/// reversed, or any index in the range is absent from the map.
///
/// # Examples
/// ```
/// use fieldlens_core::{Endianness, FieldDescriptor, decode_field, parse_dump};
///
/// let map = parse_dump("0:01 1:02");
/// let little = FieldDescriptor::new("len", "0-1", Endianness::Little);
/// assert_eq!(decode_field(&map, 1, &little).unwrap().value, 513u32.into());
///
/// let big = FieldDescriptor::new("len", "0-1", Endianness::Big);
/// assert_eq!(decode_field(&map, 1, &big).unwrap().value, 258u32.into());
/// ```
pub fn decode_field(
    map: &ByteMap,
    position: usize,
    descriptor: &FieldDescriptor,
) -> Result<DecodedField, RangeError> {
    let range: ByteRange = descriptor.range.parse()?;
    let bytes = MapReader::new(map).read_range(&range)?;
    let value = match descriptor.endian {
        Endianness::Little => BigUint::from_bytes_le(&bytes),
        Endianness::Big => BigUint::from_bytes_be(&bytes),
    };

    Ok(DecodedField {
        position,
        name: descriptor.display_name(position),
        range,
        endian: descriptor.endian,
        bytes,
        value,
    })
}

/// Decode every descriptor against the map, preserving descriptor order.
/// One field's failure never aborts decoding of subsequent fields.
///
/// # Examples
/// ```
/// use fieldlens_core::{Endianness, FieldDescriptor, FieldOutcome, decode_all, parse_dump};
///
/// let map = parse_dump("0:01 1:02");
/// let fields = vec![
///     FieldDescriptor::new("ok", "0-1", Endianness::Little),
///     FieldDescriptor::new("missing", "2-3", Endianness::Little),
/// ];
/// let outcomes = decode_all(&map, &fields);
/// assert!(matches!(outcomes[0], FieldOutcome::Decoded(_)));
/// assert!(matches!(outcomes[1], FieldOutcome::Failed(_)));
/// ```
pub fn decode_all(map: &ByteMap, descriptors: &[FieldDescriptor]) -> Vec<FieldOutcome> {
    descriptors
        .iter()
        .enumerate()
        .map(|(offset, descriptor)| {
            let position = offset + 1;
            match decode_field(map, position, descriptor) {
                Ok(field) => FieldOutcome::Decoded(field),
                Err(error) => FieldOutcome::Failed(FieldFailure {
                    position,
                    name: descriptor.display_name(position),
                    error,
                }),
            }
        })
        .collect()
}
