//! Field descriptors and endian-aware decoding.
//!
//! A descriptor names an inclusive byte range and a byte order; the decoder
//! gathers the range from a parsed dump and assembles the unsigned value at
//! arbitrary precision. Range text is parsed here, not at config load, so a
//! bad range surfaces against the field that owns it. Errors are explicit
//! and per-field; safe map access lives in `reader`.

mod decoder;
mod descriptor;
mod error;
mod reader;

pub use decoder::{DecodedField, FieldFailure, FieldOutcome, decode_all, decode_field};
pub use descriptor::{ByteRange, DEFAULT_RANGE, Endianness, FieldDescriptor};
pub use error::RangeError;
