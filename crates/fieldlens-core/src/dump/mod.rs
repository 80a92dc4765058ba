//! Byte-dump text parsing.
//!
//! Dumps are multi-line logs where data lines carry whitespace-separated
//! `<index>:<hexvalue>` tokens, optionally behind a repeated header that ends
//! in `***`. The parser recovers a sparse byte map from that text on a
//! best-effort basis: noise tokens are skipped, never surfaced. Marker and
//! separator conventions live in `layout`, line/token handling in `reader`.

pub mod layout;
mod parser;
mod reader;

use std::collections::BTreeMap;

/// Sparse mapping from byte index to byte value, as recovered from a dump.
///
/// Indices need not be contiguous. The ordered map keeps iteration and the
/// derived report summary deterministic.
pub type ByteMap = BTreeMap<u64, u8>;

pub use parser::parse_dump;
