//! FieldLens core library for byte-dump field decoding.
//!
//! This crate implements the decode pipeline used by the CLI: dump text is
//! parsed (layout/reader/parser) into a sparse byte map, the field layer
//! decodes named byte ranges against that map, and the report layer
//! aggregates the outcomes into a deterministic report. Parsing is
//! text-oriented and side-effect free; file I/O is isolated in the `report`
//! entry points and the `config` store.
//!
//! Invariants:
//! - Report rows follow field list order; outputs are deterministic apart
//!   from `generated_at`.
//! - Byte maps are sparse; a later token overwrites an earlier one at the
//!   same index.
//! - A field that fails to decode becomes a failure row and never aborts
//!   the pass.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use fieldlens_core::{FieldConfig, decode_dump_file};
//!
//! let config = FieldConfig::load(Path::new("fields.json"))?;
//! let report = decode_dump_file(Path::new("dump.txt"), config.descriptors())?;
//! println!("report version: {}", report.report_version);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod config;
mod dump;
mod field;
mod report;

pub use config::{ConfigError, FieldConfig};
pub use dump::{ByteMap, parse_dump};
pub use field::{
    ByteRange, DEFAULT_RANGE, DecodedField, Endianness, FieldDescriptor, FieldFailure,
    FieldOutcome, RangeError, decode_all, decode_field,
};
pub use report::{DecodeError, decode_dump_file, decode_dump_text};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when the clock cannot be formatted.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Decode report with rows in field list order.
///
/// # Examples
/// ```
/// use fieldlens_core::make_stub_report;
///
/// let report = make_stub_report("dump.txt", 123);
/// assert_eq!(report.report_version, fieldlens_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp representing the report generation time.
    pub generated_at: String,

    /// Input dump metadata.
    pub input: InputInfo,

    /// Optional parsed-extent summary (absent when nothing parsed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dump_summary: Option<DumpSummary>,
    /// Per-field rows in field list order.
    pub fields: Vec<FieldRow>,
}

/// Tool metadata embedded in reports.
///
/// # Examples
/// ```
/// use fieldlens_core::ToolInfo;
///
/// let tool = ToolInfo {
///     name: "fieldlens".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(tool.name, "fieldlens");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "fieldlens").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input dump metadata embedded in reports.
///
/// # Examples
/// ```
/// use fieldlens_core::InputInfo;
///
/// let input = InputInfo {
///     path: "dump.txt".to_string(),
///     bytes: 1024,
/// };
/// assert_eq!(input.bytes, 1024);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder (`-` for piped input).
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Extent of the parsed byte map.
///
/// # Examples
/// ```
/// use fieldlens_core::DumpSummary;
///
/// let summary = DumpSummary {
///     bytes_total: 10,
///     index_min: 0,
///     index_max: 9,
/// };
/// assert_eq!(summary.bytes_total, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpSummary {
    /// Number of distinct byte indices parsed.
    pub bytes_total: u64,
    /// Smallest parsed index.
    pub index_min: u64,
    /// Largest parsed index.
    pub index_max: u64,
}

/// Single report row for a configured field.
///
/// Decoded rows carry every rendered column; failed rows carry only the
/// position, the name, and `error`.
///
/// # Examples
/// ```
/// use fieldlens_core::FieldRow;
///
/// let row = FieldRow {
///     position: 1,
///     name: "len".to_string(),
///     range: Some("0-1".to_string()),
///     endian: Some("little".to_string()),
///     bytes: Some("01 02".to_string()),
///     hex: Some("0x201".to_string()),
///     value: Some("513".to_string()),
///     error: None,
/// };
/// assert_eq!(row.position, 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRow {
    /// 1-based position in the field list.
    pub position: usize,
    /// Display name ("Field N" when the configured name is empty).
    pub name: String,
    /// Byte range in `start-end` form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    /// Endianness label (`little` or `big`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endian: Option<String>,
    /// Selected bytes as two-digit lowercase hex, space separated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<String>,
    /// Decoded value as `0x`-prefixed uppercase hex.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    /// Decoded value in decimal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Decode failure message, present only on failed rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Build a stub report with base fields filled and no rows.
///
/// # Examples
/// ```
/// use fieldlens_core::make_stub_report;
///
/// let report = make_stub_report("dump.txt", 123);
/// assert_eq!(report.report_version, fieldlens_core::REPORT_VERSION);
/// assert!(report.fields.is_empty());
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> DecodeReport {
    DecodeReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "fieldlens".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        dump_summary: None,
        fields: vec![],
    }
}
