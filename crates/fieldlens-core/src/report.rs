use std::fs;
use std::path::Path;

use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::dump::{ByteMap, parse_dump};
use crate::field::{FieldDescriptor, FieldOutcome, decode_all};
use crate::{DEFAULT_GENERATED_AT, DecodeReport, DumpSummary, FieldRow, make_stub_report};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no byte tokens parsed from input")]
    EmptyInput,
}

/// Decode a dump file against `descriptors` and build a report.
pub fn decode_dump_file(
    path: &Path,
    descriptors: &[FieldDescriptor],
) -> Result<DecodeReport, DecodeError> {
    let text = fs::read_to_string(path)?;
    decode_dump_text(&text, &path.display().to_string(), descriptors)
}

/// Decode dump text against `descriptors` and build a report; `input_label`
/// names the source in the report (a path, or `-` for piped input).
///
/// # Errors
/// Returns `DecodeError::EmptyInput` when no byte token parses out of the
/// text: the whole pass aborts and no rows are produced. Per-field problems
/// do not error here; they land in the report as failure rows.
pub fn decode_dump_text(
    text: &str,
    input_label: &str,
    descriptors: &[FieldDescriptor],
) -> Result<DecodeReport, DecodeError> {
    let map = parse_dump(text);
    if map.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let mut report = make_stub_report(input_label, text.len() as u64);
    report.generated_at = now_rfc3339();
    report.dump_summary = Some(build_dump_summary(&map));
    report.fields = build_field_rows(decode_all(&map, descriptors));
    Ok(report)
}

fn build_dump_summary(map: &ByteMap) -> DumpSummary {
    DumpSummary {
        bytes_total: map.len() as u64,
        index_min: map.first_key_value().map(|(index, _)| *index).unwrap_or(0),
        index_max: map.last_key_value().map(|(index, _)| *index).unwrap_or(0),
    }
}

fn build_field_rows(outcomes: Vec<FieldOutcome>) -> Vec<FieldRow> {
    outcomes
        .into_iter()
        .map(|outcome| match outcome {
            FieldOutcome::Decoded(field) => {
                let bytes = field.byte_list();
                let hex = format!("0x{}", field.hex_string());
                let value = field.value.to_string();
                FieldRow {
                    position: field.position,
                    name: field.name,
                    range: Some(field.range.to_string()),
                    endian: Some(field.endian.to_string()),
                    bytes: Some(bytes),
                    hex: Some(hex),
                    value: Some(value),
                    error: None,
                }
            }
            FieldOutcome::Failed(failure) => FieldRow {
                position: failure.position,
                name: failure.name,
                range: None,
                endian: None,
                bytes: None,
                hex: None,
                value: None,
                error: Some(failure.error.to_string()),
            },
        })
        .collect()
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| DEFAULT_GENERATED_AT.to_string())
}
