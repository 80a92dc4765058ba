use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::RangeError;

/// Byte range assigned to a freshly added or defaulted field.
pub const DEFAULT_RANGE: &str = "0-3";

/// Byte order used when combining the bytes of a range into one integer.
///
/// # Examples
/// ```
/// use fieldlens_core::Endianness;
///
/// assert_eq!(Endianness::Little.to_string(), "little");
/// assert_eq!(Endianness::default(), Endianness::Little);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    /// Least-significant byte at the lowest index.
    #[default]
    Little,
    /// Most-significant byte at the lowest index.
    Big,
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endianness::Little => write!(f, "little"),
            Endianness::Big => write!(f, "big"),
        }
    }
}

/// User-defined field: a named byte range plus the endianness to decode it with.
///
/// The range is kept as entered (`"start-end"` text) and parsed only when the
/// field is decoded, so an unparseable range is a per-field decode failure
/// rather than a config-load failure.
///
/// # Examples
/// ```
/// use fieldlens_core::{Endianness, FieldDescriptor};
///
/// let field = FieldDescriptor::new("opcode", "8-9", Endianness::Big);
/// assert_eq!(field.display_name(1), "opcode");
///
/// let unnamed = FieldDescriptor::new("", "0-3", Endianness::Little);
/// assert_eq!(unnamed.display_name(2), "Field 2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Display name; empty names fall back to `"Field N"`.
    #[serde(default)]
    pub name: String,
    /// Inclusive byte range as entered, format `"start-end"`.
    #[serde(default = "default_range")]
    pub range: String,
    /// Byte order for value assembly.
    #[serde(default)]
    pub endian: Endianness,
}

fn default_range() -> String {
    DEFAULT_RANGE.to_string()
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, range: impl Into<String>, endian: Endianness) -> Self {
        Self {
            name: name.into(),
            range: range.into(),
            endian,
        }
    }

    /// Default descriptor for 1-based `position`: named `"Field N"`, range
    /// `0-3`, little-endian.
    pub fn numbered(position: usize) -> Self {
        Self {
            name: format!("Field {position}"),
            range: DEFAULT_RANGE.to_string(),
            endian: Endianness::Little,
        }
    }

    /// Name shown for this field at 1-based `position`; empty names become
    /// `"Field N"`.
    pub fn display_name(&self, position: usize) -> String {
        if self.name.is_empty() {
            format!("Field {position}")
        } else {
            self.name.clone()
        }
    }
}

/// Inclusive byte range `[start, end]` within a dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for ByteRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((start_text, end_text)) = s.trim().split_once('-') else {
            return Err(RangeError::Malformed {
                text: s.to_string(),
            });
        };

        let (start, end) = match (
            start_text.trim().parse::<u64>(),
            end_text.trim().parse::<u64>(),
        ) {
            (Ok(start), Ok(end)) => (start, end),
            _ => {
                return Err(RangeError::Malformed {
                    text: s.to_string(),
                });
            }
        };

        if start > end {
            return Err(RangeError::Reversed { start, end });
        }
        Ok(ByteRange { start, end })
    }
}
