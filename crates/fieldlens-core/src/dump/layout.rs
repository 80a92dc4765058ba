pub const HEADER_MARKER: &str = "***";
pub const TOKEN_SEPARATOR: char = ':';
