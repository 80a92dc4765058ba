use super::layout;

/// Drop the repeated log header: everything up to and including the last
/// occurrence of the marker. Lines without a marker pass through unchanged.
pub(crate) fn strip_header(line: &str) -> &str {
    match line.rsplit_once(layout::HEADER_MARKER) {
        Some((_, tail)) => tail,
        None => line,
    }
}

/// Parse one `<index>:<hexvalue>` token into an index/value pair.
///
/// The token is split at the last separator. A doubled separator leaves junk
/// glued to the index; only the trailing segment of the index side is kept.
/// Anything that fails to parse yields `None` and the caller skips the token.
pub(crate) fn parse_token(token: &str) -> Option<(u64, u8)> {
    let (index_part, value_part) = token.rsplit_once(layout::TOKEN_SEPARATOR)?;
    let index_digits = match index_part.rsplit_once(layout::TOKEN_SEPARATOR) {
        Some((_, tail)) => tail,
        None => index_part,
    };
    let index = index_digits.parse::<u64>().ok()?;
    let value = parse_hex_byte(value_part)?;
    Some((index, value))
}

fn parse_hex_byte(text: &str) -> Option<u8> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u8::from_str_radix(digits, 16).ok()
}
