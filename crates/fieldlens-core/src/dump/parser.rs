use super::ByteMap;
use super::reader::{parse_token, strip_header};

/// Parse a textual byte dump into a sparse byte map.
///
/// Each line may carry a repeated log header ending in `***`, which is
/// stripped first. The remainder is whitespace-separated `<index>:<hexvalue>`
/// tokens with a base-10 index and a base-16 byte value. Malformed tokens are
/// skipped silently; the dump format interleaves data with free-form log
/// text, so best-effort collection is the contract, not a fallback. When the
/// same index appears more than once, the last occurrence in line order wins.
///
/// An input with no parseable tokens yields an empty map, not an error.
///
/// # Examples
/// ```
/// use fieldlens_core::parse_dump;
///
/// let map = parse_dump("LOG*** 0:1A 1:FF\n2:00 3:02");
/// assert_eq!(map.get(&0), Some(&0x1a));
/// assert_eq!(map.get(&3), Some(&0x02));
/// assert_eq!(map.len(), 4);
/// ```
pub fn parse_dump(text: &str) -> ByteMap {
    let mut map = ByteMap::new();
    for line in text.lines() {
        for token in strip_header(line).split_whitespace() {
            if let Some((index, value)) = parse_token(token) {
                map.insert(index, value);
            }
        }
    }
    map
}
