use super::types::{Frame, FrameTable};
use anyhow::{Context, Result as AnyhowResult};

/// Separator placed after every encoded string.
pub const LINE_TERMINATOR: u8 = b'\n';

/// Encodes a list of strings as newline-terminated lines.
///
/// Every string, including the last, is followed by a terminator, so an empty
/// list encodes to an empty buffer and a list holding one empty string encodes
/// to a single terminator. Strings must not contain the terminator themselves;
/// there is no escaping.
///
/// # Arguments
///
/// * `strings` - The strings to encode, in order.
///
/// # Returns
///
/// The encoded bytes. Their length is what a recipient must be told before the
/// buffer itself is sent.
///
/// # Examples
///
/// ```rust
/// use scatter_digest::frame::encode;
///
/// assert_eq!(encode(&["a", "bc"]), b"a\nbc\n");
/// assert!(encode::<&str>(&[]).is_empty());
/// ```
pub fn encode<S: AsRef<str>>(strings: &[S]) -> Vec<u8> {
    let capacity = strings.iter().map(|s| s.as_ref().len() + 1).sum();
    let mut buffer = Vec::with_capacity(capacity);
    for s in strings {
        buffer.extend_from_slice(s.as_ref().as_bytes());
        buffer.push(LINE_TERMINATOR);
    }
    buffer
}

/// Decodes a buffer produced by [`encode`] back into its strings.
///
/// The buffer is split on the terminator. The single empty piece left behind by
/// a final terminator is dropped; empty lines in the middle are kept, so empty
/// strings survive a round trip. A last line without a terminator is kept.
///
/// # Arguments
///
/// * `buffer` - Encoded bytes.
///
/// # Returns
///
/// * `Ok(Vec<String>)` - The decoded strings in their original order.
/// * `Err(anyhow::Error)` - If the buffer is not valid UTF-8.
///
/// # Examples
///
/// ```rust
/// use scatter_digest::frame::decode;
///
/// assert_eq!(decode(b"a\n\nb\n").unwrap(), vec!["a", "", "b"]);
/// assert!(decode(b"").unwrap().is_empty());
/// ```
pub fn decode(buffer: &[u8]) -> AnyhowResult<Vec<String>> {
    let text = std::str::from_utf8(buffer).context("Framed buffer is not valid UTF-8")?;
    let mut lines: Vec<String> = text
        .split(LINE_TERMINATOR as char)
        .map(str::to_string)
        .collect();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    Ok(lines)
}

impl Frame {
    /// Encodes one string list per recipient and concatenates the results.
    ///
    /// The returned table gives each recipient's byte count and offset, in the
    /// same order as `lists`.
    pub fn pack<S: AsRef<str>>(lists: &[Vec<S>]) -> Frame {
        let encoded: Vec<Vec<u8>> = lists.iter().map(|list| encode(list)).collect();
        let table = FrameTable::from_lengths(encoded.iter().map(Vec::len).collect());
        let buffer = encoded.concat();
        Frame { buffer, table }
    }
}
