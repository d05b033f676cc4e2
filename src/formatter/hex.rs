//! Hex dumps of binary bodies.
//!
//! ```
//! use alog::formatter::hex::format_hex;
//!
//! assert_eq!(format_hex(Some(&[0x6F, 0x20, 0x7B])), "Hex:\n6F 20 7B");
//! assert_eq!(format_hex(None), "Passed byte array is null");
//! ```

pub const NULL_BYTES: &str = "Passed byte array is null";
pub const EMPTY_BYTES: &str = "Passed byte array is empty";

/// Renders bytes as space-separated upper-case pairs.
pub fn format_hex(input: Option<&[u8]>) -> String {
    let bytes = match input {
        None => return NULL_BYTES.to_owned(),
        Some([]) => return EMPTY_BYTES.to_owned(),
        Some(bytes) => bytes,
    };

    let encoded = hex::encode_upper(bytes);
    let mut out = String::with_capacity(5 + bytes.len() * 3);
    out.push_str("Hex:\n");
    for (i, pair) in encoded.as_bytes().chunks(2).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(std::str::from_utf8(pair).unwrap_or_default());
    }
    out
}
