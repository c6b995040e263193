// =============================================================================
// ZIG-ZAG VARINT HELPERS
// =============================================================================

/// Longest varint encoding of a 64-bit value.
pub const MAX_VARINT_LEN: usize = 10;

/// Encodes a signed integer as a zig-zag LEB128 varint.
#[must_use]
pub fn encode_varint(value: i64) -> Vec<u8> {
    let mut ux = (value as u64) << 1;
    if value < 0 {
        ux = !ux;
    }
    encode_uvarint(ux)
}

/// Encodes an unsigned LEB128 varint.
#[must_use]
pub fn encode_uvarint(mut value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_VARINT_LEN);
    while value >= 0x80 {
        out.push((value as u8) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
    out
}

/// Decodes an unsigned varint prefix, returning the value and bytes read.
///
/// Returns `None` on empty, truncated or overflowing input.
#[must_use]
pub fn decode_uvarint(buf: &[u8]) -> Option<(u64, usize)> {
    let mut x: u64 = 0;
    let mut shift = 0u32;
    for (i, &b) in buf.iter().enumerate() {
        if i == MAX_VARINT_LEN {
            return None;
        }
        if b < 0x80 {
            if i == MAX_VARINT_LEN - 1 && b > 1 {
                return None;
            }
            return Some((x | u64::from(b) << shift, i + 1));
        }
        x |= u64::from(b & 0x7f) << shift;
        shift += 7;
    }
    None
}

/// Decodes a zig-zag varint prefix, returning the value and bytes read.
#[must_use]
pub fn decode_varint(buf: &[u8]) -> Option<(i64, usize)> {
    let (ux, n) = decode_uvarint(buf)?;
    let mut x = i64::try_from(ux >> 1).ok()?;
    if ux & 1 != 0 {
        x = !x;
    }
    Some((x, n))
}

/// Decodes a buffer holding exactly one zig-zag varint.
#[must_use]
pub fn decode_varint_exact(buf: &[u8]) -> Option<i64> {
    match decode_varint(buf)? {
        (value, n) if n == buf.len() => Some(value),
        _ => None,
    }
}
