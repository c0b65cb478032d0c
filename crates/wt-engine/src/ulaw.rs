//! 8-bit µ-law companding as understood by the firmware decoder.
//!
//! Four-bit mantissa, eight exponent tiers, a fixed +128 bias and no
//! bias table.

/// Encode one 16-bit sample.
pub fn encode(sample: i16) -> u8 {
    let sign: u8 = if sample < 0 { 0x80 } else { 0 };
    let mag = (sample.unsigned_abs() as u32 + 128).min(0x7FFF);

    let (code, shift) = match mag {
        0x4000..=0x7FFF => (0x70, 10), // 01wx yz00 0000 0000
        0x2000..=0x3FFF => (0x60, 9),  // 001w xyz0 0000 0000
        0x1000..=0x1FFF => (0x50, 8),  // 0001 wxyz 0000 0000
        0x0800..=0x0FFF => (0x40, 7),  // 0000 1wxy z000 0000
        0x0400..=0x07FF => (0x30, 6),  // 0000 01wx yz00 0000
        0x0200..=0x03FF => (0x20, 5),  // 0000 001w xyz0 0000
        0x0100..=0x01FF => (0x10, 4),  // 0000 0001 wxyz 0000
        _ => (0x00, 3),                // 0000 0000 1wxy z000
    };
    sign | code | ((mag >> shift) & 0x0F) as u8
}

/// Decode one µ-law byte back to 16-bit PCM.
///
/// Reconstructs the middle of the quantization step, then removes the bias.
pub fn decode(byte: u8) -> i16 {
    let shift = ((byte >> 4) & 0x07) as u32 + 3;
    let mantissa = (byte & 0x0F) as i32;
    let mag = ((0x10 | mantissa) << shift) + (1 << (shift - 1)) - 128;
    if byte & 0x80 != 0 {
        -mag as i16
    } else {
        mag as i16
    }
}
