pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Round to nearest and saturate into the 8-bit channel range. NaN maps to 0.
pub(crate) fn round_clamp_u8(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// Add a signed offset to a channel value without wrapping.
pub(crate) fn add_offset_u8(v: u8, delta: i32) -> u8 {
    (i32::from(v) + delta).clamp(0, 255) as u8
}

/// Integer interpolation `a -> b` by `t / 255`.
pub(crate) fn lerp_u8(a: u8, b: u8, t: u8) -> u8 {
    let t = u16::from(t);
    let av = mul_div255_u16(u16::from(a), 255 - t);
    let bv = mul_div255_u16(u16::from(b), t);
    (av + bv).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
