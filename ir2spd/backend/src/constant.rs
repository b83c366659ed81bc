//! Textual encoding of constants.
//!
//! Integers print as signed decimals, except for 1-bit integers which print
//! as `true` or `false`. IEEE single and double constants print in
//! scientific notation with six fractional digits when that text reads back
//! as the exact same double. Everything else is printed as a hexadecimal bit
//! pattern, with a kind letter for the formats that are not doubles.
use ir2spd_ir::{Constant, FloatConst, FloatKind, IntConst};
use ir2spd_utils::{Error, SpdResult};

pub fn format_constant(c: &Constant) -> SpdResult<String> {
    match c {
        Constant::Int(c) => Ok(format_int(c)),
        Constant::Float(c) => format_float(c),
    }
}

pub fn format_int(c: &IntConst) -> String {
    if c.width() == 1 {
        if c.bits() == 0 { "false" } else { "true" }.to_string()
    } else {
        c.as_signed().to_string()
    }
}

pub fn format_float(c: &FloatConst) -> SpdResult<String> {
    let bits = c.bits();
    match c.kind() {
        // Singles are widened to doubles before printing.
        FloatKind::Single => Ok(double(f32::from_bits(bits as u32) as f64)),
        FloatKind::Double => Ok(double(f64::from_bits(bits as u64))),
        FloatKind::X86Fp80 => Ok(format!(
            "0xK{:04X}{:016X}",
            (bits >> 64) as u16,
            bits as u64
        )),
        FloatKind::Quad => {
            Ok(format!("0xL{:016X}{:016X}", bits as u64, (bits >> 64) as u64))
        }
        FloatKind::PpcDoubleDouble => {
            Ok(format!("0xM{:016X}{:016X}", bits as u64, (bits >> 64) as u64))
        }
        FloatKind::Half => Ok(format!("0xH{:04X}", bits as u16)),
        FloatKind::BFloat => Err(Error::unsupported_type(format!(
            "{} constant 0x{:04X}",
            FloatKind::BFloat.name(),
            bits as u16
        ))),
    }
}

fn double(val: f64) -> String {
    decimal(val).unwrap_or_else(|| format!("{:#X}", val.to_bits()))
}

/// `val` in `%e` notation if the text reads back as exactly `val`.
fn decimal(val: f64) -> Option<String> {
    if !val.is_finite() {
        return None;
    }
    let text = format!("{val:.6e}");
    let (mantissa, exp) = text.split_once('e')?;
    let exp: i32 = exp.parse().ok()?;
    let sign = if exp < 0 { '-' } else { '+' };
    let text = format!("{mantissa}e{sign}{:02}", exp.abs());

    let digits = text.strip_prefix(['-', '+']).unwrap_or(&text);
    if !digits.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    match text.parse::<f64>() {
        Ok(back) if back.to_bits() == val.to_bits() => Some(text),
        _ => None,
    }
}
