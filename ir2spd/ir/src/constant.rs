//! Integer and floating-point constants.
use crate::{FloatKind, Type};

/// Widest integer constant that can be represented.
pub const MAX_INT_WIDTH: u32 = 128;

fn mask(width: u32) -> u128 {
    if width >= 128 {
        u128::MAX
    } else {
        (1u128 << width) - 1
    }
}

/// An integer constant: a bit pattern of a fixed width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct IntConst {
    width: u32,
    bits: u128,
}

impl IntConst {
    /// Construct a constant from a signed value truncated to `width` bits.
    pub fn new(width: u32, value: i128) -> Self {
        Self::from_bits(width, value as u128)
    }

    /// Construct a constant from a raw bit pattern.
    ///
    /// # Panics
    /// Panics if `width` is zero or wider than [MAX_INT_WIDTH].
    pub fn from_bits(width: u32, bits: u128) -> Self {
        assert!(
            (1..=MAX_INT_WIDTH).contains(&width),
            "integer constants must be 1 to {MAX_INT_WIDTH} bits wide, \
             got {width}"
        );
        Self {
            width,
            bits: bits & mask(width),
        }
    }

    pub fn bool(value: bool) -> Self {
        Self::from_bits(1, value as u128)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn bits(&self) -> u128 {
        self.bits
    }

    /// The value of the bit pattern interpreted as two's complement.
    pub fn as_signed(&self) -> i128 {
        let shift = 128 - self.width;
        ((self.bits << shift) as i128) >> shift
    }
}

/// A floating-point constant, stored as the bit pattern of its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct FloatConst {
    kind: FloatKind,
    bits: u128,
}

impl FloatConst {
    pub fn from_bits(kind: FloatKind, bits: u128) -> Self {
        Self {
            kind,
            bits: bits & mask(kind.bit_width()),
        }
    }

    pub fn double(value: f64) -> Self {
        Self::from_bits(FloatKind::Double, value.to_bits() as u128)
    }

    pub fn single(value: f32) -> Self {
        Self::from_bits(FloatKind::Single, value.to_bits() as u128)
    }

    pub fn kind(&self) -> FloatKind {
        self.kind
    }

    pub fn bits(&self) -> u128 {
        self.bits
    }

    /// The value as a double if this is an IEEE single or double constant.
    /// Single values are widened exactly.
    pub fn to_f64(&self) -> Option<f64> {
        match self.kind {
            FloatKind::Single => Some(f32::from_bits(self.bits as u32) as f64),
            FloatKind::Double => Some(f64::from_bits(self.bits as u64)),
            _ => None,
        }
    }
}

/// A constant operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum Constant {
    Int(IntConst),
    Float(FloatConst),
}

impl Constant {
    pub fn ty(&self) -> Type {
        match self {
            Constant::Int(c) => Type::Int(c.width()),
            Constant::Float(c) => Type::Float(c.kind()),
        }
    }
}

impl From<IntConst> for Constant {
    fn from(c: IntConst) -> Self {
        Constant::Int(c)
    }
}

impl From<FloatConst> for Constant {
    fn from(c: FloatConst) -> Self {
        Constant::Float(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_constants_are_truncated_and_sign_extended() {
        let c = IntConst::new(8, 255);
        assert_eq!(c.bits(), 0xFF);
        assert_eq!(c.as_signed(), -1);
        assert_eq!(IntConst::new(32, -7).as_signed(), -7);
        assert_eq!(IntConst::new(128, i128::MIN).as_signed(), i128::MIN);
        assert_eq!(IntConst::bool(true).as_signed(), -1);
    }

    #[test]
    fn signed_zeros_are_distinct() {
        assert_ne!(FloatConst::double(0.0), FloatConst::double(-0.0));
        assert_eq!(FloatConst::double(1.5), FloatConst::double(1.5));
    }

    #[test]
    fn singles_widen_exactly() {
        let c = FloatConst::single(0.1);
        assert_eq!(c.to_f64(), Some(0.1f32 as f64));
        let half = FloatConst::from_bits(FloatKind::Half, 0x3C00);
        assert_eq!(half.to_f64(), None);
    }
}
