//! Types of values in a [crate::Program].

/// Representation of a floating-point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum FloatKind {
    /// IEEE 754 binary16
    Half,
    /// Brain floating point (8 exponent bits, 7 mantissa bits)
    BFloat,
    /// IEEE 754 binary32
    Single,
    /// IEEE 754 binary64
    Double,
    /// x87 80-bit extended precision
    X86Fp80,
    /// IEEE 754 binary128
    Quad,
    /// PowerPC pair of doubles
    PpcDoubleDouble,
}

impl FloatKind {
    /// Number of bits in the encoding of a value of this kind.
    pub fn bit_width(self) -> u32 {
        match self {
            FloatKind::Half | FloatKind::BFloat => 16,
            FloatKind::Single => 32,
            FloatKind::Double => 64,
            FloatKind::X86Fp80 => 80,
            FloatKind::Quad | FloatKind::PpcDoubleDouble => 128,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FloatKind::Half => "half",
            FloatKind::BFloat => "bfloat",
            FloatKind::Single => "float",
            FloatKind::Double => "double",
            FloatKind::X86Fp80 => "x86_fp80",
            FloatKind::Quad => "fp128",
            FloatKind::PpcDoubleDouble => "ppc_fp128",
        }
    }
}

/// Type of a value, parameter or function return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum Type {
    Void,
    /// Integer with the given bit width.
    Int(u32),
    Float(FloatKind),
    Ptr,
}

impl Type {
    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::Int(width) => write!(f, "i{width}"),
            Type::Float(kind) => write!(f, "{}", kind.name()),
            Type::Ptr => write!(f, "ptr"),
        }
    }
}
