use crate::{Constant, FloatConst, FloatKind, FuncIdx, IntConst, Type};
use ir2spd_utils::Id;
use smallvec::{SmallVec, smallvec};

/// Index of an instruction inside its function body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstIdx(u32);

impl InstIdx {
    pub fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a basic block inside its function body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockIdx(u32);

impl BlockIdx {
    pub fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identity of a non-constant value in a function. Two operands refer to the
/// same value iff their [ValueId]s are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueId {
    /// The formal parameter at this position.
    Arg(usize),
    /// The result of an instruction.
    Inst(InstIdx),
}

/// An instruction operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    Value(ValueId),
    Const(Constant),
}

impl Operand {
    pub fn int(width: u32, value: i128) -> Self {
        Operand::Const(Constant::Int(IntConst::new(width, value)))
    }

    pub fn bool(value: bool) -> Self {
        Operand::Const(Constant::Int(IntConst::bool(value)))
    }

    pub fn double(value: f64) -> Self {
        Operand::Const(Constant::Float(FloatConst::double(value)))
    }

    pub fn single(value: f32) -> Self {
        Operand::Const(Constant::Float(FloatConst::single(value)))
    }

    pub fn float_bits(kind: FloatKind, bits: u128) -> Self {
        Operand::Const(Constant::Float(FloatConst::from_bits(kind, bits)))
    }

    pub fn as_const(&self) -> Option<&Constant> {
        match self {
            Operand::Const(c) => Some(c),
            Operand::Value(_) => None,
        }
    }
}

/// Two-operand opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum BinOp {
    Add,
    FAdd,
    Sub,
    FSub,
    Mul,
    FMul,
    UDiv,
    SDiv,
    FDiv,
    URem,
    SRem,
    FRem,
    Shl,
    LShr,
    AShr,
    And,
    Or,
    Xor,
}

impl BinOp {
    pub fn name(self) -> &'static str {
        match self {
            BinOp::Add => "add",
            BinOp::FAdd => "fadd",
            BinOp::Sub => "sub",
            BinOp::FSub => "fsub",
            BinOp::Mul => "mul",
            BinOp::FMul => "fmul",
            BinOp::UDiv => "udiv",
            BinOp::SDiv => "sdiv",
            BinOp::FDiv => "fdiv",
            BinOp::URem => "urem",
            BinOp::SRem => "srem",
            BinOp::FRem => "frem",
            BinOp::Shl => "shl",
            BinOp::LShr => "lshr",
            BinOp::AShr => "ashr",
            BinOp::And => "and",
            BinOp::Or => "or",
            BinOp::Xor => "xor",
        }
    }
}

impl std::fmt::Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The operation performed by an [Instruction].
#[derive(Debug, Clone, PartialEq)]
pub enum InstKind {
    Binary {
        op: BinOp,
        lhs: Operand,
        rhs: Operand,
    },
    /// Direct call of a function in the same program.
    Call {
        callee: FuncIdx,
        args: SmallVec<[Operand; 4]>,
    },
    /// Return from the function, optionally with a value.
    Ret(Option<Operand>),
    Br(BlockIdx),
    CondBr {
        cond: Operand,
        then_dest: BlockIdx,
        else_dest: BlockIdx,
    },
    ICmp {
        lhs: Operand,
        rhs: Operand,
    },
    FCmp {
        lhs: Operand,
        rhs: Operand,
    },
    Phi(Vec<(Operand, BlockIdx)>),
    Alloca(Type),
    Load(Operand),
    Store {
        value: Operand,
        ptr: Operand,
    },
}

impl InstKind {
    /// Textual opcode of the instruction.
    pub fn opcode_name(&self) -> &'static str {
        match self {
            InstKind::Binary { op, .. } => op.name(),
            InstKind::Call { .. } => "call",
            InstKind::Ret(_) => "ret",
            InstKind::Br(_) | InstKind::CondBr { .. } => "br",
            InstKind::ICmp { .. } => "icmp",
            InstKind::FCmp { .. } => "fcmp",
            InstKind::Phi(_) => "phi",
            InstKind::Alloca(_) => "alloca",
            InstKind::Load(_) => "load",
            InstKind::Store { .. } => "store",
        }
    }

    /// Operands in the order they are written.
    pub fn operands(&self) -> SmallVec<[&Operand; 4]> {
        match self {
            InstKind::Binary { lhs, rhs, .. }
            | InstKind::ICmp { lhs, rhs }
            | InstKind::FCmp { lhs, rhs } => smallvec![lhs, rhs],
            InstKind::Call { args, .. } => args.iter().collect(),
            InstKind::Ret(val) => val.iter().collect(),
            InstKind::Br(_) | InstKind::Alloca(_) => SmallVec::new(),
            InstKind::CondBr { cond, .. } => smallvec![cond],
            InstKind::Phi(incoming) => {
                incoming.iter().map(|(v, _)| v).collect()
            }
            InstKind::Load(ptr) => smallvec![ptr],
            InstKind::Store { value, ptr } => smallvec![value, ptr],
        }
    }
}

/// A single instruction. Instructions that produce a value are referred to
/// by [ValueId::Inst].
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// User-visible name of the result, if any.
    pub name: Option<Id>,
    /// Type of the result. [Type::Void] if the instruction produces nothing.
    pub ty: Type,
    pub kind: InstKind,
}
