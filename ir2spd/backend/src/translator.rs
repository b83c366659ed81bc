use crate::conf::ConstantMode;
use crate::constant::format_constant;
use crate::namer::ValueNamer;
use crate::pool::ConstantPool;
use ir2spd_ir::{
    BinOp, Function, InstIdx, InstKind, Instruction, Operand, Program, ValueId,
};
use ir2spd_utils::{Error, SpdResult};
use itertools::Itertools;

/// Output port carrying the return value.
pub const RETURN_PORT: &str = "o_ret";

/// Keyword and padding that start every equation line.
const EQU: &str = "EQU       ";

/// The infix operator of an arithmetic opcode.
pub fn operator(op: BinOp) -> SpdResult<&'static str> {
    match op {
        BinOp::Add | BinOp::FAdd => Ok("+"),
        BinOp::Sub | BinOp::FSub => Ok("-"),
        BinOp::Mul | BinOp::FMul => Ok("*"),
        BinOp::UDiv | BinOp::SDiv | BinOp::FDiv => Ok("/"),
        _ => Err(Error::unsupported_opcode(op)),
    }
}

/// Translates the instructions of one function into equation lines.
///
/// Every translated instruction produces one `EQU equN, ...;` line, numbered
/// from zero in layout order. Value names come from a [ValueNamer] owned by
/// the translator, so a translator must not be reused across functions.
pub struct Translator<'a> {
    program: &'a Program,
    func: &'a Function,
    namer: ValueNamer,
    /// Present when constants are hoisted into parameters.
    pool: Option<ConstantPool>,
    equations: u32,
}

impl<'a> Translator<'a> {
    pub fn new(
        program: &'a Program,
        func: &'a Function,
        mode: ConstantMode,
    ) -> Self {
        let pool = match mode {
            ConstantMode::Inline => None,
            ConstantMode::Hoist => Some(ConstantPool::scan(func)),
        };
        let mut namer = ValueNamer::new();
        // Parameters get the lowest aliases.
        for idx in 0..func.params.len() {
            namer.name(func, ValueId::Arg(idx));
        }
        Self {
            program,
            func,
            namer,
            pool,
            equations: 0,
        }
    }

    /// Constants hoisted into parameters, if any.
    pub fn pool(&self) -> Option<&ConstantPool> {
        self.pool.as_ref()
    }

    /// Name of the input port of the parameter at `idx`.
    pub fn param_port(&mut self, idx: usize) -> String {
        self.namer.name(self.func, ValueId::Arg(idx))
    }

    /// Textual form of an operand: a value name or a constant.
    pub fn operand(&mut self, op: &Operand) -> SpdResult<String> {
        match op {
            Operand::Value(v) => Ok(self.namer.name(self.func, *v)),
            Operand::Const(c) => match &self.pool {
                None => format_constant(c),
                Some(pool) => pool.param_name(c).ok_or_else(|| {
                    Error::misc(format!("constant {c:?} was not hoisted"))
                }),
            },
        }
    }

    /// Translate every instruction of the function in layout order.
    pub fn translate(&mut self) -> SpdResult<Vec<String>> {
        let func = self.func;
        let mut equations = Vec::new();
        for (idx, instr) in func.instructions() {
            equations.extend(self.translate_instr(idx, instr)?);
        }
        Ok(equations)
    }

    /// Translate a single instruction into an equation line. A return
    /// without a value has no equation.
    pub fn translate_instr(
        &mut self,
        idx: InstIdx,
        instr: &Instruction,
    ) -> SpdResult<Option<String>> {
        let rhs = match &instr.kind {
            InstKind::Binary { op, lhs, rhs } => {
                let op = operator(*op)?;
                let dest = self.namer.name(self.func, ValueId::Inst(idx));
                let lhs = self.operand(lhs)?;
                let rhs = self.operand(rhs)?;
                format!("{dest} = {lhs} {op} {rhs}")
            }
            InstKind::Call { callee, args } => {
                let dest = self.namer.name(self.func, ValueId::Inst(idx));
                let args = args
                    .iter()
                    .map(|a| self.operand(a))
                    .collect::<SpdResult<Vec<_>>>()?;
                format!(
                    "{dest} = {}({})",
                    self.program.get(*callee).name,
                    args.iter().join(", ")
                )
            }
            InstKind::Ret(Some(val)) => {
                format!("{RETURN_PORT} = {}", self.operand(val)?)
            }
            InstKind::Ret(None) => return Ok(None),
            kind => {
                let opcode = kind.opcode_name();
                return Err(Error::unsupported_instruction(opcode));
            }
        };
        let line = format!("{EQU}equ{}, {rhs};", self.equations);
        self.equations += 1;
        Ok(Some(line))
    }
}
