use crate::{BlockIdx, InstIdx, Instruction, Operand, Type, ValueId};
use ir2spd_utils::{GetName, Id};

/// A formal parameter of a function.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Option<Id>,
    pub ty: Type,
}

impl Param {
    pub fn named<S: Into<Id>>(name: S, ty: Type) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }

    pub fn unnamed(ty: Type) -> Self {
        Self { name: None, ty }
    }
}

/// A straight sequence of instructions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicBlock {
    pub name: Option<Id>,
    /// Instructions of this block in program order.
    pub instrs: Vec<InstIdx>,
}

/// The body of a defined function. Owns every instruction; blocks refer to
/// them by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Body {
    /// Blocks in layout order. The first block is the entry.
    pub blocks: Vec<BasicBlock>,
    pub instrs: Vec<Instruction>,
}

impl Body {
    pub fn block(&self, idx: BlockIdx) -> &BasicBlock {
        &self.blocks[idx.index()]
    }

    pub fn instr(&self, idx: InstIdx) -> &Instruction {
        &self.instrs[idx.index()]
    }
}

/// A function of the program. Functions without a body are declarations of
/// external code.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Id,
    pub params: Vec<Param>,
    pub ret: Type,
    pub body: Option<Body>,
}

impl Function {
    /// A function with no body.
    pub fn declaration<S: Into<Id>>(
        name: S,
        params: Vec<Param>,
        ret: Type,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            ret,
            body: None,
        }
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Iterate over all instructions with blocks concatenated in layout
    /// order. Empty for declarations.
    pub fn instructions(
        &self,
    ) -> impl Iterator<Item = (InstIdx, &Instruction)> + '_ {
        self.body.iter().flat_map(|body| {
            body.blocks.iter().flat_map(move |block| {
                block.instrs.iter().map(move |&idx| (idx, body.instr(idx)))
            })
        })
    }

    /// The user-visible name of a value, if it has one.
    pub fn value_name(&self, value: ValueId) -> Option<Id> {
        match value {
            ValueId::Arg(idx) => self.params.get(idx).and_then(|p| p.name),
            ValueId::Inst(idx) => self
                .body
                .as_ref()
                .and_then(|body| body.instrs.get(idx.index()))
                .and_then(|instr| instr.name),
        }
    }

    /// Type of an operand used in this function.
    pub fn type_of(&self, operand: &Operand) -> Type {
        match operand {
            Operand::Const(c) => c.ty(),
            Operand::Value(ValueId::Arg(idx)) => self.params[*idx].ty,
            Operand::Value(ValueId::Inst(idx)) => self
                .body
                .as_ref()
                .map(|body| body.instr(*idx).ty)
                .unwrap_or(Type::Void),
        }
    }
}

impl GetName for Function {
    fn name(&self) -> Id {
        self.name
    }
}
