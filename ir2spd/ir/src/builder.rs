//! IR Builder. Provides convience methods to construct the functions of a
//! [Program].
use crate::{
    BasicBlock, BinOp, BlockIdx, Body, FuncIdx, Function, InstIdx, InstKind,
    Instruction, Operand, Param, Program, Type, ValueId,
};
use ir2spd_utils::{Id, SpdResult};

/// Program builder.
pub struct Builder<'a> {
    program: &'a mut Program,
}

impl<'a> Builder<'a> {
    pub fn new(program: &'a mut Program) -> Self {
        Self { program }
    }

    /// Declare a function without a body. Bodies are added with
    /// [Builder::define] so that calls can refer to functions defined later.
    pub fn declare<S: Into<Id>>(
        &mut self,
        name: S,
        params: Vec<Param>,
        ret: Type,
    ) -> SpdResult<FuncIdx> {
        self.program
            .add_function(Function::declaration(name, params, ret))
    }

    /// Start defining the body of `func`. The body starts with one block
    /// named `entry`; it is installed when [FunctionBuilder::finish] is
    /// called.
    pub fn define(&mut self, func: FuncIdx) -> FunctionBuilder<'_> {
        let body = Body {
            blocks: vec![BasicBlock {
                name: Some(Id::from("entry")),
                instrs: vec![],
            }],
            instrs: vec![],
        };
        FunctionBuilder {
            program: &mut *self.program,
            func,
            body,
            current: BlockIdx::new(0),
        }
    }
}

/// Appends instructions to the current block of one function body.
pub struct FunctionBuilder<'a> {
    program: &'a mut Program,
    func: FuncIdx,
    body: Body,
    current: BlockIdx,
}

impl FunctionBuilder<'_> {
    /// The formal parameter at position `idx`.
    ///
    /// # Panics
    /// Panics if the function has no such parameter.
    pub fn param(&self, idx: usize) -> Operand {
        let params = &self.program.get(self.func).params;
        assert!(
            idx < params.len(),
            "function `{}' has no parameter {idx}",
            self.program.get(self.func).name
        );
        Operand::Value(ValueId::Arg(idx))
    }

    /// Append a new block and make it the current one.
    pub fn add_block<S: Into<Id>>(&mut self, name: S) -> BlockIdx {
        let idx = BlockIdx::new(self.body.blocks.len());
        self.body.blocks.push(BasicBlock {
            name: Some(name.into()),
            instrs: vec![],
        });
        self.current = idx;
        idx
    }

    pub fn switch_to(&mut self, block: BlockIdx) {
        self.current = block;
    }

    /// Append an instruction to the current block and return its result.
    pub fn push(
        &mut self,
        name: Option<Id>,
        ty: Type,
        kind: InstKind,
    ) -> Operand {
        let idx = InstIdx::new(self.body.instrs.len());
        self.body.instrs.push(Instruction { name, ty, kind });
        self.body.blocks[self.current.index()].instrs.push(idx);
        Operand::Value(ValueId::Inst(idx))
    }

    pub fn binary(&mut self, op: BinOp, lhs: Operand, rhs: Operand) -> Operand {
        let ty = self.type_of(&lhs);
        self.push(None, ty, InstKind::Binary { op, lhs, rhs })
    }

    pub fn named_binary<S: Into<Id>>(
        &mut self,
        name: S,
        op: BinOp,
        lhs: Operand,
        rhs: Operand,
    ) -> Operand {
        let ty = self.type_of(&lhs);
        self.push(Some(name.into()), ty, InstKind::Binary { op, lhs, rhs })
    }

    pub fn call<I>(&mut self, callee: FuncIdx, args: I) -> Operand
    where
        I: IntoIterator<Item = Operand>,
    {
        self.call_inner(None, callee, args)
    }

    pub fn named_call<S, I>(
        &mut self,
        name: S,
        callee: FuncIdx,
        args: I,
    ) -> Operand
    where
        S: Into<Id>,
        I: IntoIterator<Item = Operand>,
    {
        self.call_inner(Some(name.into()), callee, args)
    }

    fn call_inner<I>(
        &mut self,
        name: Option<Id>,
        callee: FuncIdx,
        args: I,
    ) -> Operand
    where
        I: IntoIterator<Item = Operand>,
    {
        let ty = self.program.get(callee).ret;
        let args = args.into_iter().collect();
        self.push(name, ty, InstKind::Call { callee, args })
    }

    pub fn ret(&mut self, value: Operand) {
        self.push(None, Type::Void, InstKind::Ret(Some(value)));
    }

    pub fn ret_void(&mut self) {
        self.push(None, Type::Void, InstKind::Ret(None));
    }

    pub fn br(&mut self, dest: BlockIdx) {
        self.push(None, Type::Void, InstKind::Br(dest));
    }

    pub fn cond_br(
        &mut self,
        cond: Operand,
        then_dest: BlockIdx,
        else_dest: BlockIdx,
    ) {
        self.push(
            None,
            Type::Void,
            InstKind::CondBr {
                cond,
                then_dest,
                else_dest,
            },
        );
    }

    pub fn icmp(&mut self, lhs: Operand, rhs: Operand) -> Operand {
        self.push(None, Type::Int(1), InstKind::ICmp { lhs, rhs })
    }

    pub fn phi(
        &mut self,
        ty: Type,
        incoming: Vec<(Operand, BlockIdx)>,
    ) -> Operand {
        self.push(None, ty, InstKind::Phi(incoming))
    }

    pub fn alloca(&mut self, ty: Type) -> Operand {
        self.push(None, Type::Ptr, InstKind::Alloca(ty))
    }

    pub fn load(&mut self, ty: Type, ptr: Operand) -> Operand {
        self.push(None, ty, InstKind::Load(ptr))
    }

    pub fn store(&mut self, value: Operand, ptr: Operand) {
        self.push(None, Type::Void, InstKind::Store { value, ptr });
    }

    fn type_of(&self, operand: &Operand) -> Type {
        match operand {
            Operand::Value(ValueId::Inst(idx)) => self.body.instr(*idx).ty,
            _ => self.program.get(self.func).type_of(operand),
        }
    }

    /// Install the body into the function, replacing any previous body.
    pub fn finish(self) -> FuncIdx {
        self.program.get_mut(self.func).body = Some(self.body);
        self.func
    }
}
