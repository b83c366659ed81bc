//! In-memory representation of the programs translated to SPD.
//!
//! A [Program] is a list of [Function]s. Defined functions own a [Body]: an
//! ordered list of [BasicBlock]s whose [Instruction]s refer to values by
//! identity ([ValueId]) rather than by content. The [CallGraph] of a program
//! records which functions call which.
//!
//! ```rust
//! use ir2spd_ir::{BinOp, Builder, Operand, Param, Program, Type};
//! let mut prog = Program::new();
//! let mut b = Builder::new(&mut prog);
//! let int = Type::Int(32);
//! let f = b.declare("f", vec![Param::named("x", int)], int)?;
//! let mut fb = b.define(f);
//! let x = fb.param(0);
//! let sum = fb.binary(BinOp::Add, x, Operand::int(32, 1));
//! fb.ret(sum);
//! fb.finish();
//! # Ok::<(), ir2spd_utils::Error>(())
//! ```
mod builder;
mod call_graph;
mod constant;
mod function;
mod instruction;
mod program;
mod types;

pub use builder::{Builder, FunctionBuilder};
pub use call_graph::{CallEdge, CallGraph, CallNode};
pub use constant::{Constant, FloatConst, IntConst, MAX_INT_WIDTH};
pub use function::{BasicBlock, Body, Function, Param};
pub use instruction::{
    BinOp, BlockIdx, InstIdx, InstKind, Instruction, Operand, ValueId,
};
pub use program::{FuncIdx, Program};
pub use types::{FloatKind, Type};

// Re-export types from the utils crate
pub use ir2spd_utils::{GetName, Id};
