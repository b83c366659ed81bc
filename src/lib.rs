//! # IR2SPD
//!
//! Translates the functions of a program into SPD hardware module
//! descriptions, callees first, and estimates the latency of every module.
//!
//! This crate plumbs together the translator crates:
//! [`ir2spd_ir`] holds the program model and its call graph, [`ir2spd_opt`]
//! walks the call graph and estimates delays, and [`ir2spd_backend`] emits
//! the modules.
//!
//! ```rust
//! use ir2spd::backend::{Backend, MemorySink, SpdBackend};
//! use ir2spd::ir::{BinOp, Builder, Operand, Param, Program, Type};
//!
//! let mut prog = Program::new();
//! let mut b = Builder::new(&mut prog);
//! let int = Type::Int(32);
//! let main = b.declare("fpga_main", vec![Param::named("x", int)], int)?;
//! let mut fb = b.define(main);
//! let x = fb.param(0);
//! let sum = fb.binary(BinOp::Add, x, Operand::int(32, 1));
//! fb.ret(sum);
//! fb.finish();
//!
//! let mut sink = MemorySink::new();
//! let modules = SpdBackend::default().run(&prog, &mut sink)?;
//! assert_eq!(modules.get("fpga_main".into()), Some(5));
//! assert!(sink.get("fpga_main").unwrap().contains("t_0 = i_x + 1;"));
//! # Ok::<(), ir2spd::utils::Error>(())
//! ```
pub use ir2spd_backend as backend;
pub use ir2spd_ir as ir;
pub use ir2spd_opt as opt;
pub use ir2spd_utils as utils;
