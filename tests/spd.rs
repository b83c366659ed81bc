use ir2spd::backend::{
    Backend, BackendConf, ConstantMode, MemorySink, ModuleDescription,
    ModuleSink, SpdBackend, WriterSink,
};
use ir2spd::ir::{
    BinOp, Builder, CallGraph, FloatKind, Id, Operand, Param, Program, Type,
};
use ir2spd::opt::{EntryPolicy, ModuleMap};
use ir2spd::utils::{Error, ErrorKind, SpdResult};
use itertools::Itertools;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn backend(entry: &str, constants: ConstantMode) -> SpdBackend {
    SpdBackend::new(BackendConf {
        constants,
        entry: EntryPolicy::Named(vec![entry.into()]),
        ..Default::default()
    })
}

/// `f(x: i32) -> i32 { return x + 1; }` and `g(y: i32) -> i32 { return f(y); }`
fn increment() -> Program {
    let mut prog = Program::new();
    let mut b = Builder::new(&mut prog);
    let int = Type::Int(32);
    let f = b.declare("f", vec![Param::named("x", int)], int).unwrap();
    let g = b.declare("g", vec![Param::named("y", int)], int).unwrap();

    let mut fb = b.define(f);
    let x = fb.param(0);
    let sum = fb.binary(BinOp::Add, x, Operand::int(32, 1));
    fb.ret(sum);
    fb.finish();

    let mut fb = b.define(g);
    let y = fb.param(0);
    let r = fb.call(f, [y]);
    fb.ret(r);
    fb.finish();
    prog
}

/// `fpga_main -> a`, `a -> b`, `b -> a`
fn mutual_recursion() -> Program {
    let mut prog = Program::new();
    let mut b = Builder::new(&mut prog);
    let int = Type::Int(32);
    let fa = b.declare("a", vec![Param::named("n", int)], int).unwrap();
    let fb_ = b.declare("b", vec![Param::named("n", int)], int).unwrap();
    let main = b.declare("fpga_main", vec![], int).unwrap();

    for (caller, callee) in [(fa, fb_), (fb_, fa)] {
        let mut fb = b.define(caller);
        let n = fb.param(0);
        let m = fb.binary(BinOp::Sub, n, Operand::int(32, 1));
        let r = fb.call(callee, [m]);
        fb.ret(r);
        fb.finish();
    }

    let mut fb = b.define(main);
    let r = fb.call(fa, [Operand::int(32, 10)]);
    fb.ret(r);
    fb.finish();
    prog
}

#[test]
fn increment_module() {
    init_logger();
    let prog = increment();
    let mut sink = MemorySink::new();
    let modules = backend("f", ConstantMode::Inline)
        .run(&prog, &mut sink)
        .unwrap();
    assert_eq!(modules.get("f".into()), Some(5));
    insta::assert_snapshot!(sink.get("f").unwrap(), @r###"
    // Module f
    Name      f;
    Main_In   {Mi::i_x, sop, eop};
    Main_Out  {Mo::o_ret, sop, eop};

    // equation
    EQU       equ0, t_0 = i_x + 1;
    EQU       equ1, o_ret = t_0;

    // direct connection
    DRCT      (Mo::sop, Mo::eop) = (Mi::sop, Mi::eop);
    "###);
}

#[test]
fn callers_follow_callees() {
    init_logger();
    let prog = increment();
    let mut sink = WriterSink::new(Vec::new());
    let modules = backend("g", ConstantMode::Inline)
        .run(&prog, &mut sink)
        .unwrap();
    assert_eq!(modules.get("f".into()), Some(5));
    assert_eq!(modules.get("g".into()), Some(15));
    assert_eq!(
        modules.iter().map(|(name, _)| name.to_string()).collect_vec(),
        ["f", "g"]
    );
    let text = String::from_utf8(sink.into_inner()).unwrap();
    insta::assert_snapshot!(text, @r###"
    // Module f
    Name      f;
    Main_In   {Mi::i_x, sop, eop};
    Main_Out  {Mo::o_ret, sop, eop};

    // equation
    EQU       equ0, t_0 = i_x + 1;
    EQU       equ1, o_ret = t_0;

    // direct connection
    DRCT      (Mo::sop, Mo::eop) = (Mi::sop, Mi::eop);

    // Module g
    Name      g;
    Main_In   {Mi::i_y, sop, eop};
    Main_Out  {Mo::o_ret, sop, eop};

    // equation
    EQU       equ0, t_0 = f(i_y);
    EQU       equ1, o_ret = t_0;

    // direct connection
    DRCT      (Mo::sop, Mo::eop) = (Mi::sop, Mi::eop);
    "###);
}

#[test]
fn hoisted_float_constants() {
    init_logger();
    let mut prog = Program::new();
    let mut b = Builder::new(&mut prog);
    let dbl = Type::Float(FloatKind::Double);
    let g = b.declare("g", vec![Param::named("x", dbl)], dbl).unwrap();
    let main = b
        .declare(
            "fpga_main",
            vec![Param::named("a", dbl), Param::unnamed(dbl)],
            dbl,
        )
        .unwrap();

    let mut fb = b.define(g);
    let x = fb.param(0);
    let y = fb.binary(BinOp::FSub, x, Operand::double(1.0 / 3.0));
    fb.ret(y);
    fb.finish();

    let mut fb = b.define(main);
    let (a, c) = (fb.param(0), fb.param(1));
    let s = fb.named_binary("scaled", BinOp::FMul, a, Operand::double(2.0));
    let t = fb.binary(BinOp::FAdd, s, c);
    let r = fb.call(g, [t]);
    let u = fb.binary(BinOp::FMul, r, Operand::double(2.0));
    fb.ret(u);
    fb.finish();

    let mut sink = WriterSink::new(Vec::new());
    let modules = backend("fpga_main", ConstantMode::Hoist)
        .run(&prog, &mut sink)
        .unwrap();
    assert_eq!(modules.get("fpga_main".into()), Some(15));
    let text = String::from_utf8(sink.into_inner()).unwrap();
    insta::assert_snapshot!(text, @r###"
    // Module g
    Name      g;
    Main_In   {Mi::i_x, sop, eop};
    Main_Out  {Mo::o_ret, sop, eop};

    // parameter
    Param     c_f0 = 0x3FD5555555555555;

    // equation
    EQU       equ0, t_0 = i_x - c_f0;
    EQU       equ1, o_ret = t_0;

    // direct connection
    DRCT      (Mo::sop, Mo::eop) = (Mi::sop, Mi::eop);

    // Module fpga_main
    Name      fpga_main;
    Main_In   {Mi::i_a, i_0, sop, eop};
    Main_Out  {Mo::o_ret, sop, eop};

    // parameter
    Param     c_f0 = 2.000000e+00;

    // equation
    EQU       equ0, t_scaled = i_a * c_f0;
    EQU       equ1, t_1 = t_scaled + i_0;
    EQU       equ2, t_2 = g(t_1);
    EQU       equ3, t_3 = t_2 * c_f0;
    EQU       equ4, o_ret = t_3;

    // direct connection
    DRCT      (Mo::sop, Mo::eop) = (Mi::sop, Mi::eop);
    "###);
}

#[test]
fn mutual_recursion_terminates() {
    init_logger();
    let prog = mutual_recursion();
    let mut sink = MemorySink::new();
    let modules = SpdBackend::default().run(&prog, &mut sink).unwrap();
    assert_eq!(
        modules.iter().collect_vec(),
        [
            (Id::from("b"), 10),
            (Id::from("a"), 20),
            (Id::from("fpga_main"), 30)
        ]
    );
    assert_eq!(sink.len(), 3);
    insta::assert_snapshot!(sink.get("a").unwrap(), @r###"
    // Module a
    Name      a;
    Main_In   {Mi::i_n, sop, eop};
    Main_Out  {Mo::o_ret, sop, eop};

    // equation
    EQU       equ0, t_0 = i_n - 1;
    EQU       equ1, t_1 = b(t_0);
    EQU       equ2, o_ret = t_1;

    // direct connection
    DRCT      (Mo::sop, Mo::eop) = (Mi::sop, Mi::eop);
    "###);
}

#[test]
fn processing_twice_is_idempotent() {
    init_logger();
    let prog = mutual_recursion();
    let backend = SpdBackend::default();
    let (mut first, mut second) = (MemorySink::new(), MemorySink::new());
    let m1 = backend.run(&prog, &mut first).unwrap();
    let m2 = backend.run(&prog, &mut second).unwrap();
    assert_eq!(m1, m2);
    assert_eq!(first.iter().collect_vec(), second.iter().collect_vec());

    // Processing an entry that is already recorded writes nothing.
    let graph = CallGraph::new(&prog).unwrap();
    let main = prog.find("fpga_main").unwrap();
    let mut modules = m1.clone();
    let mut third = MemorySink::new();
    backend
        .process(&prog, &graph, main, &mut modules, &mut third)
        .unwrap();
    assert!(third.is_empty());
    assert_eq!(modules, m1);
}

/// Accepts modules until it sees `fail_at`.
struct FailingSink {
    fail_at: &'static str,
    written: Vec<String>,
}

impl ModuleSink for FailingSink {
    fn write_module(&mut self, module: &ModuleDescription) -> SpdResult<()> {
        if module.name == self.fail_at {
            return Err(Error::write_error("device unavailable"));
        }
        self.written.push(module.name.to_string());
        Ok(())
    }
}

#[test]
fn sink_failure_stops_the_walk() {
    init_logger();
    let prog = mutual_recursion();
    let graph = CallGraph::new(&prog).unwrap();
    let mut sink = FailingSink {
        fail_at: "a",
        written: vec![],
    };
    let mut modules = ModuleMap::new();
    let err = SpdBackend::default()
        .process(
            &prog,
            &graph,
            prog.find("fpga_main").unwrap(),
            &mut modules,
            &mut sink,
        )
        .unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::WriteError("device unavailable".into())
    );
    assert_eq!(err.function(), Some("a".into()));
    assert_eq!(sink.written, ["b"]);
    assert!(modules.contains("b".into()));
    assert!(!modules.contains("a".into()));
    assert!(!modules.contains("fpga_main".into()));
}

#[test]
fn unsupported_opcode_names_the_function() {
    init_logger();
    let mut prog = Program::new();
    let mut b = Builder::new(&mut prog);
    let int = Type::Int(32);
    let leaf = b.declare("leaf", vec![Param::named("x", int)], int).unwrap();
    let main = b.declare("fpga_main", vec![], int).unwrap();
    let mut fb = b.define(leaf);
    let x = fb.param(0);
    let r = fb.binary(BinOp::Shl, x, Operand::int(32, 2));
    fb.ret(r);
    fb.finish();
    let mut fb = b.define(main);
    let r = fb.call(leaf, [Operand::int(32, 1)]);
    fb.ret(r);
    fb.finish();

    let mut sink = MemorySink::new();
    let err = SpdBackend::default().run(&prog, &mut sink).unwrap_err();
    assert_eq!(err.to_string(), "[leaf] Unsupported opcode: shl");
    assert!(sink.is_empty());
}

#[test]
fn call_graph_dump() {
    let prog = mutual_recursion();
    let graph = CallGraph::new(&prog).unwrap();
    let mut out = Vec::new();
    graph
        .write_calls(&prog, prog.find("fpga_main").unwrap(), &mut out)
        .unwrap();
    insta::assert_snapshot!(String::from_utf8(out).unwrap(), @r###"
    fpga_main calls function: a
    a calls function: b
    b calls function: a
    "###);
}

#[test]
fn clashing_value_names_stay_distinct() {
    let mut prog = Program::new();
    let mut b = Builder::new(&mut prog);
    let int = Type::Int(32);
    let params = vec![Param::unnamed(int), Param::named("0", int)];
    let main = b.declare("fpga_main", params, int).unwrap();
    let mut fb = b.define(main);
    let (p0, p1) = (fb.param(0), fb.param(1));
    let a = fb.named_binary("tmp", BinOp::Sub, p0, p1);
    let c = fb.named_binary("tmp", BinOp::Mul, a, p1);
    fb.ret(c);
    fb.finish();

    let mut sink = MemorySink::new();
    SpdBackend::default().run(&prog, &mut sink).unwrap();
    insta::assert_snapshot!(sink.get("fpga_main").unwrap(), @r###"
    // Module fpga_main
    Name      fpga_main;
    Main_In   {Mi::i_0, i_1, sop, eop};
    Main_Out  {Mo::o_ret, sop, eop};

    // equation
    EQU       equ0, t_tmp = i_0 - i_1;
    EQU       equ1, t_2 = t_tmp * i_1;
    EQU       equ2, o_ret = t_2;

    // direct connection
    DRCT      (Mo::sop, Mo::eop) = (Mi::sop, Mi::eop);
    "###);
}
