use crate::ModuleMap;
use crate::analysis::{DelayEstimator, DelayModel};
use ir2spd_ir::{CallGraph, FuncIdx, Function, Program};
use ir2spd_utils::SpdResult;
use std::collections::HashSet;

/// Post-order traversal of the call graph.
///
/// Starting from an entry function, every callee with a body is processed
/// before its caller. Processing a function means estimating its delay,
/// handing the function and its delay to a visitor (which emits the module),
/// and recording the delay in the [ModuleMap].
///
/// ## Cycles
/// A function is never entered twice: functions recorded in the
/// [ModuleMap] are finished, and functions on the current walk stack are in
/// progress. In a group of mutually recursive functions, the member reached
/// last is processed first, while its callers in the group are still in
/// progress; those callers count as a call overhead only.
///
/// ## Example
/// ```rust
/// # use ir2spd_ir::{Builder, CallGraph, Program, Type};
/// # use ir2spd_opt::analysis::DelayModel;
/// # use ir2spd_opt::{ModuleMap, traversal::CallGraphWalker};
/// # let mut prog = Program::new();
/// # let mut b = Builder::new(&mut prog);
/// # let main = b.declare("fpga_main", vec![], Type::Void)?;
/// # let mut fb = b.define(main);
/// # fb.ret_void();
/// # fb.finish();
/// let cg = CallGraph::new(&prog)?;
/// let mut modules = ModuleMap::new();
/// let mut walker = CallGraphWalker::new(&prog, &cg, DelayModel::default());
/// walker.process(main, &mut modules, |func, delay| {
///     println!("{}: {delay}", func.name);
///     Ok(())
/// })?;
/// assert_eq!(modules.get("fpga_main".into()), Some(5));
/// # Ok::<(), ir2spd_utils::Error>(())
/// ```
pub struct CallGraphWalker<'a> {
    program: &'a Program,
    graph: &'a CallGraph,
    estimator: DelayEstimator<'a>,
    /// Functions on the current walk stack.
    in_progress: HashSet<FuncIdx>,
}

impl<'a> CallGraphWalker<'a> {
    pub fn new(
        program: &'a Program,
        graph: &'a CallGraph,
        model: DelayModel,
    ) -> Self {
        Self {
            program,
            graph,
            estimator: DelayEstimator::new(program, graph, model),
            in_progress: HashSet::new(),
        }
    }

    /// Process `entry` and every function it transitively calls. Does
    /// nothing if `entry` is already recorded in `modules`.
    ///
    /// The first error, from the visitor or otherwise, stops the walk. The
    /// function being visited when the error happened is not recorded.
    pub fn process<F>(
        &mut self,
        entry: FuncIdx,
        modules: &mut ModuleMap,
        mut visit: F,
    ) -> SpdResult<()>
    where
        F: FnMut(&Function, u64) -> SpdResult<()>,
    {
        if !self.graph.is_resolved(entry) {
            log::warn!(
                "Skipping entry `{}': function has no body",
                self.program.get(entry).name
            );
            return Ok(());
        }
        self.process_rec(entry, modules, &mut visit)
    }

    /// Process every function in `entries`, in order.
    pub fn process_all<I, F>(
        &mut self,
        entries: I,
        modules: &mut ModuleMap,
        mut visit: F,
    ) -> SpdResult<()>
    where
        I: IntoIterator<Item = FuncIdx>,
        F: FnMut(&Function, u64) -> SpdResult<()>,
    {
        for entry in entries {
            self.process(entry, modules, &mut visit)?;
        }
        Ok(())
    }

    fn process_rec<F>(
        &mut self,
        func: FuncIdx,
        modules: &mut ModuleMap,
        visit: &mut F,
    ) -> SpdResult<()>
    where
        F: FnMut(&Function, u64) -> SpdResult<()>,
    {
        let name = self.program.get(func).name;
        if modules.contains(name) || !self.in_progress.insert(func) {
            return Ok(());
        }
        let res = self.visit_node(func, modules, visit);
        self.in_progress.remove(&func);
        res
    }

    fn visit_node<F>(
        &mut self,
        func: FuncIdx,
        modules: &mut ModuleMap,
        visit: &mut F,
    ) -> SpdResult<()>
    where
        F: FnMut(&Function, u64) -> SpdResult<()>,
    {
        for callee in self.graph.resolved_callees(func) {
            self.process_rec(callee, modules, visit)?;
        }

        let function = self.program.get(func);
        let delay =
            self.estimator
                .delay_with(func, modules, &mut self.in_progress);
        visit(function, delay).map_err(|e| e.with_function(function.name))?;
        modules.insert(function.name, delay);
        log::debug!("Delay of `{}': {delay}", function.name);
        Ok(())
    }
}
