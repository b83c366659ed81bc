//! SPD backend for the translator.
//!
//! Every function reachable from an entry function is turned into an SPD
//! module, callees first, and handed to a [ModuleSink] together with its
//! estimated delay.
use crate::traits::Backend;
use crate::{BackendConf, ModuleDescription, ModuleEmitter, ModuleSink};
use ir2spd_ir::{CallGraph, FuncIdx, Function, InstKind, Program};
use ir2spd_opt::traversal::CallGraphWalker;
use ir2spd_opt::{EntryPolicy, ModuleMap};
use ir2spd_utils::{Error, SpdResult};
use std::time::Instant;

/// Translates programs into SPD modules.
#[derive(Default)]
pub struct SpdBackend {
    conf: BackendConf,
}

impl SpdBackend {
    pub fn new(conf: BackendConf) -> Self {
        Self { conf }
    }

    /// Process `entry` and everything it calls, writing every new module to
    /// `sink`. Functions already in `modules` are not translated again.
    pub fn process(
        &self,
        prog: &Program,
        graph: &CallGraph,
        entry: FuncIdx,
        modules: &mut ModuleMap,
        sink: &mut dyn ModuleSink,
    ) -> SpdResult<()> {
        self.process_entries(prog, graph, [entry], modules, sink)
    }

    fn process_entries<I>(
        &self,
        prog: &Program,
        graph: &CallGraph,
        entries: I,
        modules: &mut ModuleMap,
        sink: &mut dyn ModuleSink,
    ) -> SpdResult<()>
    where
        I: IntoIterator<Item = FuncIdx>,
    {
        let mut walker = CallGraphWalker::new(prog, graph, self.conf.delay);
        walker.process_all(entries, modules, |func, delay| {
            let time = Instant::now();
            let module = self.emit_module(prog, func, delay)?;
            sink.write_module(&module)?;
            log::info!("Generated `{}` in {:?}", func.name, time.elapsed());
            Ok(())
        })
    }

    fn emit_module(
        &self,
        prog: &Program,
        func: &Function,
        delay: u64,
    ) -> SpdResult<ModuleDescription> {
        Ok(ModuleEmitter::emit(prog, func, self.conf.constants)?
            .with_delay(delay))
    }

    /// Log the calls reachable from every entry.
    fn log_calls(prog: &Program, graph: &CallGraph, entries: &[FuncIdx]) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        for &entry in entries {
            let mut buf = Vec::new();
            if graph.write_calls(prog, entry, &mut buf).is_ok() {
                log::debug!(
                    "Calls from `{}':\n{}",
                    prog.get(entry).name,
                    String::from_utf8_lossy(&buf)
                );
            }
        }
    }
}

impl Backend for SpdBackend {
    fn name(&self) -> &'static str {
        "spd"
    }

    fn validate(&self, prog: &Program) -> SpdResult<()> {
        for (_, func) in prog.functions() {
            for (_, instr) in func.instructions() {
                let InstKind::Call { callee, args } = &instr.kind else {
                    continue;
                };
                if !prog.contains(*callee) {
                    return Err(Error::misc(format!(
                        "call to unknown function #{}",
                        callee.index()
                    ))
                    .with_function(func.name));
                }
                let target = prog.get(*callee);
                if target.params.len() != args.len() {
                    return Err(Error::misc(format!(
                        "`{}' expects {} arguments but is called with {}",
                        target.name,
                        target.params.len(),
                        args.len()
                    ))
                    .with_function(func.name));
                }
            }
        }
        if let EntryPolicy::Named(names) = &self.conf.entry {
            let missing = names.iter().find(|&&n| prog.find(n).is_none());
            if let Some(&name) = missing {
                return Err(Error::undefined(name)
                    .with_post_msg(Some("Entry functions must exist".into())));
            }
        }
        Ok(())
    }

    fn emit(
        &self,
        prog: &Program,
        sink: &mut dyn ModuleSink,
    ) -> SpdResult<ModuleMap> {
        let graph = CallGraph::new(prog)?;
        let entries = self.conf.entry.entries(prog, &graph);
        Self::log_calls(prog, &graph, &entries);

        let mut modules = ModuleMap::new();
        self.process_entries(prog, &graph, entries, &mut modules, sink)?;
        Ok(modules)
    }
}
