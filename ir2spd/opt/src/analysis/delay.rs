use crate::ModuleMap;
use ir2spd_ir::{CallGraph, FuncIdx, Program};
use std::cmp;
use std::collections::HashSet;

/// Delay of a function that calls no function with a body.
pub const BASE_DELAY: u64 = 5;
/// Delay added on top of the callee's delay for every call.
pub const CALL_OVERHEAD: u64 = 10;

/// Cost model used to estimate the latency of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialize",
    derive(serde::Deserialize, serde::Serialize),
    serde(default)
)]
pub struct DelayModel {
    pub base_delay: u64,
    pub call_overhead: u64,
}

impl Default for DelayModel {
    fn default() -> Self {
        Self {
            base_delay: BASE_DELAY,
            call_overhead: CALL_OVERHEAD,
        }
    }
}

/// Estimates the latency of a function from the latency of its callees:
/// ```text
/// delay(f) = max(base_delay, max(delay(c) + call_overhead for each callee c))
/// ```
/// Only callees with a body are counted. Delays already recorded in the
/// [ModuleMap] are reused as is.
///
/// This is a placeholder for the latency reported by the SPD compiler.
pub struct DelayEstimator<'a> {
    program: &'a Program,
    graph: &'a CallGraph,
    model: DelayModel,
}

impl<'a> DelayEstimator<'a> {
    pub fn new(
        program: &'a Program,
        graph: &'a CallGraph,
        model: DelayModel,
    ) -> Self {
        Self {
            program,
            graph,
            model,
        }
    }

    /// Estimate the delay of `func`.
    pub fn delay(&self, func: FuncIdx, modules: &ModuleMap) -> u64 {
        self.delay_with(func, modules, &mut HashSet::new())
    }

    /// Estimate the delay of `func` while the functions in `in_flight` are
    /// still being processed. An in-flight callee has no delay yet and only
    /// contributes the call overhead. Callees that are neither recorded nor
    /// in flight are estimated recursively.
    pub fn delay_with(
        &self,
        func: FuncIdx,
        modules: &ModuleMap,
        in_flight: &mut HashSet<FuncIdx>,
    ) -> u64 {
        if let Some(delay) = modules.get(self.program.get(func).name) {
            return delay;
        }

        let fresh = in_flight.insert(func);
        let mut delay = self.model.base_delay;
        for callee in self.graph.resolved_callees(func) {
            let callee_delay =
                match modules.get(self.program.get(callee).name) {
                    Some(d) => d,
                    None if in_flight.contains(&callee) => 0,
                    None => self.delay_with(callee, modules, in_flight),
                };
            delay = cmp::max(delay, callee_delay + self.model.call_overhead);
        }
        if fresh {
            in_flight.remove(&func);
        }
        delay
    }
}
