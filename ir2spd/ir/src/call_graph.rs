//! The call graph of a [Program].
use crate::{FuncIdx, InstKind, Program};
use ir2spd_utils::{Error, SpdResult};
use itertools::Itertools;
use petgraph::Direction;
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashSet;
use std::io;

/// A function in the call graph.
#[derive(Debug, Clone, Copy)]
pub struct CallNode {
    pub func: FuncIdx,
    /// The function has a body that can be translated.
    pub resolved: bool,
}

/// One call site: the caller invokes `callee`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallEdge {
    pub callee: FuncIdx,
    /// The callee has a body. Unresolved callees are external code.
    pub resolved: bool,
}

/// Directed graph where an edge `A -> B` means that `A` calls `B`. There is
/// one edge per call site, so a function calling another twice has two
/// edges to it. Recursive programs produce cycles.
pub struct CallGraph {
    graph: DiGraph<CallNode, ()>,
    /// Node of every function, indexed by [FuncIdx].
    nodes: Vec<NodeIndex>,
}

impl CallGraph {
    /// Build the call graph of every function in `program`. Call sites are
    /// added in layout order. Fails if a call refers to a function that is
    /// not part of `program`.
    pub fn new(program: &Program) -> SpdResult<Self> {
        let mut graph = DiGraph::new();
        let nodes = program
            .functions()
            .map(|(func, f)| {
                graph.add_node(CallNode {
                    func,
                    resolved: f.has_body(),
                })
            })
            .collect_vec();

        for (caller, f) in program.functions() {
            for (_, instr) in f.instructions() {
                if let InstKind::Call { callee, .. } = &instr.kind {
                    let Some(&target) = nodes.get(callee.index()) else {
                        return Err(Error::misc(format!(
                            "call to unknown function #{}",
                            callee.index()
                        ))
                        .with_function(f.name));
                    };
                    graph.add_edge(nodes[caller.index()], target, ());
                }
            }
        }
        log::debug!(
            "Call graph has {} functions and {} call sites",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self { graph, nodes })
    }

    fn node(&self, func: FuncIdx) -> NodeIndex {
        self.nodes[func.index()]
    }

    /// Whether `func` has a body.
    pub fn is_resolved(&self, func: FuncIdx) -> bool {
        self.graph[self.node(func)].resolved
    }

    /// Outgoing call edges of `func` in call-site order.
    pub fn calls(&self, func: FuncIdx) -> Vec<CallEdge> {
        self.graph
            .edges_directed(self.node(func), Direction::Outgoing)
            .sorted_by_key(|e| e.id())
            .map(|e| {
                let target = &self.graph[e.target()];
                CallEdge {
                    callee: target.func,
                    resolved: target.resolved,
                }
            })
            .collect()
    }

    /// Callees of `func` that have a body, one entry per call site.
    pub fn resolved_callees(&self, func: FuncIdx) -> Vec<FuncIdx> {
        self.calls(func)
            .into_iter()
            .filter(|e| e.resolved)
            .map(|e| e.callee)
            .collect()
    }

    /// Strongly connected components ordered bottom-up: every component
    /// comes after the components it calls into. Members of a component are
    /// sorted by index.
    pub fn sccs(&self) -> Vec<Vec<FuncIdx>> {
        algo::tarjan_scc(&self.graph)
            .into_iter()
            .map(|scc| {
                scc.into_iter()
                    .map(|n| self.graph[n].func)
                    .sorted()
                    .collect()
            })
            .collect()
    }

    /// Write the calls reachable from `entry`, one line per call site:
    /// `<caller> calls function: <callee>` for callees with a body and
    /// `<caller> calls external node` otherwise. A callee is expanded right
    /// after its line is written, and every function is expanded at most
    /// once.
    pub fn write_calls<F: io::Write>(
        &self,
        program: &Program,
        entry: FuncIdx,
        f: &mut F,
    ) -> io::Result<()> {
        let mut expanded = HashSet::new();
        self.write_calls_rec(program, entry, &mut expanded, f)
    }

    fn write_calls_rec<F: io::Write>(
        &self,
        program: &Program,
        func: FuncIdx,
        expanded: &mut HashSet<FuncIdx>,
        f: &mut F,
    ) -> io::Result<()> {
        if !expanded.insert(func) {
            return Ok(());
        }
        let name = program.get(func).name;
        for edge in self.calls(func) {
            if edge.resolved {
                writeln!(
                    f,
                    "{name} calls function: {}",
                    program.get(edge.callee).name
                )?;
                self.write_calls_rec(program, edge.callee, expanded, f)?;
            } else {
                writeln!(f, "{name} calls external node")?;
            }
        }
        Ok(())
    }
}
