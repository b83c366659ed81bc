use ir2spd_ir::{CallGraph, FuncIdx, Function, Id, Program};

/// Name of the function the translation starts from by default.
pub const DEFAULT_ENTRY: &str = "fpga_main";

/// Selects the functions that a walk over the call graph starts from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serialize",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "snake_case")
)]
pub enum EntryPolicy {
    /// Functions with one of these names.
    Named(Vec<Id>),
    /// Every function with a body.
    AllDefined,
}

impl Default for EntryPolicy {
    fn default() -> Self {
        EntryPolicy::Named(vec![Id::from(DEFAULT_ENTRY)])
    }
}

impl EntryPolicy {
    pub fn is_entry(&self, func: &Function) -> bool {
        match self {
            EntryPolicy::Named(names) => names.contains(&func.name),
            EntryPolicy::AllDefined => func.has_body(),
        }
    }

    /// Entry functions of `program` in bottom-up call graph order: an entry
    /// called by another entry comes first.
    pub fn entries(
        &self,
        program: &Program,
        graph: &CallGraph,
    ) -> Vec<FuncIdx> {
        graph
            .sccs()
            .into_iter()
            .flatten()
            .filter(|&f| self.is_entry(program.get(f)))
            .collect()
    }
}
