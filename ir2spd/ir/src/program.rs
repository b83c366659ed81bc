use crate::Function;
use ir2spd_utils::{Error, Id, SpdResult};
use std::collections::HashMap;

/// Index of a function in a [Program].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FuncIdx(u32);

impl FuncIdx {
    pub fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One compilation unit: every function, defined or declared.
#[derive(Debug, Clone, Default)]
pub struct Program {
    functions: Vec<Function>,
    names: HashMap<Id, FuncIdx>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a function to the program. Function names must be unique.
    pub fn add_function(&mut self, func: Function) -> SpdResult<FuncIdx> {
        if self.names.contains_key(&func.name) {
            return Err(Error::misc(format!(
                "Function `{}' is already defined",
                func.name
            )));
        }
        let idx = FuncIdx::new(self.functions.len());
        self.names.insert(func.name, idx);
        self.functions.push(func);
        Ok(idx)
    }

    /// # Panics
    /// Panics if `idx` does not belong to this program.
    pub fn get(&self, idx: FuncIdx) -> &Function {
        &self.functions[idx.index()]
    }

    pub(crate) fn get_mut(&mut self, idx: FuncIdx) -> &mut Function {
        &mut self.functions[idx.index()]
    }

    /// Find a function by name.
    pub fn find<S: Into<Id>>(&self, name: S) -> Option<FuncIdx> {
        self.names.get(&name.into()).copied()
    }

    /// Iterate over the functions in the order they were added.
    pub fn functions(&self) -> impl Iterator<Item = (FuncIdx, &Function)> {
        self.functions
            .iter()
            .enumerate()
            .map(|(idx, f)| (FuncIdx::new(idx), f))
    }

    pub fn contains(&self, idx: FuncIdx) -> bool {
        idx.index() < self.functions.len()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
