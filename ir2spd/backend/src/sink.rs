use crate::ModuleDescription;
use ir2spd_ir::Id;
use ir2spd_utils::{Error, SpdResult};
use linked_hash_map::LinkedHashMap;
use std::io;

/// Destination of emitted modules.
pub trait ModuleSink {
    /// Accept the module of one function. An error means the module was not
    /// stored.
    fn write_module(&mut self, module: &ModuleDescription) -> SpdResult<()>;
}

impl<S: ModuleSink + ?Sized> ModuleSink for &mut S {
    fn write_module(&mut self, module: &ModuleDescription) -> SpdResult<()> {
        (**self).write_module(module)
    }
}

/// Keeps the text of every module in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    modules: LinkedHashMap<Id, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of the module of `name`.
    pub fn get<S: Into<Id>>(&self, name: S) -> Option<&str> {
        self.modules.get(&name.into()).map(String::as_str)
    }

    /// Names and texts of all modules in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (Id, &str)> {
        self.modules.iter().map(|(n, t)| (*n, t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleSink for MemorySink {
    fn write_module(&mut self, module: &ModuleDescription) -> SpdResult<()> {
        self.modules.insert(module.name, module.to_string());
        Ok(())
    }
}

/// Appends every module to a writer, separated by blank lines.
pub struct WriterSink<W: io::Write> {
    writer: W,
    written: usize,
}

impl<W: io::Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> ModuleSink for WriterSink<W> {
    fn write_module(&mut self, module: &ModuleDescription) -> SpdResult<()> {
        let res = if self.written == 0 {
            write!(self.writer, "{module}")
        } else {
            write!(self.writer, "\n{module}")
        };
        res.and_then(|_| self.writer.flush()).map_err(|err| {
            Error::write_error(format!(
                "cannot write `{}': {err}",
                module.file_name()
            ))
        })?;
        self.written += 1;
        Ok(())
    }
}
