use crate::ModuleSink;
use ir2spd_ir::Program;
use ir2spd_opt::ModuleMap;
use ir2spd_utils::SpdResult;

/// A backend that turns a [Program] into hardware module descriptions.
pub trait Backend {
    /// The name of this backend.
    fn name(&self) -> &'static str;
    /// Validate this program for emitting using this backend. Returns an
    /// Err(..) if the program has unexpected constructs.
    fn validate(&self, prog: &Program) -> SpdResult<()>;
    /// Emit one module per translated function into `sink` and return the
    /// delay of every translated function.
    fn emit(
        &self,
        prog: &Program,
        sink: &mut dyn ModuleSink,
    ) -> SpdResult<ModuleMap>;
    /// Convience function to validate and emit the program.
    fn run(
        &self,
        prog: &Program,
        sink: &mut dyn ModuleSink,
    ) -> SpdResult<ModuleMap> {
        self.validate(prog)?;
        self.emit(prog, sink)
    }
}
