//! SPD backend: turns functions into SPD hardware module descriptions.
mod conf;
mod constant;
mod module;
mod namer;
mod pool;
mod sink;
mod spd;
mod traits;
mod translator;

pub use conf::{BackendConf, ConstantMode};
pub use constant::{format_constant, format_float, format_int};
pub use module::{
    END_PORT, MODULE_EXTENSION, ModuleDescription, ModuleEmitter, START_PORT,
};
pub use namer::{INPUT_PREFIX, TEMP_PREFIX, ValueNamer};
pub use pool::{ConstantPool, FLOAT_PARAM_PREFIX, INT_PARAM_PREFIX};
pub use sink::{MemorySink, ModuleSink, WriterSink};
pub use spd::SpdBackend;
pub use traits::Backend;
pub use translator::{RETURN_PORT, Translator, operator};
