//! Module descriptions and their emission from functions.
use crate::conf::ConstantMode;
use crate::translator::{RETURN_PORT, Translator};
use ir2spd_ir::{FloatKind, Function, Id, Program, Type};
use ir2spd_utils::{Error, SpdResult};
use itertools::Itertools;
use std::fmt;

/// Structural port raised when the module starts an operation.
pub const START_PORT: &str = "sop";
/// Structural port raised when the module ends an operation.
pub const END_PORT: &str = "eop";
/// Extension of files holding a module description.
pub const MODULE_EXTENSION: &str = "spd";

/// The SPD description of one function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescription {
    pub name: Id,
    /// Input ports, structural ports included.
    pub inputs: Vec<String>,
    /// Output ports. Empty for functions returning nothing.
    pub outputs: Vec<String>,
    /// Hoisted constants as `(name, value)`.
    pub params: Vec<(String, String)>,
    /// Equation lines in order.
    pub equations: Vec<String>,
    /// Estimated latency, once known.
    pub delay: Option<u64>,
}

impl ModuleDescription {
    pub fn with_delay(mut self, delay: u64) -> Self {
        self.delay = Some(delay);
        self
    }

    /// File the description is conventionally saved to.
    pub fn file_name(&self) -> String {
        format!("{}.{MODULE_EXTENSION}", self.name)
    }
}

fn port_list(ns: &str, ports: &[String]) -> String {
    if ports.is_empty() {
        "{}".to_string()
    } else {
        format!("{{{ns}::{}}}", ports.iter().join(", "))
    }
}

impl fmt::Display for ModuleDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// Module {}", self.name)?;
        writeln!(f, "Name      {};", self.name)?;
        writeln!(f, "Main_In   {};", port_list("Mi", &self.inputs))?;
        writeln!(f, "Main_Out  {};", port_list("Mo", &self.outputs))?;

        if !self.params.is_empty() {
            writeln!(f)?;
            writeln!(f, "// parameter")?;
            for (name, value) in &self.params {
                writeln!(f, "Param     {name} = {value};")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "// equation")?;
        for equ in &self.equations {
            writeln!(f, "{equ}")?;
        }

        writeln!(f)?;
        writeln!(f, "// direct connection")?;
        writeln!(
            f,
            "DRCT      (Mo::{START_PORT}, Mo::{END_PORT}) = \
             (Mi::{START_PORT}, Mi::{END_PORT});"
        )
    }
}

/// Builds the [ModuleDescription] of a function.
pub struct ModuleEmitter;

impl ModuleEmitter {
    /// Emit the module of `func`, which must have a body. The returned
    /// description has no delay. Errors name `func`.
    pub fn emit(
        program: &Program,
        func: &Function,
        constants: ConstantMode,
    ) -> SpdResult<ModuleDescription> {
        Self::emit_module(program, func, constants)
            .map_err(|e| e.with_function(func.name))
    }

    fn emit_module(
        program: &Program,
        func: &Function,
        constants: ConstantMode,
    ) -> SpdResult<ModuleDescription> {
        if !func.has_body() {
            return Err(Error::undefined(func.name)
                .with_post_msg(Some("Declarations have no module".into())));
        }
        let outputs = Self::output_ports(func.ret)?;

        let mut translator = Translator::new(program, func, constants);
        let inputs = (0..func.params.len())
            .map(|idx| translator.param_port(idx))
            .chain([START_PORT.to_string(), END_PORT.to_string()])
            .collect();
        let equations = translator.translate()?;
        let params = match translator.pool() {
            Some(pool) => pool.declarations()?,
            None => vec![],
        };

        Ok(ModuleDescription {
            name: func.name,
            inputs,
            outputs,
            params,
            equations,
            delay: None,
        })
    }

    fn output_ports(ret: Type) -> SpdResult<Vec<String>> {
        match ret {
            Type::Void => Ok(vec![]),
            Type::Int(_)
            | Type::Float(FloatKind::Single | FloatKind::Double) => Ok(vec![
                RETURN_PORT.to_string(),
                START_PORT.to_string(),
                END_PORT.to_string(),
            ]),
            ty => Err(Error::unsupported_type(format!("return type {ty}"))),
        }
    }
}
