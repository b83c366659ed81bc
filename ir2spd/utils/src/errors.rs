//! Errors generated by the translator.
use crate::Id;

/// Convinience wrapper to represent success or meaningful compiler error.
pub type SpdResult<T> = std::result::Result<T, Error>;

/// Errors generated by the translator
#[derive(Clone)]
pub struct Error {
    kind: Box<ErrorKind>,
    /// Function being translated when the error was raised.
    func: Option<Id>,
    post_msg: Option<String>,
}

/// The category of an [Error].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An arithmetic opcode with no operator in the target grammar.
    #[error("Unsupported opcode: {0}")]
    UnsupportedOpcode(String),
    /// An instruction kind with no translation.
    #[error("Unsupported instruction: {0}")]
    UnsupportedInstruction(String),
    /// A return type or constant representation with no encoding.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),
    /// The destination for emitted modules could not be written.
    #[error("Output sink unavailable: {0}")]
    WriteError(String),
    /// A reference to a function that does not exist.
    #[error("Undefined function: {0}")]
    Undefined(Id),
    /// Miscellaneous error message
    #[error("{0}")]
    Misc(String),
}

impl Error {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
            func: None,
            post_msg: None,
        }
    }

    /// Attach the function that was being translated. An already attached
    /// function is kept since it is the innermost one.
    pub fn with_function(mut self, func: Id) -> Self {
        self.func.get_or_insert(func);
        self
    }

    pub fn with_post_msg(mut self, msg: Option<String>) -> Self {
        self.post_msg = msg;
        self
    }

    pub fn unsupported_opcode<S: ToString>(opcode: S) -> Self {
        Self::new(ErrorKind::UnsupportedOpcode(opcode.to_string()))
    }

    pub fn unsupported_instruction<S: ToString>(instr: S) -> Self {
        Self::new(ErrorKind::UnsupportedInstruction(instr.to_string()))
    }

    pub fn unsupported_type<S: ToString>(ty: S) -> Self {
        Self::new(ErrorKind::UnsupportedType(ty.to_string()))
    }

    pub fn write_error<S: ToString>(msg: S) -> Self {
        Self::new(ErrorKind::WriteError(msg.to_string()))
    }

    pub fn undefined(name: Id) -> Self {
        Self::new(ErrorKind::Undefined(name))
    }

    pub fn misc<S: ToString>(msg: S) -> Self {
        Self::new(ErrorKind::Misc(msg.to_string()))
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The function being translated when this error was raised, if known.
    pub fn function(&self) -> Option<Id> {
        self.func
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(func) = &self.func {
            write!(f, "[{func}] ")?;
        }
        write!(f, "{}", self.kind)?;
        if let Some(post) = &self.post_msg {
            write!(f, "\n{post}")?;
        }
        Ok(())
    }
}

// Print the same message when an error is returned from `main`.
impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::write_error(format!("IO Error: {e}"))
    }
}

impl From<std::fmt::Error> for Error {
    fn from(_: std::fmt::Error) -> Self {
        Error::write_error("formatting failed")
    }
}
