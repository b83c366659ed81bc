use ir2spd_opt::EntryPolicy;
use ir2spd_opt::analysis::DelayModel;

/// How constant operands appear in equations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialize",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "snake_case")
)]
pub enum ConstantMode {
    /// Write the constant's text at every use.
    #[default]
    Inline,
    /// Declare every distinct constant once as a `Param` of the module and
    /// refer to it by name.
    Hoist,
}

/// Configuration of the SPD backend.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serialize",
    derive(serde::Deserialize, serde::Serialize),
    serde(default)
)]
pub struct BackendConf {
    pub constants: ConstantMode,
    /// Functions the translation starts from.
    pub entry: EntryPolicy,
    pub delay: DelayModel,
}
