use crate::selection::Mode;

/// Why a proposed selection or value was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PickError {
    /// No option carries this value.
    #[error("no option with value `{0}`")]
    Unknown(String),
    /// The option exists but is disabled.
    #[error("option `{0}` is disabled")]
    Disabled(String),
    /// The whole picker is disabled.
    #[error("picker is disabled")]
    PickerDisabled,
    /// A value of the wrong mode was fed to the picker.
    #[error("picker is in {expected:?} mode, got a {got:?} value")]
    ModeMismatch {
        /// The picker's mode.
        expected: Mode,
        /// The mode of the rejected value.
        got: Mode,
    },
}
